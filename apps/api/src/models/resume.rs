use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One person's résumé: identity and contact fields plus owned, ordered sections.
///
/// Field order in every `Vec` is the display order. Nothing here sorts by
/// `sort_value`; see `document::ordering` for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub full_name: String,
    pub headline: String,
    pub email: String,
    pub phone_number: String,
    /// Free-form lines shown next to the contact details (links, location).
    pub extra_infos: Vec<String>,
    pub sections: Vec<Section>,
    /// Position of this résumé among a user's other résumés.
    pub sort_value: i32,
}

/// A titled group of entries, e.g. "Experience".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub name: String,
    pub data_points: Vec<DataPoint>,
    pub sort_value: i32,
}

/// One entry within a section (a job, a degree, a project).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    pub heading: String,
    pub job_title: String,
    /// Free text, e.g. "Jan 2020 – Present".
    pub date_range: String,
    pub description: String,
    /// Renders as a single line. `bullet_points` should be empty when set.
    pub is_single_point: bool,
    pub bullet_points: Vec<String>,
    pub sort_value: i32,
}

/// A résumé as held by a `ResumeStore`, owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document: Resume,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
