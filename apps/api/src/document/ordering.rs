//! Ordering — explicit re-sorting of résumé content by `sort_value`.
//!
//! The document model keeps insertion order. Callers that want `sort_value`
//! order ask for it here and pick the direction; ties keep their relative
//! order (`slice::sort_by_key` is stable).

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::resume::{DataPoint, Resume, Section};

/// Serialized as "asc"/"desc", the same words `FromStr` and `Display` use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!(
                "unknown sort direction '{other}', expected 'asc' or 'desc'"
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// Stable sort of any slice by an `i32` key in the requested direction.
pub fn sort_by_sort_value<T>(items: &mut [T], key: impl Fn(&T) -> i32, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => items.sort_by_key(|item| key(item)),
        SortDirection::Descending => items.sort_by_key(|item| Reverse(key(item))),
    }
}

pub fn sort_data_points_in_place(data_points: &mut [DataPoint], direction: SortDirection) {
    sort_by_sort_value(data_points, |dp| dp.sort_value, direction);
}

/// Sorts sections, then the data points inside each section.
pub fn sort_sections_in_place(sections: &mut [Section], direction: SortDirection) {
    sort_by_sort_value(sections, |s| s.sort_value, direction);
    for section in sections.iter_mut() {
        sort_data_points_in_place(&mut section.data_points, direction);
    }
}

/// Returns a sorted copy of `resume`. Bullet points and extra infos have no
/// key and stay as they are.
pub fn sorted_resume(resume: &Resume, direction: SortDirection) -> Resume {
    let mut sorted = resume.clone();
    sort_sections_in_place(&mut sorted.sections, direction);
    sorted
}
