use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

/// A data point marked single-point that still carries bullet points.
/// Stored as-is; renderers drop the bullets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionWarning {
    pub section: usize,
    pub data_point: usize,
    pub heading: String,
    pub message: String,
}

pub fn check_conventions(resume: &Resume) -> Vec<ConventionWarning> {
    resume
        .sections
        .iter()
        .enumerate()
        .flat_map(|(si, section)| {
            section
                .data_points
                .iter()
                .enumerate()
                .filter(|(_, dp)| dp.is_single_point && !dp.bullet_points.is_empty())
                .map(move |(di, dp)| ConventionWarning {
                    section: si,
                    data_point: di,
                    heading: dp.heading.clone(),
                    message: format!(
                        "single-point entry has {} bullet point(s) that will not be rendered",
                        dp.bullet_points.len()
                    ),
                })
        })
        .collect()
}
