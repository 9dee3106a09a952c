//! Section identities, per-section percentages, and the weighted final score.

use serde::{Deserialize, Serialize};

/// The three resume sections that are scored against a job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Skills,
    Experience,
    Projects,
}

impl Section {
    /// All scored sections, in scoring order.
    pub const ALL: [Section; 3] = [Section::Skills, Section::Experience, Section::Projects];

    pub fn name(self) -> &'static str {
        match self {
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Projects => "projects",
        }
    }

    /// Share of the final score. The three weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Section::Skills => 0.40,
            Section::Experience => 0.35,
            Section::Projects => 0.25,
        }
    }
}

/// Percentage match (0–100, two decimals) per section.
/// Sections with no text carry 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreMap {
    pub skills: f64,
    pub experience: f64,
    pub projects: f64,
}

impl ScoreMap {
    pub fn get(&self, section: Section) -> f64 {
        match section {
            Section::Skills => self.skills,
            Section::Experience => self.experience,
            Section::Projects => self.projects,
        }
    }

    pub fn set(&mut self, section: Section, score: f64) {
        match section {
            Section::Skills => self.skills = score,
            Section::Experience => self.experience = score,
            Section::Projects => self.projects = score,
        }
    }
}

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a cosine similarity into a two-decimal percentage.
pub fn similarity_to_percent(similarity: f64) -> f64 {
    round2(similarity * 100.0)
}

/// final = round(0.40 × skills + 0.35 × experience + 0.25 × projects, 2)
pub fn weighted_final_score(scores: &ScoreMap) -> f64 {
    let total: f64 = Section::ALL
        .iter()
        .map(|&section| section.weight() * scores.get(section))
        .sum();
    round2(total)
}
