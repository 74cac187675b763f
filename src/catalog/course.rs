use serde::{Deserialize, Serialize};

pub type CourseId = String;
pub type UnitId = String;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub title: String,
    pub description: String,
    /// Lesson-content reference (embed URL in the seed data).
    pub video_url: String,
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub instructor: String,
    /// Seed progress percentage; superseded by the unit completion ratio once
    /// units are present.
    #[serde(default)]
    pub progress: u8,
    pub tags: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Course {
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn completed_units(&self) -> usize {
        self.units.iter().filter(|u| u.completed).count()
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.units.is_empty() {
            return f64::from(self.progress) / 100.0;
        }
        self.completed_units() as f64 / self.units.len() as f64
    }

    /// Topic scope for question generation: the first tag, when one exists.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(|t| t.as_str())
    }
}
