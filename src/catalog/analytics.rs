use serde::{Deserialize, Serialize};

/// Mock series backing the analytics screen. Purely presentational; nothing
/// here is derived from live state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalyticsData {
    #[serde(default)]
    pub performance: Vec<CourseScore>,
    #[serde(default)]
    pub weekly_xp: Vec<WeeklyXp>,
    #[serde(default)]
    pub skills: Vec<SubjectSkill>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourseScore {
    pub name: String,
    pub score: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyXp {
    pub day: String,
    pub xp: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubjectSkill {
    pub subject: String,
    /// Mastery estimate, 0-100.
    pub level: u8,
}
