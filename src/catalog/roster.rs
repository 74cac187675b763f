use serde::{Deserialize, Serialize};

use crate::catalog::user::SemesterGpa;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// One row of the faculty class roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    /// Attendance percentage, 0-100.
    pub attendance: u8,
    pub gpa: f64,
    pub risk_level: RiskLevel,
    pub last_active: String,
    pub email: String,
    pub class_name: String,
    #[serde(default)]
    pub marks_history: Vec<SemesterGpa>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingTask {
    pub title: String,
    pub course_code: String,
    pub due: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttendancePoint {
    pub label: String,
    /// Attendance percentage, 0-100.
    pub percent: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u8,
    pub name: String,
    pub level: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_round_trips() {
        for risk in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            let json = serde_json::to_string(&risk).unwrap();
            let back: RiskLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(risk, back);
        }
    }
}
