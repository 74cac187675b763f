pub mod analytics;
pub mod course;
pub mod roster;
pub mod user;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::catalog::analytics::AnalyticsData;
use crate::catalog::course::{Course, Unit};
use crate::catalog::roster::{
    AttendancePoint, LeaderboardEntry, Notification, PendingTask, RiskLevel, StudentSummary,
};
use crate::catalog::user::User;

const PORTAL_SEED: &str = include_str!("../../assets/data/portal.json");

/// In-memory portal data. Owns every Course (and through it every Unit);
/// all other parts of the app refer to courses and units by id and route
/// mutation through [`Catalog::mark_unit_complete`], the single write point.
pub struct Catalog {
    courses: Vec<Course>,
    pub student: User,
    pub faculty: User,
    pub roster: Vec<StudentSummary>,
    pub tasks: Vec<PendingTask>,
    pub attendance: Vec<AttendancePoint>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub notifications: Vec<Notification>,
    pub analytics: AnalyticsData,
}

#[derive(Serialize, Deserialize)]
struct PortalSeed {
    student: User,
    faculty: User,
    courses: Vec<Course>,
    #[serde(default)]
    roster: Vec<StudentSummary>,
    #[serde(default)]
    tasks: Vec<PendingTask>,
    #[serde(default)]
    attendance: Vec<AttendancePoint>,
    #[serde(default)]
    leaderboard: Vec<LeaderboardEntry>,
    #[serde(default)]
    notifications: Vec<Notification>,
    #[serde(default)]
    analytics: AnalyticsData,
}

impl Catalog {
    pub fn load() -> anyhow::Result<Self> {
        let seed: PortalSeed =
            serde_json::from_str(PORTAL_SEED).context("portal seed data is malformed")?;
        Ok(Self {
            courses: seed.courses,
            student: seed.student,
            faculty: seed.faculty,
            roster: seed.roster,
            tasks: seed.tasks,
            attendance: seed.attendance,
            leaderboard: seed.leaderboard,
            notifications: seed.notifications,
            analytics: seed.analytics,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn unit(&self, course_id: &str, unit_id: &str) -> Option<&Unit> {
        self.course(course_id).and_then(|c| c.unit(unit_id))
    }

    /// The one sanctioned mutation of domain data: flips a unit's completed
    /// flag to true. Returns whether the flag actually transitioned; a unit
    /// already completed (or an unknown id) leaves the catalog untouched.
    /// The flag is never reset -- there are no retake semantics.
    pub fn mark_unit_complete(&mut self, course_id: &str, unit_id: &str) -> bool {
        let Some(course) = self.courses.iter_mut().find(|c| c.id == course_id) else {
            return false;
        };
        let Some(unit) = course.units.iter_mut().find(|u| u.id == unit_id) else {
            return false;
        };
        if unit.completed {
            return false;
        }
        unit.completed = true;
        true
    }

    pub fn high_risk_count(&self) -> usize {
        self.roster
            .iter()
            .filter(|s| s.risk_level == RiskLevel::High)
            .count()
    }

    pub fn average_attendance(&self) -> f64 {
        if self.roster.is_empty() {
            return 0.0;
        }
        let total: u32 = self.roster.iter().map(|s| u32::from(s.attendance)).sum();
        f64::from(total) / self.roster.len() as f64
    }

    /// Context string handed to the tutor so replies stay scoped to the
    /// learner's actual enrollment.
    pub fn enrollment_context(&self) -> String {
        let codes: Vec<&str> = self.courses.iter().map(|c| c.code.as_str()).collect();
        format!("User is currently enrolled in {}.", codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_parses_and_has_courses() {
        let catalog = Catalog::load().unwrap();
        assert!(!catalog.courses().is_empty());
        for course in catalog.courses() {
            assert!(!course.units.is_empty(), "course {} has no units", course.id);
            assert!(!course.tags.is_empty(), "course {} has no tags", course.id);
        }
        assert!(!catalog.roster.is_empty());
    }

    #[test]
    fn mark_unit_complete_transitions_once() {
        let mut catalog = Catalog::load().unwrap();
        let (course_id, unit_id) = {
            let course = catalog
                .courses()
                .iter()
                .find(|c| c.units.iter().any(|u| !u.completed))
                .expect("seed data should contain an incomplete unit");
            let unit = course.units.iter().find(|u| !u.completed).unwrap();
            (course.id.clone(), unit.id.clone())
        };

        assert!(catalog.mark_unit_complete(&course_id, &unit_id));
        assert!(catalog.unit(&course_id, &unit_id).unwrap().completed);
        // Second call is a no-op: the flag is already set.
        assert!(!catalog.mark_unit_complete(&course_id, &unit_id));
        assert!(catalog.unit(&course_id, &unit_id).unwrap().completed);
    }

    #[test]
    fn mark_unit_complete_ignores_unknown_ids() {
        let mut catalog = Catalog::load().unwrap();
        assert!(!catalog.mark_unit_complete("no-such-course", "no-such-unit"));
        let real_course = catalog.courses()[0].id.clone();
        assert!(!catalog.mark_unit_complete(&real_course, "no-such-unit"));
    }

    #[test]
    fn enrollment_context_lists_course_codes() {
        let catalog = Catalog::load().unwrap();
        let context = catalog.enrollment_context();
        for course in catalog.courses() {
            assert!(context.contains(&course.code));
        }
    }
}
