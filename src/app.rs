use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::catalog::course::{CourseId, UnitId};
use crate::catalog::user::{Role, User};
use crate::chat::ChatPanel;
use crate::config::Config;
use crate::event::AppEvent;
use crate::export;
use crate::genai::client::GeminiClient;
use crate::genai::worker::{self, GenEvent};
use crate::session::quiz::{QuizSession, SessionId};
use crate::session::score::QuizResult;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub const FALLBACK_TOPIC: &str = "General";

/// What the main area shows. Detail variants carry their selection, so a
/// detail screen without a selected entity cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    CourseDetail { course: CourseId },
    UnitDetail { course: CourseId, unit: UnitId },
    AiTutor,
    Analytics,
}

/// Bare view tags for whole-view navigation (sidebar/shortcut jumps). Jumping
/// to a detail view without a selection is answered with the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Dashboard,
    CourseDetail,
    UnitDetail,
    AiTutor,
    Analytics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Identity,
    AccessKey,
}

/// Login screen state: a cosmetic boot sequence plus two free-text fields
/// that are never validated.
pub struct LoginForm {
    pub boot: u8,
    pub field: LoginField,
    pub identity: LineInput,
    pub access_key: LineInput,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            boot: 0,
            field: LoginField::Identity,
            identity: LineInput::new(""),
            access_key: LineInput::new(""),
        }
    }

    pub fn ready(&self) -> bool {
        self.boot >= 100
    }

    pub fn tick(&mut self) {
        self.boot = (self.boot + 2).min(100);
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Identity => LoginField::AccessKey,
            LoginField::AccessKey => LoginField::Identity,
        };
    }
}

/// Result of a completed quiz, kept around for the banner until dismissed.
pub struct QuizOutcome {
    pub topic: String,
    pub result: QuizResult,
}

pub struct App {
    pub user: Option<User>,
    pub screen: Screen,
    /// `Some` is quiz mode: the session view supersedes `screen` until the
    /// session is cancelled or completed.
    pub quiz: Option<QuizSession>,
    pub chat: ChatPanel,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub login: LoginForm,
    pub last_outcome: Option<QuizOutcome>,
    pub status: Option<String>,
    pub course_cursor: usize,
    pub unit_cursor: usize,
    pub faculty_tab: usize,
    pub should_quit: bool,
    client: Option<Arc<GeminiClient>>,
    tx: Sender<AppEvent>,
    next_session: SessionId,
}

impl App {
    pub fn new(config: Config, tx: Sender<AppEvent>) -> anyhow::Result<Self> {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let catalog = Catalog::load()?;

        let client = config.api_key().map(|key| {
            Arc::new(GeminiClient::new(
                key,
                config.model.clone(),
                Duration::from_secs(config.request_timeout_secs),
            ))
        });

        Ok(Self {
            user: None,
            screen: Screen::Dashboard,
            quiz: None,
            chat: ChatPanel::new(),
            catalog,
            config,
            theme,
            login: LoginForm::new(),
            last_outcome: None,
            status: None,
            course_cursor: 0,
            unit_cursor: 0,
            faculty_tab: 0,
            should_quit: false,
            client,
            tx,
            next_session: 0,
        })
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    // --- login -----------------------------------------------------------

    /// Credentials are pre-verified for demo access: any input passes.
    pub fn login_student(&mut self) {
        self.user = Some(self.catalog.student.clone());
        self.screen = Screen::Dashboard;
    }

    pub fn login_faculty(&mut self) {
        self.user = Some(self.catalog.faculty.clone());
        self.screen = Screen::Dashboard;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.screen = Screen::Dashboard;
        self.quiz = None;
        self.chat.reset();
        self.login = LoginForm::new();
        self.last_outcome = None;
        self.status = None;
        self.course_cursor = 0;
        self.unit_cursor = 0;
        self.faculty_tab = 0;
    }

    // --- navigation ------------------------------------------------------

    /// Whole-view jump. Always drops the quiz overlay and every selection;
    /// this is the "go home clean" contract, not stack-based back-navigation.
    pub fn navigate(&mut self, target: NavTarget) {
        self.quiz = None;
        self.last_outcome = None;
        self.status = None;
        self.screen = match target {
            NavTarget::Dashboard => Screen::Dashboard,
            NavTarget::AiTutor => Screen::AiTutor,
            NavTarget::Analytics => Screen::Analytics,
            // No selection survives a navigate, so a detail target has
            // nothing to show: fall back to the dashboard.
            NavTarget::CourseDetail | NavTarget::UnitDetail => Screen::Dashboard,
        };
    }

    pub fn select_course(&mut self, course: &str) {
        if self.catalog.course(course).is_none() {
            return;
        }
        self.unit_cursor = 0;
        self.screen = Screen::CourseDetail {
            course: course.to_string(),
        };
    }

    pub fn select_unit(&mut self, course: &str, unit: &str) {
        if self.catalog.unit(course, unit).is_none() {
            return;
        }
        self.screen = Screen::UnitDetail {
            course: course.to_string(),
            unit: unit.to_string(),
        };
    }

    /// The screen to actually render: a detail screen whose id no longer
    /// resolves degrades to the dashboard instead of erroring.
    pub fn resolved_screen(&self) -> Screen {
        match &self.screen {
            Screen::CourseDetail { course } if self.catalog.course(course).is_none() => {
                Screen::Dashboard
            }
            Screen::UnitDetail { course, unit } if self.catalog.unit(course, unit).is_none() => {
                Screen::Dashboard
            }
            other => other.clone(),
        }
    }

    // --- quiz lifecycle --------------------------------------------------

    /// Topic handed to question generation: the selected unit's title, else
    /// the selected course's first tag, else a fixed fallback. Never empty.
    pub fn quiz_topic(&self) -> String {
        match &self.screen {
            Screen::UnitDetail { course, unit } => self
                .catalog
                .unit(course, unit)
                .map(|u| u.title.clone())
                .or_else(|| {
                    self.catalog
                        .course(course)
                        .and_then(|c| c.primary_tag().map(str::to_string))
                })
                .unwrap_or_else(|| FALLBACK_TOPIC.to_string()),
            Screen::CourseDetail { course } => self
                .catalog
                .course(course)
                .and_then(|c| c.primary_tag().map(str::to_string))
                .unwrap_or_else(|| FALLBACK_TOPIC.to_string()),
            _ => FALLBACK_TOPIC.to_string(),
        }
    }

    /// Enters quiz mode and fires the generation request. Legal from the two
    /// detail screens; a live session makes this a no-op (one session at a
    /// time, the affordance is disabled anyway).
    pub fn start_quiz(&mut self) {
        if self.quiz.is_some() {
            return;
        }
        if !matches!(
            self.screen,
            Screen::CourseDetail { .. } | Screen::UnitDetail { .. }
        ) {
            return;
        }

        let topic = self.quiz_topic();
        let id = self.next_session;
        self.next_session += 1;

        worker::spawn_quiz_request(self.tx.clone(), self.client.clone(), id, topic.clone());
        self.last_outcome = None;
        self.quiz = Some(QuizSession::new(id, topic));
    }

    /// Leaves quiz mode without a result; the screen that launched the quiz
    /// is back. An in-flight generation request is not cancelled -- its
    /// response arrives with a dead session id and is dropped.
    pub fn cancel_quiz(&mut self) {
        self.quiz = None;
    }

    /// Drives `finish` on the submitted session and applies the result.
    pub fn finish_quiz(&mut self) {
        let Some(session) = self.quiz.as_mut() else {
            return;
        };
        if let Some(result) = session.finish() {
            self.complete_quiz(result);
        }
    }

    /// Applies a finished result: marks the selected unit complete through
    /// the catalog's single write point, surfaces the outcome, and lands on
    /// the owning course with the unit deselected.
    fn complete_quiz(&mut self, result: QuizResult) {
        let topic = self
            .quiz
            .as_ref()
            .map(|s| s.topic.clone())
            .unwrap_or_else(|| FALLBACK_TOPIC.to_string());

        if let Screen::UnitDetail { course, unit } = self.screen.clone() {
            self.catalog.mark_unit_complete(&course, &unit);
            self.screen = Screen::CourseDetail { course };
        }

        self.last_outcome = Some(QuizOutcome { topic, result });
        self.quiz = None;
    }

    pub fn dismiss_outcome(&mut self) {
        self.last_outcome = None;
    }

    // --- generation results ----------------------------------------------

    /// Routes a worker resolution to whoever is still waiting for it. Ids
    /// that no longer match a live session or pending chat request belong to
    /// discarded work and fall through silently.
    pub fn handle_gen(&mut self, event: GenEvent) {
        match event {
            GenEvent::Questions { session, questions } => {
                if let Some(quiz) = self.quiz.as_mut() {
                    if quiz.id == session {
                        quiz.resolve(questions);
                    }
                }
            }
            GenEvent::Reply { request, text } => {
                self.chat.resolve(request, text);
            }
        }
    }

    // --- chat ------------------------------------------------------------

    pub fn chat_send(&mut self) {
        let Some((request, history, message)) = self.chat.begin_send() else {
            return;
        };
        worker::spawn_chat_request(
            self.tx.clone(),
            self.client.clone(),
            request,
            history,
            message,
            self.catalog.enrollment_context(),
        );
    }

    // --- notes export ----------------------------------------------------

    pub fn export_notes(&mut self) {
        let Screen::UnitDetail { course, unit } = &self.screen else {
            return;
        };
        let Some(unit) = self.catalog.unit(course, unit) else {
            return;
        };
        let dir = std::path::PathBuf::from(&self.config.export_dir);
        self.status = Some(match export::export_unit_notes(unit, &dir) {
            Ok(path) => format!("Notes exported to {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::session::quiz::QuizPhase;
    use crate::session::sample_question;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut config = Config::default();
        // Point at a variable that cannot exist so tests never pick up a
        // real key from the environment.
        config.api_key_env = "FASN_TEST_NO_KEY".to_string();
        (App::new(config, tx).unwrap(), rx)
    }

    fn first_incomplete(app: &App) -> (String, String) {
        let course = app
            .catalog
            .courses()
            .iter()
            .find(|c| c.units.iter().any(|u| !u.completed))
            .unwrap();
        let unit = course.units.iter().find(|u| !u.completed).unwrap();
        (course.id.clone(), unit.id.clone())
    }

    fn drive_to_submitted(app: &mut App) {
        let quiz = app.quiz.as_mut().unwrap();
        quiz.resolve(vec![
            sample_question("q0", "B"),
            sample_question("q1", "A"),
            sample_question("q2", "C"),
        ]);
        for (i, ans) in ["B", "A", "C"].iter().enumerate() {
            quiz.select_option(ans);
            if i < 2 {
                quiz.next();
            }
        }
        quiz.submit();
    }

    #[test]
    fn navigate_always_resets_selection_and_quiz_mode() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();
        assert!(app.quiz.is_some());

        app.navigate(NavTarget::Dashboard);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.quiz.is_none());

        // Jumping straight to a detail view with no selection lands on the
        // dashboard as well.
        app.navigate(NavTarget::UnitDetail);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn selecting_unknown_ids_is_refused() {
        let (mut app, _rx) = app();
        app.login_student();
        app.select_course("no-such-course");
        assert_eq!(app.screen, Screen::Dashboard);
        app.select_unit("c1", "no-such-unit");
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn topic_prefers_unit_title_then_course_tag_then_fallback() {
        let (mut app, _rx) = app();
        app.login_student();

        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        let unit_title = app.catalog.unit(&course, &unit).unwrap().title.clone();
        assert_eq!(app.quiz_topic(), unit_title);

        app.navigate(NavTarget::Dashboard);
        app.select_course(&course);
        let tag = app
            .catalog
            .course(&course)
            .unwrap()
            .primary_tag()
            .unwrap()
            .to_string();
        assert_eq!(app.quiz_topic(), tag);

        app.navigate(NavTarget::Dashboard);
        assert_eq!(app.quiz_topic(), FALLBACK_TOPIC);
    }

    #[test]
    fn start_quiz_requires_a_detail_screen() {
        let (mut app, _rx) = app();
        app.login_student();
        app.start_quiz();
        assert!(app.quiz.is_none());
    }

    #[test]
    fn completing_a_quiz_marks_the_unit_and_returns_to_the_course() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();

        drive_to_submitted(&mut app);
        app.finish_quiz();

        assert!(app.catalog.unit(&course, &unit).unwrap().completed);
        assert_eq!(app.screen, Screen::CourseDetail { course });
        assert!(app.quiz.is_none());
        let outcome = app.last_outcome.as_ref().unwrap();
        assert_eq!(outcome.result.score, 3);
    }

    #[test]
    fn failed_generation_never_touches_the_unit() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();

        let id = app.quiz.as_ref().unwrap().id;
        app.handle_gen(GenEvent::Questions {
            session: id,
            questions: Vec::new(),
        });
        assert!(matches!(
            app.quiz.as_ref().unwrap().phase(),
            QuizPhase::Failed
        ));

        app.finish_quiz();
        assert!(!app.catalog.unit(&course, &unit).unwrap().completed);
        assert!(app.last_outcome.is_none());
    }

    #[test]
    fn cancel_leaves_the_launching_screen_in_place() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();
        app.cancel_quiz();
        assert_eq!(
            app.screen,
            Screen::UnitDetail {
                course: course.clone(),
                unit
            }
        );
    }

    #[test]
    fn late_response_for_a_discarded_session_is_ignored() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();
        let stale_id = app.quiz.as_ref().unwrap().id;
        app.cancel_quiz();

        app.handle_gen(GenEvent::Questions {
            session: stale_id,
            questions: vec![sample_question("q0", "A")],
        });
        assert!(app.quiz.is_none());

        // A new session only accepts its own id.
        app.start_quiz();
        app.handle_gen(GenEvent::Questions {
            session: stale_id,
            questions: vec![sample_question("q0", "A")],
        });
        assert!(matches!(
            app.quiz.as_ref().unwrap().phase(),
            QuizPhase::Loading
        ));
    }

    #[test]
    fn start_quiz_is_single_session() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, _) = first_incomplete(&app);
        app.select_course(&course);
        app.start_quiz();
        let id = app.quiz.as_ref().unwrap().id;
        app.start_quiz();
        assert_eq!(app.quiz.as_ref().unwrap().id, id);
    }

    #[test]
    fn logout_resets_everything() {
        let (mut app, _rx) = app();
        app.login_student();
        let (course, unit) = first_incomplete(&app);
        app.select_unit(&course, &unit);
        app.start_quiz();
        app.chat.open = true;
        app.logout();

        assert!(app.user.is_none());
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.quiz.is_none());
        assert!(!app.chat.open);
        assert_eq!(app.login.boot, 0);
    }

    #[test]
    fn roles_come_from_the_catalog_profiles() {
        let (mut app, _rx) = app();
        app.login_faculty();
        assert_eq!(app.role(), Some(Role::Faculty));
        app.logout();
        app.login_student();
        assert_eq!(app.role(), Some(Role::Student));
    }
}
