mod app;
mod catalog;
mod chat;
mod config;
mod event;
mod export;
mod genai;
mod session;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, LoginField, NavTarget, Screen};
use catalog::user::Role;
use config::Config;
use event::{AppEvent, EventHandler};
use session::quiz::QuizPhase;
use ui::components::analytics::AnalyticsView;
use ui::components::chat_panel::ChatPanelView;
use ui::components::course_detail::CourseDetail;
use ui::components::dashboard::StudentDashboard;
use ui::components::faculty::{FACULTY_TABS, FacultyDashboard};
use ui::components::login::LoginScreen;
use ui::components::quiz::QuizView;
use ui::components::result_card::ResultCard;
use ui::components::unit_detail::UnitDetail;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "fasn", version, about = "Terminal campus portal with an AI tutor")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Generative model id")]
    model: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if ui::theme::Theme::load(&config.theme).is_none() {
        eprintln!(
            "Unknown theme \"{}\" (available: {}); using the default.",
            config.theme,
            ui::theme::Theme::available_themes().join(", ")
        );
    }

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, events.sender())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {
                if app.user.is_none() {
                    app.login.tick();
                }
            }
            AppEvent::Resize(_, _) => {}
            AppEvent::Gen(event) => app.handle_gen(event),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.user.is_none() {
        handle_login_key(app, key);
        return;
    }

    // Transient status lines live until the next keypress.
    app.status = None;

    // Result popup is modal.
    if app.last_outcome.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_outcome();
        }
        return;
    }

    // The chat widget can be toggled from anywhere once logged in; while
    // open it captures the keyboard.
    if key.code == KeyCode::F(1) && !matches!(app.screen, Screen::AiTutor) {
        app.chat.toggle();
        return;
    }
    if app.chat.open && !matches!(app.screen, Screen::AiTutor) {
        handle_chat_key(app, key, false);
        return;
    }

    // Quiz mode supersedes whatever screen launched it.
    if app.quiz.is_some() {
        handle_quiz_key(app, key);
        return;
    }

    match app.resolved_screen() {
        Screen::Dashboard => match app.role() {
            Some(Role::Faculty) => handle_faculty_key(app, key),
            _ => handle_dashboard_key(app, key),
        },
        Screen::CourseDetail { course } => handle_course_key(app, key, &course),
        Screen::UnitDetail { course, .. } => handle_unit_key(app, key, &course),
        Screen::AiTutor => handle_chat_key(app, key, true),
        Screen::Analytics => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                app.navigate(NavTarget::Dashboard);
            }
        }
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter if app.login.ready() => app.login_student(),
        KeyCode::F(2) if app.login.ready() => app.login_faculty(),
        KeyCode::Tab | KeyCode::BackTab => app.login.toggle_field(),
        _ if app.login.ready() => {
            let field = match app.login.field {
                LoginField::Identity => &mut app.login.identity,
                LoginField::AccessKey => &mut app.login.access_key,
            };
            field.handle(key);
        }
        _ => {}
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    let course_count = app.catalog.courses().len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.logout(),
        KeyCode::Down | KeyCode::Char('j') => {
            if course_count > 0 {
                app.course_cursor = (app.course_cursor + 1).min(course_count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.course_cursor = app.course_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(course) = app.catalog.courses().get(app.course_cursor) {
                let id = course.id.clone();
                app.select_course(&id);
            }
        }
        KeyCode::Char('a') => app.navigate(NavTarget::Analytics),
        KeyCode::Char('t') => app.navigate(NavTarget::AiTutor),
        _ => {}
    }
}

fn handle_faculty_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.logout(),
        KeyCode::Char('1') => app.faculty_tab = 0,
        KeyCode::Char('2') => app.faculty_tab = 1,
        KeyCode::Char('3') => app.faculty_tab = 2,
        KeyCode::Tab => app.faculty_tab = (app.faculty_tab + 1) % FACULTY_TABS.len(),
        KeyCode::BackTab => {
            app.faculty_tab = if app.faculty_tab == 0 {
                FACULTY_TABS.len() - 1
            } else {
                app.faculty_tab - 1
            }
        }
        _ => {}
    }
}

fn handle_course_key(app: &mut App, key: KeyEvent, course_id: &str) {
    let unit_count = app
        .catalog
        .course(course_id)
        .map(|c| c.units.len())
        .unwrap_or(0);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.navigate(NavTarget::Dashboard),
        KeyCode::Down | KeyCode::Char('j') => {
            if unit_count > 0 {
                app.unit_cursor = (app.unit_cursor + 1).min(unit_count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.unit_cursor = app.unit_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            let unit_id = app
                .catalog
                .course(course_id)
                .and_then(|c| c.units.get(app.unit_cursor))
                .map(|u| u.id.clone());
            if let Some(unit_id) = unit_id {
                app.select_unit(course_id, &unit_id);
            }
        }
        KeyCode::Char('g') => app.start_quiz(),
        _ => {}
    }
}

fn handle_unit_key(app: &mut App, key: KeyEvent, course_id: &str) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            let id = course_id.to_string();
            app.select_course(&id);
        }
        KeyCode::Char('g') => app.start_quiz(),
        KeyCode::Char('e') => app.export_notes(),
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let phase_kind = app.quiz.as_ref().map(|s| match s.phase() {
        QuizPhase::Loading => 'l',
        QuizPhase::Ready(_) => 'r',
        QuizPhase::Submitted(_) => 's',
        QuizPhase::Finished(_) => 'f',
        QuizPhase::Failed => 'x',
    });
    let Some(phase_kind) = phase_kind else { return };

    if key.code == KeyCode::Esc {
        app.cancel_quiz();
        return;
    }

    match phase_kind {
        'r' => match key.code {
            KeyCode::Char(ch @ ('a'..='d' | '1'..='4')) => {
                let index = match ch {
                    'a'..='d' => ch as usize - 'a' as usize,
                    _ => ch as usize - '1' as usize,
                };
                let option = app.quiz.as_ref().and_then(|s| match s.phase() {
                    QuizPhase::Ready(form) => form.question().options.get(index).cloned(),
                    _ => None,
                });
                if let (Some(option), Some(quiz)) = (option, app.quiz.as_mut()) {
                    quiz.select_option(&option);
                }
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => {
                if let Some(quiz) = app.quiz.as_mut() {
                    quiz.next();
                }
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                if let Some(quiz) = app.quiz.as_mut() {
                    quiz.previous();
                }
            }
            KeyCode::Enter => {
                if let Some(quiz) = app.quiz.as_mut() {
                    quiz.submit();
                }
            }
            _ => {}
        },
        's' => match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => {
                if let Some(quiz) = app.quiz.as_mut() {
                    quiz.previous();
                }
            }
            KeyCode::Enter => app.finish_quiz(),
            _ => {}
        },
        // Loading and Failed only react to Esc, handled above; Finished is
        // popped before the next key arrives.
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent, full_page: bool) {
    match key.code {
        KeyCode::Esc => {
            if full_page {
                app.navigate(NavTarget::Dashboard);
            } else {
                app.chat.open = false;
            }
        }
        KeyCode::Enter => app.chat_send(),
        _ => {
            if !app.chat.is_pending() {
                let _ = app.chat.input.handle(key);
            }
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let Some(user) = &app.user else {
        let login_area = ui::layout::centered_rect(55, 75, area);
        frame.render_widget(LoginScreen::new(&app.login, app.theme), login_area);
        return;
    };

    let layout = AppLayout::new(area);

    // Header bar.
    let screen_name = if app.quiz.is_some() {
        "COMBAT SIM".to_string()
    } else {
        match app.resolved_screen() {
            Screen::Dashboard => "LOBBY".to_string(),
            Screen::CourseDetail { .. } => "COURSE NODE".to_string(),
            Screen::UnitDetail { .. } => "UNIT FEED".to_string(),
            Screen::AiTutor => "NETRUNNER AI".to_string(),
            Screen::Analytics => "ANALYTICS".to_string(),
        }
    };
    let profile = match user.role {
        Role::Student => format!(
            " {} | L{} | {} XP | {}",
            user.name, user.level, user.xp, screen_name
        ),
        Role::Faculty => format!(" {} | {} | {}", user.name, user.role.as_str(), screen_name),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " FASN.SYS ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            profile,
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    // Main area: the quiz overlay supersedes the selected screen.
    if let Some(session) = &app.quiz {
        frame.render_widget(QuizView::new(session, app.theme), layout.main);
    } else {
        match app.resolved_screen() {
            Screen::Dashboard => match user.role {
                Role::Faculty => frame.render_widget(
                    FacultyDashboard::new(user, &app.catalog, app.faculty_tab, app.theme),
                    layout.main,
                ),
                Role::Student => frame.render_widget(
                    StudentDashboard::new(
                        user,
                        &app.catalog,
                        app.course_cursor,
                        layout.sidebar,
                        app.theme,
                    ),
                    layout.main,
                ),
            },
            Screen::CourseDetail { course } => {
                if let Some(course) = app.catalog.course(&course) {
                    frame.render_widget(
                        CourseDetail::new(course, app.unit_cursor, app.theme),
                        layout.main,
                    );
                }
            }
            Screen::UnitDetail { course, unit } => {
                if let Some(unit) = app.catalog.unit(&course, &unit) {
                    frame.render_widget(UnitDetail::new(unit, app.theme), layout.main);
                }
            }
            Screen::AiTutor => {
                frame.render_widget(ChatPanelView::new(&app.chat, app.theme), layout.main);
            }
            Screen::Analytics => {
                frame.render_widget(
                    AnalyticsView::new(&app.catalog.analytics, app.theme),
                    layout.main,
                );
            }
        }
    }

    // Footer: status line wins over key hints; narrow terminals get the
    // short form.
    let footer_text = if let Some(status) = &app.status {
        status.clone()
    } else if layout.tier == ui::layout::LayoutTier::Narrow {
        "[F1] Chat  [Esc] Back  [q] Quit".to_string()
    } else {
        footer_hints(app)
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        format!(" {footer_text}"),
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, layout.footer);

    // Floating chat widget over everything but the full-page tutor view.
    if app.chat.open && !matches!(app.resolved_screen(), Screen::AiTutor) {
        let overlay = ui::layout::chat_overlay_rect(area);
        frame.render_widget(ChatPanelView::new(&app.chat, app.theme), overlay);
    }

    // Completed-quiz popup on top.
    if let Some(outcome) = &app.last_outcome {
        let popup = ui::layout::centered_rect(45, 50, area);
        frame.render_widget(ResultCard::new(outcome, app.theme), popup);
    }
}

fn footer_hints(app: &App) -> String {
    if app.quiz.is_some() {
        return "[a-d] Answer  [h/l] Prev/Next  [Enter] Submit  [Esc] Abort  [F1] Tutor".to_string();
    }
    if app.chat.open {
        return "[Enter] Send  [Esc] Close chat".to_string();
    }
    match app.resolved_screen() {
        Screen::Dashboard => match app.role() {
            Some(Role::Faculty) => {
                "[1-3/Tab] Tabs  [F1] Tutor  [Esc] Logout  [q] Quit".to_string()
            }
            _ => "[j/k] Courses  [Enter] Open  [a] Analytics  [t] Tutor  [F1] Chat  [Esc] Logout  [q] Quit"
                .to_string(),
        },
        Screen::CourseDetail { .. } => {
            "[j/k] Units  [Enter] Open  [g] Global quiz  [F1] Chat  [Esc] Lobby".to_string()
        }
        Screen::UnitDetail { .. } => {
            "[g] Take assessment  [e] Export notes  [F1] Chat  [Esc] Back".to_string()
        }
        Screen::AiTutor => "[Enter] Send  [Esc] Lobby".to_string(),
        Screen::Analytics => "[Esc] Lobby".to_string(),
    }
}
