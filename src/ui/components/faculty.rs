use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Catalog;
use crate::catalog::roster::RiskLevel;
use crate::catalog::user::User;
use crate::ui::theme::Theme;

pub const FACULTY_TABS: [&str; 3] = ["Courses", "Roster", "Notifications"];

/// Faculty home: tabbed view over courses, the class roster with risk
/// flags, and the notification feed.
pub struct FacultyDashboard<'a> {
    pub user: &'a User,
    pub catalog: &'a Catalog,
    pub tab: usize,
    pub theme: &'a Theme,
}

impl<'a> FacultyDashboard<'a> {
    pub fn new(user: &'a User, catalog: &'a Catalog, tab: usize, theme: &'a Theme) -> Self {
        Self {
            user,
            catalog,
            tab,
            theme,
        }
    }

    fn risk_color(&self, risk: RiskLevel) -> ratatui::style::Color {
        let colors = &self.theme.colors;
        match risk {
            RiskLevel::Low => colors.success(),
            RiskLevel::Medium => colors.warning(),
            RiskLevel::High => colors.error(),
        }
    }

    fn render_tab_bar(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut spans = vec![Span::styled(" ", Style::default())];
        for (i, name) in FACULTY_TABS.iter().enumerate() {
            let style = if i == self.tab {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.dim())
            };
            spans.push(Span::styled(format!("[{}] {name}  ", i + 1), style));
        }
        spans.push(Span::styled(
            format!("\u{2014} OVERSEER: {}", self.user.name),
            Style::default().fg(colors.accent_alt()),
        ));
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_courses(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines: Vec<Line> = self
            .catalog
            .courses()
            .iter()
            .flat_map(|course| {
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" {}  ", course.code),
                            Style::default()
                                .fg(colors.accent())
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(course.title.clone(), Style::default().fg(colors.fg())),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "   {}/{} units complete | {}",
                            course.completed_units(),
                            course.units.len(),
                            course.description
                        ),
                        Style::default().fg(colors.dim()),
                    )),
                    Line::from(""),
                ]
            })
            .collect();
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" COURSE REGISTRY ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(area, buf);
    }

    fn render_roster(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let header = Line::from(Span::styled(
            format!(
                " {:<16} {:<9} {:>5} {:>6}  {:<7} {}",
                "NAME", "ROLL", "GPA", "ATT%", "RISK", "LAST SEEN"
            ),
            Style::default()
                .fg(colors.header_fg())
                .add_modifier(Modifier::BOLD),
        ));

        let mut lines = vec![header];
        for student in &self.catalog.roster {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<16}", student.name),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!(" {:<9}", student.roll_no),
                    Style::default().fg(colors.dim()),
                ),
                Span::styled(
                    format!(" {:>5.1}", student.gpa),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!(" {:>5}%", student.attendance),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("  {:<7}", student.risk_level.as_str()),
                    Style::default().fg(self.risk_color(student.risk_level)),
                ),
                Span::styled(
                    format!(" {}", student.last_active),
                    Style::default().fg(colors.dim()),
                ),
            ]));
        }

        let title = format!(
            " CLASS ROSTER \u{2014} {} students, {} high risk, avg attendance {:.0}% ",
            self.catalog.roster.len(),
            self.catalog.high_risk_count(),
            self.catalog.average_attendance(),
        );
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(area, buf);
    }

    fn render_notifications(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let lines: Vec<Line> = self
            .catalog
            .notifications
            .iter()
            .flat_map(|n| {
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!(" {} ", n.time),
                            Style::default().fg(colors.accent_alt()),
                        ),
                        Span::styled(
                            n.title.clone(),
                            Style::default()
                                .fg(colors.fg())
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("   {}", n.body),
                        Style::default().fg(colors.dim()),
                    )),
                ]
            })
            .collect();
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" NOTIFICATIONS ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(area, buf);
    }
}

impl Widget for FacultyDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(5)])
            .split(area);

        self.render_tab_bar(layout[0], buf);
        match self.tab {
            0 => self.render_courses(layout[1], buf),
            1 => self.render_roster(layout[1], buf),
            _ => self.render_notifications(layout[1], buf),
        }
    }
}
