use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Catalog;
use crate::catalog::user::User;
use crate::ui::components::progress_bar::Meter;
use crate::ui::theme::Theme;

/// Student home: enrolled course list plus (when there is room) tasks,
/// attendance and the leaderboard.
pub struct StudentDashboard<'a> {
    pub user: &'a User,
    pub catalog: &'a Catalog,
    pub cursor: usize,
    pub sidebar: Option<Rect>,
    pub theme: &'a Theme,
}

impl<'a> StudentDashboard<'a> {
    pub fn new(
        user: &'a User,
        catalog: &'a Catalog,
        cursor: usize,
        sidebar: Option<Rect>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            user,
            catalog,
            cursor,
            sidebar,
            theme,
        }
    }

    fn render_courses(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let class_line = self
            .user
            .class_name
            .as_deref()
            .unwrap_or("Unassigned cohort");
        let block = Block::bordered()
            .title(format!(" ENROLLED COURSES \u{2014} {class_line} "))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.catalog
                    .courses()
                    .iter()
                    .map(|_| Constraint::Length(4))
                    .chain([Constraint::Min(0)])
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, course) in self.catalog.courses().iter().enumerate() {
            let selected = i == self.cursor;
            let indicator = if selected { ">" } else { " " };
            let title_style = Style::default()
                .fg(if selected { colors.accent() } else { colors.fg() })
                .add_modifier(if selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let row = rows[i];
            if row.height == 0 {
                continue;
            }

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!(" {indicator} {}  ", course.code), title_style),
                    Span::styled(course.title.clone(), title_style),
                ]),
                Line::from(Span::styled(
                    format!(
                        "     {} | {} units | {}",
                        course.instructor,
                        course.units.len(),
                        course.tags.join(", ")
                    ),
                    Style::default().fg(colors.dim()),
                )),
            ];
            Paragraph::new(lines).render(row, buf);

            if row.height >= 4 {
                let bar_area = Rect::new(row.x + 5, row.y + 2, row.width.saturating_sub(7), 1);
                Meter::new("", course.progress_ratio(), self.theme)
                    .inline()
                    .render(bar_area, buf);
            }
        }
    }

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.catalog.tasks.len() as u16 + 2),
                Constraint::Length(3),
                Constraint::Min(5),
            ])
            .split(area);

        let task_lines: Vec<Line> = self
            .catalog
            .tasks
            .iter()
            .map(|t| {
                Line::from(vec![
                    Span::styled(format!(" {} ", t.due), Style::default().fg(colors.warning())),
                    Span::styled(t.title.clone(), Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        let tasks = Paragraph::new(task_lines).block(
            Block::bordered()
                .title(" PENDING TASKS ")
                .border_style(Style::default().fg(colors.border())),
        );
        tasks.render(sections[0], buf);

        let attendance = self
            .catalog
            .attendance
            .last()
            .map(|p| f64::from(p.percent) / 100.0)
            .unwrap_or(0.0);
        let attendance_color = if attendance < 0.6 {
            colors.error()
        } else if attendance < 0.75 {
            colors.warning()
        } else {
            colors.success()
        };
        Meter::new("Attendance", attendance, self.theme)
            .fill(attendance_color)
            .render(sections[1], buf);

        let board_lines: Vec<Line> = self
            .catalog
            .leaderboard
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!(" #{} ", entry.rank),
                        Style::default().fg(colors.accent_alt()),
                    ),
                    Span::styled(entry.name.clone(), Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("  L{}", entry.level),
                        Style::default().fg(colors.dim()),
                    ),
                ])
            })
            .collect();
        let board = Paragraph::new(board_lines).block(
            Block::bordered()
                .title(" TOP AGENTS ")
                .border_style(Style::default().fg(colors.border())),
        );
        board.render(sections[2], buf);
    }
}

impl Widget for StudentDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_courses(area, buf);
        if let Some(sidebar) = self.sidebar {
            self.render_sidebar(sidebar, buf);
        }
    }
}
