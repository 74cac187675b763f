use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::course::Course;
use crate::ui::theme::Theme;

pub struct CourseDetail<'a> {
    pub course: &'a Course,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl<'a> CourseDetail<'a> {
    pub fn new(course: &'a Course, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            course,
            cursor,
            theme,
        }
    }
}

impl Widget for CourseDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(4)])
            .split(area);

        let header_lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.course.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    " {} | INSTRUCTOR: {}",
                    self.course.code,
                    self.course.instructor.to_uppercase()
                ),
                Style::default().fg(colors.accent_alt()),
            )),
        ];
        Paragraph::new(header_lines).render(layout[0], buf);

        let block = Block::bordered()
            .title(format!(
                " LEARNING MODULES \u{2014} {} UNITS LOADED ",
                self.course.units.len()
            ))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(layout[1]);
        block.render(layout[1], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.course
                    .units
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .chain([Constraint::Min(0)])
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, unit) in self.course.units.iter().enumerate() {
            let row = rows[i];
            if row.height == 0 {
                continue;
            }
            let selected = i == self.cursor;
            let indicator = if selected { ">" } else { " " };
            let marker = if unit.completed { "[x]" } else { "[ ]" };
            let marker_style = Style::default().fg(if unit.completed {
                colors.success()
            } else {
                colors.dim()
            });
            let title_style = Style::default()
                .fg(if selected { colors.accent() } else { colors.fg() })
                .add_modifier(if selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!(" {indicator} "), title_style),
                    Span::styled(format!("{marker} "), marker_style),
                    Span::styled(unit.title.clone(), title_style),
                ]),
                Line::from(Span::styled(
                    format!("       {}", unit.description),
                    Style::default().fg(colors.dim()),
                )),
            ];
            Paragraph::new(lines).render(row, buf);
        }

        let sim_lines = vec![
            Line::from(Span::styled(
                " COMBAT SIMULATION",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Global adaptive assessment over the course scope.",
                Style::default().fg(colors.dim()),
            )),
        ];
        Paragraph::new(sim_lines)
            .block(
                Block::bordered().border_style(Style::default().fg(colors.warning())),
            )
            .render(layout[2], buf);
    }
}
