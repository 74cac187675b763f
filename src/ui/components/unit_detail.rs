use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::course::Unit;
use crate::ui::layout::wrap_text;
use crate::ui::theme::Theme;

pub struct UnitDetail<'a> {
    pub unit: &'a Unit,
    pub theme: &'a Theme,
}

impl<'a> UnitDetail<'a> {
    pub fn new(unit: &'a Unit, theme: &'a Theme) -> Self {
        Self { unit, theme }
    }
}

impl Widget for UnitDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(area);

        let status = if self.unit.completed {
            Span::styled("VERIFIED", Style::default().fg(colors.success()))
        } else {
            Span::styled("PENDING ASSESSMENT", Style::default().fg(colors.warning()))
        };
        let header_lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.unit.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!(" {} | LESSON FEED: {} | ", self.unit.description, self.unit.video_url),
                    Style::default().fg(colors.dim()),
                ),
                status,
            ]),
        ];
        Paragraph::new(header_lines).render(layout[0], buf);

        let block = Block::bordered()
            .title(" DECRYPTED NOTES ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(layout[1]);
        block.render(layout[1], buf);

        let width = inner.width.saturating_sub(2) as usize;
        let mut note_lines: Vec<Line> = wrap_text(&self.unit.notes, width.max(1))
            .into_iter()
            .map(|l| Line::from(Span::styled(format!(" {l}"), Style::default().fg(colors.success()))))
            .collect();
        note_lines.push(Line::from(""));
        note_lines.push(Line::from(Span::styled(
            " [End of file. Neural sync complete.]",
            Style::default().fg(colors.dim()),
        )));
        Paragraph::new(note_lines).render(inner, buf);

        let action_lines = vec![
            Line::from(Span::styled(
                " ASSESSMENT REQUIRED",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Verification required to mark this unit complete.",
                Style::default().fg(colors.dim()),
            )),
        ];
        Paragraph::new(action_lines)
            .block(Block::bordered().border_style(Style::default().fg(colors.warning())))
            .render(layout[2], buf);
    }
}
