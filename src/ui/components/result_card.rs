use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::QuizOutcome;
use crate::session::score::Mastery;
use crate::ui::theme::Theme;

/// Popup shown over the course screen after a quiz completes, until the
/// learner dismisses it.
pub struct ResultCard<'a> {
    pub outcome: &'a QuizOutcome,
    pub theme: &'a Theme,
}

impl<'a> ResultCard<'a> {
    pub fn new(outcome: &'a QuizOutcome, theme: &'a Theme) -> Self {
        Self { outcome, theme }
    }
}

impl Widget for ResultCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = &self.outcome.result;

        let block = Block::bordered()
            .title(" ASSESSMENT COMPLETE ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            self.outcome.topic.clone(),
            Style::default()
                .fg(colors.accent_alt())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  Score:   ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}/{}", result.score, result.total),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[1], buf);

        let mastery_color = match result.mastery {
            Mastery::Advanced => colors.success(),
            Mastery::Intermediate => colors.warning(),
            Mastery::Beginner => colors.error(),
        };
        Paragraph::new(Line::from(vec![
            Span::styled("  Mastery: ", Style::default().fg(colors.fg())),
            Span::styled(
                result.mastery.as_str(),
                Style::default().fg(mastery_color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  XP Awarded: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("+{}", result.xp_awarded()),
                Style::default().fg(colors.accent_alt()),
            ),
        ]))
        .render(layout[3], buf);

        Paragraph::new(Line::from(Span::styled(
            " [Enter/Esc] Dismiss",
            Style::default().fg(colors.accent()),
        )))
        .render(layout[5], buf);
    }
}
