use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::chat::ChatPanel;
use crate::genai::TurnRole;
use crate::ui::layout::wrap_text;
use crate::ui::theme::Theme;

/// Docked tutor chat widget drawn over the current screen.
pub struct ChatPanelView<'a> {
    pub chat: &'a ChatPanel,
    pub theme: &'a Theme,
}

impl<'a> ChatPanelView<'a> {
    pub fn new(chat: &'a ChatPanel, theme: &'a Theme) -> Self {
        Self { chat, theme }
    }
}

impl Widget for ChatPanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" NETRUNNER AI ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        // Transcript, newest at the bottom; render as many trailing lines as
        // fit the panel.
        let width = layout[0].width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = Vec::new();
        for message in &self.chat.messages {
            let (prefix, style) = match message.role {
                TurnRole::User => ("you ", Style::default().fg(colors.user_msg())),
                TurnRole::Model => ("fasn", Style::default().fg(colors.model_msg())),
            };
            let stamp = message.timestamp.format("%H:%M");
            lines.push(Line::from(Span::styled(
                format!(" {prefix} {stamp}"),
                Style::default().fg(colors.dim()).add_modifier(Modifier::BOLD),
            )));
            for wrapped in wrap_text(&message.text, width.max(1)) {
                lines.push(Line::from(Span::styled(format!("  {wrapped}"), style)));
            }
        }
        if self.chat.is_pending() {
            lines.push(Line::from(Span::styled(
                " fasn is processing...",
                Style::default().fg(colors.dim()),
            )));
        }

        let visible = layout[0].height as usize;
        let start = lines.len().saturating_sub(visible);
        Paragraph::new(lines[start..].to_vec()).render(layout[0], buf);

        // Input line; send is disabled (and flagged) while a reply is
        // outstanding.
        let (before, at_cursor, after) = self.chat.input.render_parts();
        let mut spans = vec![Span::styled(" > ", Style::default().fg(colors.accent()))];
        if self.chat.is_pending() {
            spans.push(Span::styled(
                "awaiting reply...",
                Style::default().fg(colors.dim()),
            ));
        } else {
            spans.push(Span::styled(
                before.to_string(),
                Style::default().fg(colors.fg()),
            ));
            match at_cursor {
                Some(ch) => spans.push(Span::styled(
                    ch.to_string(),
                    Style::default().fg(colors.bg()).bg(colors.accent()),
                )),
                None => spans.push(Span::styled(
                    " ",
                    Style::default().bg(colors.accent()),
                )),
            }
            spans.push(Span::styled(
                after.to_string(),
                Style::default().fg(colors.fg()),
            ));
        }
        Paragraph::new(Line::from(spans)).render(layout[1], buf);
    }
}
