use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::{QuizForm, QuizPhase, QuizSession};
use crate::ui::layout::wrap_text;
use crate::ui::theme::Theme;

/// Quiz overlay; while a session is live this supersedes whatever screen
/// launched it.
pub struct QuizView<'a> {
    pub session: &'a QuizSession,
    pub theme: &'a Theme,
}

impl<'a> QuizView<'a> {
    pub fn new(session: &'a QuizSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    fn render_centered_message(&self, text: &str, color: ratatui::style::Color, area: Rect, buf: &mut Buffer) {
        let message = Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        let y = area.y + area.height / 2;
        message.render(Rect::new(area.x, y, area.width, 1), buf);
    }

    fn render_form(&self, form: &QuizForm, submitted: bool, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let question = form.question();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(form.question().options.len() as u16 * 2),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(area);

        let progress = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" ASSESSMENT: {}", self.session.topic),
                Style::default()
                    .fg(colors.accent_alt())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   Q{} / {}", form.current + 1, form.total()),
                Style::default().fg(colors.dim()),
            ),
        ]));
        progress.render(layout[0], buf);

        let width = layout[1].width.saturating_sub(2) as usize;
        let prompt_lines: Vec<Line> = wrap_text(&question.question, width.max(1))
            .into_iter()
            .map(|l| Line::from(Span::styled(format!(" {l}"), Style::default().fg(colors.fg()))))
            .collect();
        Paragraph::new(prompt_lines).render(layout[1], buf);

        let option_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                question
                    .options
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        let selected_answer = form.answer_for(form.current);
        for (i, option) in question.options.iter().enumerate() {
            if option_rows[i].height == 0 {
                continue;
            }
            let is_selected = selected_answer == Some(option.as_str());
            let is_correct = submitted && *option == question.correct_answer;
            let is_wrong = submitted && is_selected && *option != question.correct_answer;

            let style = if is_correct {
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD)
            } else if is_wrong {
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let letter = (b'A' + (i % 26) as u8) as char;
            let marker = if is_selected { ">" } else { " " };
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {marker} [{letter}] "), Style::default().fg(colors.dim())),
                Span::styled(option.clone(), style),
            ]))
            .render(option_rows[i], buf);
        }

        if submitted {
            let reveal = Paragraph::new(Line::from(vec![
                Span::styled(" CORRECT ANSWER: ", Style::default().fg(colors.dim())),
                Span::styled(
                    question.correct_answer.clone(),
                    Style::default().fg(colors.success()),
                ),
            ]));
            reveal.render(layout[3], buf);
        }

        let hints = if submitted {
            " [Enter] Complete & Sync  [h/Left] Previous  [Esc] Abort"
        } else if form.is_last() && form.current_answered() {
            " [Enter] Submit Evaluation  [a-d] Select  [h/Left] Previous  [Esc] Abort"
        } else {
            " [a-d] Select  [l/Right] Next  [h/Left] Previous  [Esc] Abort"
        };
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(colors.accent()),
        )))
        .render(layout[4], buf);
    }
}

impl Widget for QuizView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" COMBAT SIMULATION ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        match self.session.phase() {
            QuizPhase::Loading => {
                self.render_centered_message(
                    "GENERATING ASSESSMENT PROTOCOL...",
                    colors.accent(),
                    inner,
                    buf,
                );
            }
            QuizPhase::Failed => {
                let y = inner.y + inner.height / 2;
                self.render_centered_message(
                    "Failed to load simulation. Neural link severed.",
                    colors.error(),
                    Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2)),
                    buf,
                );
                Paragraph::new(Line::from(Span::styled(
                    "[Esc] Return",
                    Style::default().fg(colors.accent()),
                )))
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, (y + 2).min(inner.bottom().saturating_sub(1)), inner.width, 1), buf);
            }
            QuizPhase::Ready(form) => self.render_form(form, false, inner, buf),
            QuizPhase::Submitted(form) => self.render_form(form, true, inner, buf),
            QuizPhase::Finished(_) => {
                // Transient: the app pops the session in the same event that
                // finishes it, so there is nothing to draw here.
            }
        }
    }
}
