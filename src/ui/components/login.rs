use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::{LoginField, LoginForm};
use crate::ui::components::progress_bar::Meter;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct LoginScreen<'a> {
    pub form: &'a LoginForm,
    pub theme: &'a Theme,
}

impl<'a> LoginScreen<'a> {
    pub fn new(form: &'a LoginForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }

    fn field_line(&self, label: &str, input: &LineInput, focused: bool, masked: bool) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let indicator = if focused { " > " } else { "   " };
        let label_style = Style::default()
            .fg(if focused { colors.accent() } else { colors.dim() })
            .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() });

        let shown = if masked {
            "\u{2022}".repeat(input.value().chars().count())
        } else {
            input.value().to_string()
        };
        let cursor = if focused { "_" } else { "" };

        vec![
            Line::from(Span::styled(format!("{indicator}{label}"), label_style)),
            Line::from(vec![
                Span::styled("     ".to_string(), Style::default()),
                Span::styled(shown, Style::default().fg(colors.fg())),
                Span::styled(cursor.to_string(), Style::default().fg(colors.accent())),
            ]),
        ]
    }
}

impl Widget for LoginScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" SECURE NEURAL GATEWAY ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "FASN.SYS",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Campus Portal Terminal v2.1",
                Style::default().fg(colors.accent_alt()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let boot_ratio = f64::from(self.form.boot) / 100.0;
        Meter::new("Establishing Handshake", boot_ratio, self.theme).render(layout[1], buf);

        if self.form.ready() {
            let mut lines = self.field_line(
                "NEURAL IDENTITY (ID)",
                &self.form.identity,
                self.form.field == LoginField::Identity,
                false,
            );
            lines.extend(self.field_line(
                "ACCESS KEY",
                &self.form.access_key,
                self.form.field == LoginField::AccessKey,
                true,
            ));
            Paragraph::new(lines).render(layout[2], buf);

            let hint = Paragraph::new(Line::from(Span::styled(
                "Ready for access. Credentials pre-verified for demo.",
                Style::default().fg(colors.dim()),
            )))
            .alignment(Alignment::Center);
            hint.render(layout[3], buf);

            let footer = Paragraph::new(Line::from(vec![
                Span::styled(
                    " [Enter] Student Protocol  ",
                    Style::default().fg(colors.accent()),
                ),
                Span::styled("[F2] Faculty Override  ", Style::default().fg(colors.accent_alt())),
                Span::styled("[Tab] Field  ", Style::default().fg(colors.dim())),
                Span::styled("[Esc] Quit", Style::default().fg(colors.dim())),
            ]));
            footer.render(layout[4], buf);
        } else {
            let waiting = Paragraph::new(Line::from(Span::styled(
                "DECRYPTING SECURE KEYS...",
                Style::default().fg(colors.accent()),
            )))
            .alignment(Alignment::Center);
            waiting.render(layout[2], buf);
        }
    }
}
