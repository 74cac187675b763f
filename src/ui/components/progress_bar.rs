use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// One-line labeled meter; used for course progress, boot sequence,
/// attendance and skill levels.
pub struct Meter<'a> {
    pub label: String,
    pub ratio: f64,
    pub fill: Option<Color>,
    pub bordered: bool,
    pub theme: &'a Theme,
}

impl<'a> Meter<'a> {
    pub fn new(label: &str, ratio: f64, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            ratio: ratio.clamp(0.0, 1.0),
            fill: None,
            bordered: true,
            theme,
        }
    }

    /// Override the fill color (risk coloring on roster rows).
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn inline(mut self) -> Self {
        self.bordered = false;
        self
    }
}

impl Widget for Meter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let inner = if self.bordered {
            let block = Block::bordered()
                .title(format!(" {} ", self.label))
                .border_style(Style::default().fg(colors.border()));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let fill = self.fill.unwrap_or_else(|| colors.bar_filled());
        let filled_width = (self.ratio * f64::from(inner.width)) as u16;
        let label = format!("{:.0}%", self.ratio * 100.0);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
