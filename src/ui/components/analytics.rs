use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, GraphType, Widget};

use crate::catalog::analytics::AnalyticsData;
use crate::ui::components::progress_bar::Meter;
use crate::ui::theme::Theme;

/// Performance screen over the mock series: per-course scores, weekly XP
/// trend, and subject mastery meters.
pub struct AnalyticsView<'a> {
    pub data: &'a AnalyticsData,
    pub theme: &'a Theme,
}

impl<'a> AnalyticsView<'a> {
    pub fn new(data: &'a AnalyticsData, theme: &'a Theme) -> Self {
        Self { data, theme }
    }

    fn render_performance(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let bars: Vec<Bar> = self
            .data
            .performance
            .iter()
            .map(|p| {
                Bar::default()
                    .label(p.name.clone())
                    .value(u64::from(p.score))
                    .style(Style::default().fg(colors.accent()))
                    .value_style(Style::default().fg(colors.bg()).bg(colors.accent()))
            })
            .collect();

        let chart = BarChart::default()
            .block(
                Block::bordered()
                    .title(" PERFORMANCE MATRIX ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(7)
            .bar_gap(2);
        chart.render(area, buf);
    }

    fn render_weekly_xp(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        if self.data.weekly_xp.is_empty() {
            Block::bordered()
                .title(" XP FLOW ")
                .border_style(Style::default().fg(colors.border()))
                .render(area, buf);
            return;
        }

        let points: Vec<(f64, f64)> = self
            .data
            .weekly_xp
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, f64::from(p.xp)))
            .collect();
        let max_y = points.iter().map(|(_, y)| *y).fold(0.0f64, f64::max).max(10.0);

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors.warning()))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(
                Block::bordered()
                    .title(" XP FLOW (7 DAYS) ")
                    .border_style(Style::default().fg(colors.border())),
            )
            .x_axis(
                Axis::default()
                    .title("Day")
                    .style(Style::default().fg(colors.dim()))
                    .bounds([0.0, (points.len() - 1).max(1) as f64]),
            )
            .y_axis(
                Axis::default()
                    .title("XP")
                    .style(Style::default().fg(colors.dim()))
                    .bounds([0.0, max_y * 1.1]),
            );
        chart.render(area, buf);
    }

    fn render_skills(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" NEURAL SKILL MAP ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.data
                    .skills
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .chain([Constraint::Min(0)])
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (i, skill) in self.data.skills.iter().enumerate() {
            let row = rows[i];
            if row.height == 0 || row.width < 16 {
                continue;
            }
            let label_width = 14u16;
            buf.set_string(
                row.x + 1,
                row.y,
                format!("{:<12}", skill.subject),
                Style::default().fg(colors.fg()),
            );
            let bar_area = Rect::new(
                row.x + label_width,
                row.y,
                row.width.saturating_sub(label_width + 1),
                1,
            );
            Meter::new("", f64::from(skill.level) / 100.0, self.theme)
                .inline()
                .render(bar_area, buf);
        }
    }
}

impl Widget for AnalyticsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
            ])
            .split(area);

        self.render_performance(layout[0], buf);
        self.render_weekly_xp(layout[1], buf);
        self.render_skills(layout[2], buf);
    }
}
