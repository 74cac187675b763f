use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // >=100 cols: main area + info sidebar
    Medium, // 64-99 cols: full-width main area
    Narrow, // <64 cols: full-width, trimmed chrome
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 100 {
            LayoutTier::Wide
        } else if area.width >= 64 {
            LayoutTier::Medium
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

/// Standard chrome: one-line header bar, main area (optionally split with a
/// sidebar), one-line footer for key hints.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                footer: vertical[2],
                tier,
            }
        } else {
            Self {
                header: vertical[0],
                main: vertical[1],
                sidebar: None,
                footer: vertical[2],
                tier,
            }
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 60;
    const MIN_POPUP_HEIGHT: u16 = 14;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

/// Docked rect for the chat widget: bottom-right, capped so some of the
/// underlying screen stays visible.
pub fn chat_overlay_rect(area: Rect) -> Rect {
    let width = (area.width * 2 / 5).clamp(36, 60).min(area.width);
    let height = (area.height * 3 / 5).clamp(12, 24).min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    )
}

/// Greedy word wrap used by the transcript and notes views; returns line
/// strings no wider than `width` chars (long words are hard-split).
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();
            if current.is_empty() {
                if word_len <= width {
                    current.push_str(word);
                } else {
                    // Hard-split an overlong word.
                    let mut rest: Vec<char> = word.chars().collect();
                    while rest.len() > width {
                        lines.push(rest[..width].iter().collect());
                        rest = rest[width..].to_vec();
                    }
                    current = rest.into_iter().collect();
                }
            } else if current_len + 1 + word_len <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                if word_len <= width {
                    current.push_str(word);
                } else {
                    let mut rest: Vec<char> = word.chars().collect();
                    while rest.len() > width {
                        lines.push(rest[..width].iter().collect());
                        rest = rest[width..].to_vec();
                    }
                    current = rest.into_iter().collect();
                }
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_breakpoints() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 40)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 80, 40)), LayoutTier::Medium);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 50, 40)), LayoutTier::Narrow);
    }

    #[test]
    fn sidebar_only_when_wide() {
        assert!(AppLayout::new(Rect::new(0, 0, 120, 40)).sidebar.is_some());
        assert!(AppLayout::new(Rect::new(0, 0, 80, 40)).sidebar.is_none());
    }

    #[test]
    fn chat_overlay_fits_inside_area() {
        let area = Rect::new(0, 0, 120, 40);
        let overlay = chat_overlay_rect(area);
        assert!(overlay.right() <= area.right());
        assert!(overlay.bottom() <= area.bottom());
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" ").split_whitespace().count(), 9);
    }

    #[test]
    fn wrap_text_hard_splits_long_words() {
        let lines = wrap_text("abcdefghijklmnop", 5);
        assert!(lines.iter().all(|l| l.chars().count() <= 5));
    }

    #[test]
    fn wrap_text_keeps_blank_lines() {
        let lines = wrap_text("a\n\nb", 10);
        assert_eq!(lines, vec!["a".to_string(), String::new(), "b".to_string()]);
    }
}
