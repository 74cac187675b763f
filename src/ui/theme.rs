use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub dim: String,
    pub accent: String,
    pub accent_alt: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub user_msg: String,
    pub model_msg: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes dir wins over bundled themes of the same name.
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("fasn")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("cyber-night").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#05070d".to_string(),
            fg: "#c8d3e0".to_string(),
            dim: "#4b5563".to_string(),
            accent: "#06b6d4".to_string(),
            accent_alt: "#d946ef".to_string(),
            border: "#374151".to_string(),
            border_focused: "#06b6d4".to_string(),
            header_bg: "#0b1120".to_string(),
            header_fg: "#e5e7eb".to_string(),
            bar_filled: "#06b6d4".to_string(),
            bar_empty: "#1f2937".to_string(),
            success: "#22c55e".to_string(),
            warning: "#eab308".to_string(),
            error: "#ef4444".to_string(),
            user_msg: "#67e8f9".to_string(),
            model_msg: "#d1d5db".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn dim(&self) -> Color { Self::parse_color(&self.dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn accent_alt(&self) -> Color { Self::parse_color(&self.accent_alt) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn user_msg(&self) -> Color { Self::parse_color(&self.user_msg) }
    pub fn model_msg(&self) -> Color { Self::parse_color(&self.model_msg) }
}
