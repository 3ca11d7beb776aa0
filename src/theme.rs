use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub selected: Style,
    pub today: Style,
    pub badge: Style,
    pub clock: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            today: Style::default().fg(Color::Black).bg(Color::Yellow),
            badge: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            clock: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dusk" => Self::dusk(),
            "mono" => Self::mono(),
            _ => Self::default(),
        }
    }

    fn dusk() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Rgb(222, 222, 244))
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(100, 108, 140)),
            border: Style::default().fg(Color::Rgb(70, 76, 104)),
            status: Style::default()
                .fg(Color::Rgb(222, 222, 244))
                .bg(Color::Rgb(52, 58, 84)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(130, 200, 230)),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 188, 100)),
            badge: Style::default()
                .fg(Color::Rgb(240, 110, 200))
                .add_modifier(Modifier::BOLD),
            clock: Style::default()
                .fg(Color::Rgb(140, 230, 160))
                .add_modifier(Modifier::BOLD),
        }
    }

    fn mono() -> Self {
        Self {
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::DarkGray),
            status: Style::default().fg(Color::Black).bg(Color::Gray),
            selected: Style::default().fg(Color::Black).bg(Color::White),
            today: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            badge: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            clock: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dday-tui").join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    today_fg: Option<String>,
    today_bg: Option<String>,
    badge_fg: Option<String>,
    clock_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.today_fg.as_deref().and_then(parse_color) {
            theme.today = theme.today.fg(c);
        }
        if let Some(c) = self.today_bg.as_deref().and_then(parse_color) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = self.badge_fg.as_deref().and_then(parse_color) {
            theme.badge = theme.badge.fg(c);
        }
        if let Some(c) = self.clock_fg.as_deref().and_then(parse_color) {
            theme.clock = theme.clock.fg(c);
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff30cd"), Some(Color::Rgb(0xff, 0x30, 0xcd)));
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn preset_with_override() {
        let config: ThemeConfig =
            toml::from_str("preset = \"mono\"\nbadge_fg = \"magenta\"").expect("valid toml");
        let theme = config.into_theme();
        assert_eq!(theme.badge.fg, Some(Color::Magenta));
        assert_eq!(theme.status.bg, Theme::mono().status.bg);
    }
}
