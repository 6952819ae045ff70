use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::internal::theme::ThemeMode;

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFile {
    #[serde(default)]
    pub name: String,
    pub themes: Vec<ThemeVariant>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    #[serde(default)]
    pub name: String,
    pub mode: String, // "light" or "dark"
    pub colors: HashMap<String, String>,
}

/// Palette used by every view.
#[derive(Debug, Clone, PartialEq)]
pub struct TuiTheme {
    pub background: Color,
    pub foreground: Color,
    pub primary: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub border: Color,
    pub muted: Color,
    pub link: Color,
    pub error: Color,
    pub success: Color,
    pub skeleton: Color,
}

impl TuiTheme {
    /// Built-in palette for `mode`.
    pub fn builtin(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self {
                background: Color::Rgb(255, 255, 255),
                foreground: Color::Rgb(17, 24, 39),
                primary: Color::Rgb(30, 64, 175),
                selection_bg: Color::Rgb(219, 234, 254),
                selection_fg: Color::Rgb(30, 58, 138),
                border: Color::Rgb(209, 213, 219),
                muted: Color::Rgb(107, 114, 128),
                link: Color::Rgb(37, 99, 235),
                error: Color::Rgb(220, 38, 38),
                success: Color::Rgb(22, 163, 74),
                skeleton: Color::Rgb(229, 231, 235),
            },
            ThemeMode::Dark => Self {
                background: Color::Rgb(17, 24, 39),
                foreground: Color::Rgb(243, 244, 246),
                primary: Color::Rgb(96, 165, 250),
                selection_bg: Color::Rgb(30, 58, 138),
                selection_fg: Color::Rgb(239, 246, 255),
                border: Color::Rgb(55, 65, 81),
                muted: Color::Rgb(156, 163, 175),
                link: Color::Rgb(147, 197, 253),
                error: Color::Rgb(248, 113, 113),
                success: Color::Rgb(74, 222, 128),
                skeleton: Color::Rgb(55, 65, 81),
            },
        }
    }
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self::builtin(ThemeMode::Light)
    }
}

/// Load the `mode` variant of a JSON theme file. Keys missing from the file
/// keep the built-in color for that mode.
#[tracing::instrument(skip(path, mode), fields(path = ?path, mode = %mode))]
pub fn load_theme(path: &Path, mode: ThemeMode, enable_performance_metrics: bool) -> Result<TuiTheme> {
    let start = std::time::Instant::now();
    let content = fs::read_to_string(path).context("Failed to read theme file")?;
    let theme_file: ThemeFile =
        serde_json::from_str(&content).context("Failed to parse theme JSON")?;

    let variant = theme_file
        .themes
        .iter()
        .find(|t| t.mode.eq_ignore_ascii_case(mode.as_str()))
        .context("No matching theme variant found")?;

    let base = TuiTheme::builtin(mode);
    let pick = |keys: &[&str], fallback: Color| -> Color {
        keys.iter()
            .find_map(|k| variant.colors.get(*k))
            .map(|hex| parse_color(hex))
            .unwrap_or(fallback)
    };

    let theme = TuiTheme {
        background: pick(&["background"], base.background),
        foreground: pick(&["foreground"], base.foreground),
        primary: pick(&["primary", "primary.background"], base.primary),
        selection_bg: pick(
            &["selection.background", "list.active.background"],
            base.selection_bg,
        ),
        selection_fg: pick(&["selection.foreground"], base.selection_fg),
        border: pick(&["border"], base.border),
        muted: pick(&["muted.foreground", "muted"], base.muted),
        link: pick(&["link", "base.blue"], base.link),
        error: pick(&["error", "base.red"], base.error),
        success: pick(&["success", "base.green"], base.success),
        skeleton: pick(&["skeleton"], base.skeleton),
    };

    if enable_performance_metrics {
        tracing::debug!(elapsed = ?start.elapsed(), "Loaded theme");
    }

    Ok(theme)
}

fn parse_color(hex: &str) -> Color {
    if let Ok(c) = hex.parse::<Color>() {
        return c;
    }

    let hex = hex.trim_start_matches('#');
    match hex.len() {
        6 | 8 => {
            // 8-char hex carries alpha; only RGB is used.
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            Color::Rgb(r, g, b)
        }
        _ => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_palettes_differ() {
        assert_ne!(
            TuiTheme::builtin(ThemeMode::Light),
            TuiTheme::builtin(ThemeMode::Dark)
        );
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#00ff0080"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("red"), Color::Red);
        assert_eq!(parse_color("zz"), Color::Reset);
    }

    #[test]
    fn test_load_variant_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("genbi-theme-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("brand.json");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            r##"{{"name":"Brand","themes":[
                {{"name":"Brand Dark","mode":"dark","colors":{{"primary":"#112233"}}}},
                {{"name":"Brand Light","mode":"light","colors":{{"background":"#fafafa"}}}}
            ]}}"##
        )
        .unwrap();

        let dark = load_theme(&path, ThemeMode::Dark, false).unwrap();
        assert_eq!(dark.primary, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(dark.error, TuiTheme::builtin(ThemeMode::Dark).error);

        let light = load_theme(&path, ThemeMode::Light, false).unwrap();
        assert_eq!(light.background, Color::Rgb(0xfa, 0xfa, 0xfa));

        fs::remove_dir_all(&dir).ok();
    }
}
