use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use xdg::BaseDirectories;

use crate::calendar::CalendarLabels;
use crate::formatting::BoxChars;
use crate::tui::press::PressTiming;

/// Why a configuration file was not applied
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub press: PressConfig,
    pub labels: LabelsConfig,
    pub theme: ThemeConfig,
}

/// Press-and-hold timing for the header arrows
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PressConfig {
    pub initial_delay_ms: u64,
    pub repeat_interval_ms: u64,
}

/// Weekday (Sunday first) and month names
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LabelsConfig {
    pub weekdays: Vec<String>,
    pub months: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub use_unicode: bool,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub today_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub outside_month_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub pressed_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            press: PressConfig::default(),
            labels: LabelsConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for PressConfig {
    fn default() -> Self {
        let timing = PressTiming::default();
        PressConfig {
            initial_delay_ms: timing.initial_delay.as_millis() as u64,
            repeat_interval_ms: timing.repeat_interval.as_millis() as u64,
        }
    }
}

impl PressConfig {
    pub fn timing(&self) -> PressTiming {
        PressTiming {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            repeat_interval: Duration::from_millis(self.repeat_interval_ms),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        let labels = CalendarLabels::default();
        LabelsConfig {
            weekdays: labels.weekdays().to_vec(),
            months: labels.months().to_vec(),
        }
    }
}

impl LabelsConfig {
    /// Validated labels, falling back to the defaults on a bad list
    pub fn calendar_labels(&self) -> CalendarLabels {
        CalendarLabels::from_lists(&self.weekdays, &self.months).unwrap_or_else(|e| {
            warn!("Ignoring configured labels: {}", e);
            CalendarLabels::default()
        })
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            use_unicode: true,
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            today_fg: Color::Cyan,
            outside_month_fg: Color::DarkGray,
            pressed_fg: None,
        }
    }
}

impl ThemeConfig {
    pub fn box_chars(&self) -> BoxChars {
        BoxChars::from_use_unicode(self.use_unicode)
    }

    /// Colour of a held arrow, 50% darker than the selection colour unless set
    pub fn pressed_fg(&self) -> Color {
        self.pressed_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        other => other,
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Deserialize an optional color from a string
fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "lightred" => return Some(Color::LightRed),
        "lightgreen" => return Some(Color::LightGreen),
        "lightyellow" => return Some(Color::LightYellow),
        "lightblue" => return Some(Color::LightBlue),
        "lightmagenta" => return Some(Color::LightMagenta),
        "lightcyan" => return Some(Color::LightCyan),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => Some(Color::Rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() == 3 {
        let r = parts[0].trim().parse::<u8>().ok()?;
        let g = parts[1].trim().parse::<u8>().ok()?;
        let b = parts[2].trim().parse::<u8>().ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn parse(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config file; a missing file yields the defaults
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Load the user's config file
///
/// Errors are returned next to the defaults so the caller can report them
/// once logging is set up.
pub fn read() -> (Config, Option<ConfigError>) {
    let result = match get_config_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("Cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("darkgrey"), Some(Color::DarkGray));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("#ffff"), None);
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("#éé"), None);
    }

    #[test]
    fn test_pressed_fg_defaults_to_darker_selection() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.pressed_fg(), Color::Rgb(127, 82, 0));

        let theme = ThemeConfig {
            pressed_fg: Some(Color::Red),
            ..ThemeConfig::default()
        };
        assert_eq!(theme.pressed_fg(), Color::Red);
    }

    #[test]
    fn test_default_press_timing() {
        let config = Config::default();
        assert_eq!(config.press.timing(), PressTiming::default());
    }

    #[test]
    fn test_config_from_toml() {
        let config = parse(
            r##"
log_level = "debug"

[press]
initial_delay_ms = 300
repeat_interval_ms = 50

[labels]
weekdays = ["Do", "Lu", "Ma", "Mi", "Ju", "Vi", "Sá"]
months = ["enero", "febrero", "marzo", "abril", "mayo", "junio", "julio",
          "agosto", "septiembre", "octubre", "noviembre", "diciembre"]

[theme]
use_unicode = false
selection_fg = "#00FFFF"
today_fg = "magenta"
"##,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, "/dev/null");
        assert_eq!(config.press.timing().initial_delay, Duration::from_millis(300));
        assert_eq!(config.press.timing().repeat_interval, Duration::from_millis(50));
        assert_eq!(config.labels.calendar_labels().month_name(2), "febrero");
        assert_eq!(config.theme.selection_fg, Color::Rgb(0, 255, 255));
        assert_eq!(config.theme.today_fg, Color::Magenta);
        assert_eq!(config.theme.outside_month_fg, Color::DarkGray);
        assert_eq!(config.theme.box_chars(), BoxChars::ascii());
    }

    #[test]
    fn test_bad_label_lists_fall_back_to_defaults() {
        let config = parse(
            r#"
[labels]
weekdays = ["S", "M"]
"#,
        )
        .unwrap();

        assert_eq!(config.labels.calendar_labels(), CalendarLabels::default());
    }

    #[test]
    fn test_malformed_config_is_reported() {
        assert!(matches!(parse("log_level = ["), Err(ConfigError::Parse(_))));

        let err = parse("[theme]\nselection_fg = \"not-a-color\"").unwrap_err();
        assert!(err.to_string().contains("Invalid color: not-a-color"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("calpick-no-such-dir").join("config.toml");
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_unreadable_file_is_reported() {
        // A directory exists but cannot be read as a file
        let path = std::env::temp_dir();
        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().starts_with("Failed to read "));
    }
}
