use std::{
    env,
    ffi::OsString,
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Config file used when neither `-file` nor `MENU_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable consulted for the config path when `-file` is absent.
pub const CONFIG_ENV: &str = "MENU_CONFIG";

/// Hard cap on menu entries. Menus above it are refused, never truncated.
pub const MAX_ITEMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub title: Title,

    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub label: String,

    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,

    #[serde(default)]
    pub color: Color,

    /// Handed verbatim to the shell, so pipes and redirects work.
    pub command: String,
}

/// Display color of a title or item.
///
/// Names outside the eight terminal colors are kept as `Default(name)` so a
/// config survives a load/save cycle unchanged; they render uncolored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Default(String),
}

impl Color {
    pub const NAMED: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    pub fn name(&self) -> &str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::Default(raw) => raw,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Default(String::new())
    }
}

impl From<String> for Color {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            _ => Color::Default(raw),
        }
    }
}

impl From<&str> for Color {
    fn from(raw: &str) -> Self {
        Color::from(raw.to_string())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        match color {
            Color::Default(raw) => raw,
            named => named.name().to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize menu: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Maximum limit of {max} menu items exceeded ({count} configured).")]
pub struct TooManyItems {
    pub count: usize,
    pub max: usize,
}

impl Menu {
    pub fn ensure_within_limit(&self) -> Result<(), TooManyItems> {
        if self.items.len() > MAX_ITEMS {
            return Err(TooManyItems {
                count: self.items.len(),
                max: MAX_ITEMS,
            });
        }
        Ok(())
    }
}

/// Picks the config path: explicit flag, then `MENU_CONFIG`, then `config.json`.
pub fn resolve_config_path(flag: Option<&Path>) -> PathBuf {
    resolve_config_path_with(flag, env::var_os(CONFIG_ENV))
}

pub fn resolve_config_path_with(flag: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }

    if let Some(p) = env_value {
        if !p.to_string_lossy().trim().is_empty() {
            return PathBuf::from(p);
        }
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}

pub fn load(path: &Path) -> Result<Menu, ConfigError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let menu: Menu = serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "loaded menu '{}' with {} item(s) from {}",
        menu.title.label,
        menu.items.len(),
        path.display()
    );
    Ok(menu)
}

/// Writes `menu` as pretty JSON, replacing whatever is at `path`.
pub fn save(path: &Path, menu: &Menu) -> Result<(), ConfigError> {
    let mut s = serde_json::to_string_pretty(menu).map_err(ConfigError::Serialize)?;
    s.push('\n');
    fs::write(path, s.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn example_menu() -> Menu {
    Menu {
        title: Title {
            label: "My Menu".to_string(),
            color: Color::Blue,
        },
        items: vec![MenuItem {
            label: "Option 1".to_string(),
            color: Color::Green,
            command: "ls -lha".to_string(),
        }],
    }
}

/// Overwrites `path` with the example menu, reporting each step to `out`.
pub fn create_example<W: Write>(path: &Path, out: &mut W) -> anyhow::Result<()> {
    let menu = example_menu();
    writeln!(
        out,
        "example menu: '{}' ({}) with {} item(s)",
        menu.title.label,
        menu.title.color,
        menu.items.len()
    )?;
    writeln!(out, "writing example config to {}", path.display())?;

    if let Err(err) = save(path, &menu) {
        warn!("creating example config failed: {err}");
        writeln!(out, "Error writing example config: {err}")?;
        return Err(err).with_context(|| format!("create example config {}", path.display()));
    }

    info!("wrote example config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{"title":{"label":"My Menu","color":"blue"},"items":[{"label":"Option 1","command":"echo hi","color":"green"}]}"#;

    fn menu_with(count: usize) -> Menu {
        Menu {
            title: Title {
                label: "t".to_string(),
                color: Color::default(),
            },
            items: (0..count)
                .map(|i| MenuItem {
                    label: format!("item {i}"),
                    color: Color::default(),
                    command: format!("echo {i}"),
                })
                .collect(),
        }
    }

    #[test]
    fn parses_documented_example() {
        let menu: Menu = serde_json::from_str(SCENARIO).unwrap();
        assert_eq!(menu.title.label, "My Menu");
        assert_eq!(menu.title.color, Color::Blue);
        assert_eq!(menu.items.len(), 1);
        assert_eq!(menu.items[0].label, "Option 1");
        assert_eq!(menu.items[0].command, "echo hi");
        assert_eq!(menu.items[0].color, Color::Green);
    }

    #[test]
    fn unknown_color_is_kept_verbatim() {
        let menu: Menu = serde_json::from_str(
            r#"{"title":{"label":"x","color":"purplish"},"items":[]}"#,
        )
        .unwrap();
        assert_eq!(menu.title.color, Color::Default("purplish".to_string()));

        let back = serde_json::to_value(&menu).unwrap();
        assert_eq!(back["title"]["color"], "purplish");
    }

    #[test]
    fn missing_color_and_items_default() {
        let menu: Menu = serde_json::from_str(r#"{"title":{"label":"x"}}"#).unwrap();
        assert_eq!(menu.title.color, Color::default());
        assert!(menu.items.is_empty());
    }

    #[test]
    fn color_names_round_trip() {
        for color in Color::NAMED {
            assert_eq!(Color::from(color.name()), color);
        }
    }

    #[test]
    fn example_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        save(&path, &example_menu()).unwrap();
        assert_eq!(load(&path).unwrap(), example_menu());
    }

    #[test]
    fn create_example_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(&path, "not json at all").unwrap();

        let mut out = Vec::new();
        create_example(&path, &mut out).unwrap();

        assert_eq!(load(&path).unwrap(), example_menu());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("writing example config to"));
        assert!(printed.contains("menu.json"));
    }

    #[test]
    fn create_example_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("config.json");

        let mut out = Vec::new();
        assert!(create_example(&path, &mut out).is_err());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Error writing example config"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"title": {"label": 3}}"#).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn item_limit_allows_up_to_ten() {
        for count in 0..=MAX_ITEMS {
            assert!(menu_with(count).ensure_within_limit().is_ok(), "{count}");
        }
        assert_eq!(
            menu_with(11).ensure_within_limit(),
            Err(TooManyItems { count: 11, max: 10 })
        );
    }

    #[test]
    fn config_path_precedence() {
        let flag = PathBuf::from("custom.json");
        assert_eq!(
            resolve_config_path_with(Some(&flag), Some("env.json".into())),
            flag
        );
        assert_eq!(
            resolve_config_path_with(None, Some("env.json".into())),
            PathBuf::from("env.json")
        );
        assert_eq!(
            resolve_config_path_with(None, Some("  ".into())),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
        assert_eq!(
            resolve_config_path_with(None, None),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }
}
