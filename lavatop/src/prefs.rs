//! Persisted UI preferences (theme), stored as JSON under the XDG config dir:
//! $XDG_CONFIG_HOME/lavatop/prefs.json (fallback ~/.config/lavatop/prefs.json)

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("lavatop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lavatop")
    }
}

pub fn prefs_path() -> PathBuf {
    config_dir().join("prefs.json")
}

/// Missing or unreadable files yield defaults.
pub fn load_prefs_from(path: &Path) -> Preferences {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => Preferences::default(),
    }
}

pub fn save_prefs_to(path: &Path, p: &Preferences) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).map_err(io::Error::other)?;
    fs::write(path, data)
}

pub fn load_prefs() -> Preferences {
    load_prefs_from(&prefs_path())
}

pub fn save_prefs(p: &Preferences) -> io::Result<()> {
    save_prefs_to(&prefs_path(), p)
}
