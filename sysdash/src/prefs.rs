//! Theme preference: load/save a small JSON file `{ "theme": "light" | "dark" }`.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/sysdash/prefs.json (fallback ~/.config/sysdash/prefs.json)

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::PrefsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Header icon: offers the other theme.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrefsFile {
    #[serde(default)]
    pub theme: Theme,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("sysdash")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sysdash")
    }
}

/// Where the theme preference lives.
#[derive(Debug, Clone)]
pub struct Prefs {
    path: PathBuf,
}

impl Prefs {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Self {
        Self::at(config_dir().join("prefs.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Missing or unreadable file falls back to the light theme.
    pub fn load_theme(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(s) => serde_json::from_str::<PrefsFile>(&s)
                .unwrap_or_default()
                .theme,
            Err(_) => Theme::default(),
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&PrefsFile { theme })?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_corrupt_files_mean_light() {
        let td = tempfile::tempdir().unwrap();
        let p = Prefs::at(td.path().join("prefs.json"));
        assert_eq!(p.load_theme(), Theme::Light);
        fs::write(p.path(), "{not json").unwrap();
        assert_eq!(p.load_theme(), Theme::Light);
    }

    #[test]
    fn theme_round_trips_through_disk() {
        let td = tempfile::tempdir().unwrap();
        let p = Prefs::at(td.path().join("nested").join("prefs.json"));
        p.save_theme(Theme::Dark).unwrap();
        assert_eq!(p.load_theme(), Theme::Dark);
        let raw = fs::read_to_string(p.path()).unwrap();
        assert!(raw.contains("\"dark\""), "unexpected prefs body: {raw}");
    }

    #[test]
    fn toggle_and_icon() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.icon(), "☀️");
        assert_eq!(Theme::Light.icon(), "🌙");
    }
}
