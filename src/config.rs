use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    link_style::LinkStyle,
};

/// Known commit types and their section titles, in priority order
pub const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("feat", "✨ Features"),
    ("fix", "🐛 Bug Fixes"),
    ("docs", "📚 Documentation"),
    ("style", "💄 Styles"),
    ("refactor", "♻️ Code Refactoring"),
    ("perf", "⚡ Performance Improvements"),
    ("test", "✅ Tests"),
    ("build", "📦 Builds"),
    ("ci", "👷 Continuous Integration"),
    ("chore", "🔧 Chores"),
    ("revert", "⏪ Reverts"),
];

pub fn default_sections() -> IndexMap<String, String> {
    DEFAULT_SECTIONS
        .iter()
        .map(|(t, title)| ((*t).to_owned(), (*title).to_owned()))
        .collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub convlog: RawConvlogCfg,
    /// type -> section title
    #[serde(default)]
    pub sections: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawConvlogCfg {
    pub output: Option<PathBuf>,
    pub repository: Option<String>,
    pub link_style: Option<LinkStyle>,
    pub fallback_type: Option<String>,
}

impl RawCfg {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
