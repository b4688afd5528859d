// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Where the build finds its inputs, optionally read from `coursegen.yaml`.

use crate::error::{PathContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "coursegen.yaml";

/// Input locations for one build.
///
/// ```yaml
/// data_dir: "data"
/// lectures: "lectures.yml"
/// assignments: "assignments.yml"
/// this_week: "this-week.yml"
/// templates_dir: "templates"
/// autoescape: true
/// ```
///
/// Every field is optional. Relative paths are taken against the project
/// root by [`Layout::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub data_dir: PathBuf,
    pub lectures: PathBuf,
    pub assignments: PathBuf,
    pub this_week: PathBuf,
    /// Every file in here becomes a partial named after its file stem.
    pub templates_dir: PathBuf,
    /// HTML-escape `{{ }}` output in all templates.
    pub autoescape: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            lectures: PathBuf::from("lectures.yml"),
            assignments: PathBuf::from("assignments.yml"),
            this_week: PathBuf::from("this-week.yml"),
            templates_dir: PathBuf::from("templates"),
            autoescape: true,
        }
    }
}

impl Layout {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    /// Use this for the conventional `coursegen.yaml` lookup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Read a layout file the user named explicitly. A missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).at(path)?;
        serde_yaml_ng::from_str(&text).at(path)
    }

    /// Anchor every relative location at `root`.
    ///
    /// The data files are relative to `data_dir`, which is itself relative
    /// to `root`.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> Self {
        let data_dir = root.join(&self.data_dir);
        Self {
            lectures: data_dir.join(&self.lectures),
            assignments: data_dir.join(&self.assignments),
            this_week: data_dir.join(&self.this_week),
            templates_dir: root.join(&self.templates_dir),
            data_dir,
            autoescape: self.autoescape,
        }
    }
}

/// Short display name of a data file for error messages.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
