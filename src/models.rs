use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A quiz question as returned by the notes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// The structured result of one successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Report {
    pub summary: String,
    pub key_points: Vec<String>,
    pub quiz: Vec<QuizItem>,
}

/// The file currently chosen for upload. Bytes are read at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl Selection {
    /// Stats `path` and builds a selection for it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) => bail!("Cannot open {}: {}", path.display(), e),
        };
        if !meta.is_file() {
            bail!("{} is not a regular file", path.display());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// Whether the extension is in the advisory accept list.
    pub fn is_accepted(&self, accepted: &[String]) -> bool {
        match self.extension() {
            Some(ext) => accepted.iter().any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&ext)),
            None => false,
        }
    }
}

/// A blocking message shown over the view until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self { title: "Error".to_string(), message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { title: "Info".to_string(), message: message.into() }
    }
}

/// What keyboard input is currently routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// The path prompt is open and the drop zone is armed.
    PathPrompt,
}
