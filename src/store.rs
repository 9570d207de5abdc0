use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::metrics::TotalMetrics;

/// The JSON totals file on disk.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_data_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads persisted totals. A missing or unreadable file, and anything
    /// that does not parse as a totals object, all count as zero totals.
    pub fn load(&self) -> TotalMetrics {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(totals) => totals,
                Err(e) => {
                    log::warn!(
                        "Ignoring malformed totals file {}: {}",
                        self.path.display(),
                        e
                    );
                    TotalMetrics::default()
                }
            },
            Err(_) => TotalMetrics::default(),
        }
    }

    pub fn save(&self, totals: &TotalMetrics) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(totals).context("Failed to serialize totals")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write totals file {}", self.path.display()))?;

        Ok(())
    }
}

fn default_data_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "scroll-tracker", "tracker")
        .context("Failed to get project directories")?;

    Ok(proj_dirs.data_dir().join("scroll_data.json"))
}
