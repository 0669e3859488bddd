use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::{keys, ConfigStore};
use crate::page::Page;
use crate::Result;

/// Captures and manages screenshot artifacts for a test run.
///
/// Artifacts land in one directory as `<name>_<timestamp>.png`; the
/// timestamp uses `-` separators so the filename is portable. When capture is
/// disabled (`ENABLE_SCREENSHOTS=false`) every capture call is a logged
/// no-op returning `Ok(None)`.
#[derive(Clone, Debug)]
pub struct Screenshots {
    dir: PathBuf,
    enabled: bool,
}

impl Screenshots {
    /// Creates a helper writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    /// Creates a helper writing into `screenshots/`, honoring
    /// `ENABLE_SCREENSHOTS`.
    pub fn from_config(config: &ConfigStore) -> Result<Self> {
        Ok(Self::new(
            "screenshots",
            config.get_bool(keys::ENABLE_SCREENSHOTS)?,
        ))
    }

    /// Artifact directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Captures the viewport of `page`.
    pub async fn capture(&self, page: &Page, name: &str) -> Result<Option<PathBuf>> {
        if !self.enabled {
            debug!("screenshots disabled, skipping {name}");
            return Ok(None);
        }
        let bytes = page.screenshot_bytes(false).await?;
        self.save(name, &bytes).await
    }

    /// Captures the full scrollable document of `page`.
    pub async fn capture_full(&self, page: &Page, name: &str) -> Result<Option<PathBuf>> {
        if !self.enabled {
            debug!("screenshots disabled, skipping {name}");
            return Ok(None);
        }
        let bytes = page.screenshot_bytes(true).await?;
        self.save(name, &bytes).await
    }

    /// Captures the first element matching `selector`.
    pub async fn capture_element(
        &self,
        page: &Page,
        selector: &str,
        name: &str,
    ) -> Result<Option<PathBuf>> {
        if !self.enabled {
            debug!("screenshots disabled, skipping {name}");
            return Ok(None);
        }
        let bytes = page.element_screenshot_bytes(selector).await?;
        self.save(name, &bytes).await
    }

    /// Writes already-captured PNG bytes under a timestamped name.
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<Option<PathBuf>> {
        if !self.enabled {
            debug!("screenshots disabled, skipping {name}");
            return Ok(None);
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.artifact_path(name);
        tokio::fs::write(&path, bytes).await?;
        info!("screenshot saved: {}", path.display());
        Ok(Some(path))
    }

    fn artifact_path(&self, name: &str) -> PathBuf {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3f");
        self.dir.join(format!("{name}_{timestamp}.png"))
    }

    /// Deletes artifacts older than `days` days, returning how many were
    /// removed. A missing directory counts as already clean.
    pub fn clean_older_than(&self, days: u64) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let max_age = Duration::from_secs(days * 24 * 60 * 60);
        let now = SystemTime::now();
        let mut removed = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let stale = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .is_some_and(|age| age > max_age);
            if stale {
                debug!("removing stale artifact: {}", entry.path().display());
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }

        info!("cleaned {removed} screenshots older than {days} days");
        Ok(removed)
    }
}
