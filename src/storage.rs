use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract persistence for last week's rotten issue count
pub trait CounterStore {
    /// Return the stored count. A missing or unreadable counter is an error
    fn load(&self) -> Result<u64>;
    /// Persist the count, replacing the previous one
    fn save(&self, count: u64) -> Result<()>;
}

/// Counter kept as a single ASCII integer in a plain file
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCounterStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> Result<u64> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read counter file {}", self.path.display()))?;
        content.trim().parse::<u64>().with_context(|| {
            format!(
                "Counter file {} does not hold a valid count: {:?}",
                self.path.display(),
                content.trim()
            )
        })
    }

    fn save(&self, count: u64) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create counter directory")?;
        }
        fs::write(&self.path, count.to_string())
            .with_context(|| format!("Failed to write counter file {}", self.path.display()))?;
        Ok(())
    }
}
