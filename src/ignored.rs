use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Repository names that are left out of rot tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IgnoredRepos {
    names: HashSet<String>,
}

impl IgnoredRepos {
    /// One repository name per line. Blank lines are skipped.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { names }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ignored repos file {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    pub fn contains(&self, repo_name: &str) -> bool {
        self.names.contains(repo_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoredRepos {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
