use std::path::{Path, PathBuf};

/// Settings shared by every import resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImporterConfig {
    /// Extra search roots, consulted after the importing file's directory
    pub include_paths: Vec<PathBuf>,
}

impl ImporterConfig {
    /// Create a config from a list of include paths
    pub fn new<I, P>(include_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            include_paths: include_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a platform path list (`a:b` on Unix, `a;b` on Windows)
    ///
    /// Empty segments are dropped.
    ///
    /// # Examples
    /// ```
    /// use json2sass::importer::ImporterConfig;
    ///
    /// # #[cfg(unix)]
    /// # {
    /// let config = ImporterConfig::from_delimited("src/styles:node_modules");
    /// assert_eq!(config.include_paths.len(), 2);
    /// # }
    /// ```
    pub fn from_delimited(list: &str) -> Self {
        Self {
            include_paths: std::env::split_paths(list)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Append more include paths, keeping the existing order
    pub fn extend<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.include_paths
            .extend(paths.into_iter().map(|p| p.as_ref().to_path_buf()));
    }
}
