use crate::error::{Json2SassError, Result};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A generated output file held in memory
///
/// Content is fixed once created; rewriting an asset means replacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    source: String,
}

impl Asset {
    /// Create an asset from its text content
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Text content
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Size in bytes of the current content
    pub fn size(&self) -> usize {
        self.source.len()
    }
}

/// A named group of output files produced together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub files: Vec<String>,
}

impl Chunk {
    pub fn new<I, S>(name: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything a build pass produced: named assets grouped into chunks
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    assets: BTreeMap<String, Asset>,
    chunks: Vec<Chunk>,
}

impl BuildOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite an asset
    pub fn insert_asset(&mut self, name: impl Into<String>, asset: Asset) {
        self.assets.insert(name.into(), asset);
    }

    pub fn add_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.get(name)
    }

    pub fn assets(&self) -> impl Iterator<Item = (&str, &Asset)> {
        self.assets.iter().map(|(name, asset)| (name.as_str(), asset))
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Replace an existing asset, returning the previous one
    ///
    /// Names that are not already present are ignored so that the set of
    /// files never changes.
    pub fn replace_asset(&mut self, name: &str, asset: Asset) -> Option<Asset> {
        self.assets
            .get_mut(name)
            .map(|slot| std::mem::replace(slot, asset))
    }

    /// File names referenced by chunks, in chunk order, without repeats
    pub fn chunk_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for chunk in &self.chunks {
            for file in &chunk.files {
                if !files.contains(&file.as_str()) {
                    files.push(file);
                }
            }
        }
        files
    }

    /// Load every UTF-8 file under `dir` as one chunk named `chunk_name`
    ///
    /// Asset names are paths relative to `dir`, separated with `/`.
    /// Files that are not valid UTF-8 (images, fonts) are skipped.
    pub fn from_dir(dir: &Path, chunk_name: &str) -> Result<Self> {
        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        files.sort();

        let mut output = Self::new();
        let mut names = Vec::new();

        for path in files {
            let bytes = fs::read(&path).map_err(|source| Json2SassError::Io {
                path: path.clone(),
                source,
            })?;
            let Ok(text) = String::from_utf8(bytes) else {
                debug!("Skipping binary file {}", path.display());
                continue;
            };

            let name = asset_name(dir, &path);
            output.insert_asset(name.clone(), Asset::new(text));
            names.push(name);
        }

        output.add_chunk(Chunk::new(chunk_name, names));
        Ok(output)
    }

    /// Write the named assets back under `dir`
    pub fn write_to_dir<'a, I>(&self, dir: &Path, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            let Some(asset) = self.asset(name) else {
                continue;
            };
            let path = dir.join(name);
            fs::write(&path, asset.source()).map_err(|source| Json2SassError::Io { path, source })?;
        }
        Ok(())
    }
}

/// Recursively collect every file under a directory
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|source| Json2SassError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let path = entry
            .map_err(|source| Json2SassError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn asset_name(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
