use crate::error::{Json2SassError, Result};
use crate::importer::config::ImporterConfig;
use crate::sass::transform_json;
use log::{debug, warn};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension handled by this importer (case-sensitive)
const JSON_EXTENSION: &str = ".json";

/// Result of a successful `.json` import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedStylesheet {
    /// SASS source to splice in place of the import
    pub contents: String,
    /// File the contents were generated from, `None` when nothing was found
    pub resolved_path: Option<PathBuf>,
}

/// Check if an import request targets a JSON file
///
/// # Examples
/// ```
/// use json2sass::importer::is_json_file;
///
/// assert!(is_json_file("theme/colors.json"));
/// assert!(!is_json_file("colors.JSON"));
/// assert!(!is_json_file("colors.scss"));
/// ```
pub fn is_json_file(request: &str) -> bool {
    request.ends_with(JSON_EXTENSION)
}

/// Build the ordered list of roots an import is searched in
///
/// The directory of the previously resolved file comes first, then every
/// configured include path.
pub fn search_paths(prev: &Path, config: &ImporterConfig) -> Vec<PathBuf> {
    let base = prev.parent().map(Path::to_path_buf).unwrap_or_default();

    std::iter::once(base)
        .chain(config.include_paths.iter().cloned())
        .collect()
}

/// Find the first existing file for `request` across the search roots
///
/// The filesystem is queried on every call; nothing is cached.
pub fn find_import(request: &str, prev: &Path, config: &ImporterConfig) -> Option<PathBuf> {
    search_paths(prev, config)
        .into_iter()
        .map(|root| root.join(request))
        .find(|candidate| candidate.is_file())
}

/// Read and parse a JSON file from disk
///
/// Always reads fresh content so that edits between builds are picked up.
pub fn load_json_file(path: &Path) -> Result<JsonValue> {
    let text = fs::read_to_string(path).map_err(|source| Json2SassError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| Json2SassError::MalformedContent {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a SASS import of a `.json` file into SASS variables
///
/// # Arguments
/// * `request` - The import target as written in the stylesheet
/// * `prev` - Path of the file containing the import
/// * `config` - Include paths to search after the importing file's directory
///
/// # Returns
/// * `Ok(None)` - The request is not a `.json` file; other importers should handle it
/// * `Ok(Some(import))` - SASS variables for the file. When no candidate exists the
///   contents are empty and `resolved_path` is `None`
/// * `Err(Json2SassError)` - The file exists but could not be read or is not valid JSON
///
/// # Examples
/// ```no_run
/// use json2sass::importer::{resolve_import, ImporterConfig};
/// use std::path::Path;
///
/// let config = ImporterConfig::new(["src/theme"]);
/// let import = resolve_import("colors.json", Path::new("src/app.scss"), &config)
///     .unwrap()
///     .unwrap();
/// println!("{}", import.contents);
/// ```
pub fn resolve_import(
    request: &str,
    prev: &Path,
    config: &ImporterConfig,
) -> Result<Option<ImportedStylesheet>> {
    if !is_json_file(request) {
        return Ok(None);
    }

    let Some(path) = find_import(request, prev, config) else {
        // A missing file behaves like an empty object
        let roots: Vec<String> = search_paths(prev, config)
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        warn!(
            "Unable to find \"{}\" from the following path(s): {}; using no variables",
            request,
            roots.join(", ")
        );
        return Ok(Some(ImportedStylesheet {
            contents: String::new(),
            resolved_path: None,
        }));
    };

    debug!("Resolved \"{}\" to {}", request, path.display());

    let json = load_json_file(&path)?;
    let contents = transform_json(&json)?;

    Ok(Some(ImportedStylesheet {
        contents,
        resolved_path: Some(path),
    }))
}
