use crate::error::Result;
use serde::Deserialize;

/// Minifier settings, in the same JSON shape clean-css accepts
///
/// ```json
/// {
///   "format": "beautify",
///   "level": {
///     "2": {
///       "all": false,
///       "removeDuplicateRules": true,
///       "removeEmpty": true,
///       "reduceNonAdjacentRules": true,
///       "removeDuplicateFontRules": true,
///       "removeDuplicateMediaBlocks": true
///     }
///   }
/// }
/// ```
///
/// `CleanCssOptions::default()` is exactly the profile above.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CleanCssOptions {
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub level: Level,
}

/// Output layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// One declaration per line, indented
    #[default]
    Beautify,
    /// Everything on as few bytes as possible
    #[serde(alias = "none")]
    Compact,
}

/// Optimization levels; only level 2 (rule-level) is configurable
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Level {
    /// Rule-level passes, `None` when level 2 is not requested at all
    #[serde(rename = "2", default)]
    pub two: Option<Level2Options>,
}

/// Rule-level passes that can be switched on individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "RawLevel2Options")]
pub struct Level2Options {
    pub remove_duplicate_rules: bool,
    pub remove_empty: bool,
    pub reduce_non_adjacent_rules: bool,
    pub remove_duplicate_font_rules: bool,
    pub remove_duplicate_media_blocks: bool,
}

/// Level 2 options as written; unset flags fall back to `all`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel2Options {
    all: Option<bool>,
    remove_duplicate_rules: Option<bool>,
    remove_empty: Option<bool>,
    reduce_non_adjacent_rules: Option<bool>,
    remove_duplicate_font_rules: Option<bool>,
    remove_duplicate_media_blocks: Option<bool>,
}

impl From<RawLevel2Options> for Level2Options {
    fn from(raw: RawLevel2Options) -> Self {
        let all = raw.all.unwrap_or(true);
        Self {
            remove_duplicate_rules: raw.remove_duplicate_rules.unwrap_or(all),
            remove_empty: raw.remove_empty.unwrap_or(all),
            reduce_non_adjacent_rules: raw.reduce_non_adjacent_rules.unwrap_or(all),
            remove_duplicate_font_rules: raw.remove_duplicate_font_rules.unwrap_or(all),
            remove_duplicate_media_blocks: raw.remove_duplicate_media_blocks.unwrap_or(all),
        }
    }
}

impl Level2Options {
    /// Every pass switched on
    pub fn all() -> Self {
        Self::from(RawLevel2Options::default())
    }

    /// Every pass switched off
    pub fn none() -> Self {
        Self {
            remove_duplicate_rules: false,
            remove_empty: false,
            reduce_non_adjacent_rules: false,
            remove_duplicate_font_rules: false,
            remove_duplicate_media_blocks: false,
        }
    }
}

impl Default for CleanCssOptions {
    fn default() -> Self {
        Self {
            format: Format::Beautify,
            level: Level {
                two: Some(Level2Options::all()),
            },
        }
    }
}

impl CleanCssOptions {
    /// Parse options from their JSON form
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Options with every rule-level pass disabled
    pub fn level1_only(format: Format) -> Self {
        Self {
            format,
            level: Level::default(),
        }
    }
}
