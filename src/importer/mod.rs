/// Resolution of `@import "*.json"` requests
///
/// - `config`: include paths searched after the importing file's directory
/// - `resolve`: locate, read and transform the JSON file
pub mod config;
pub mod resolve;

// Re-export commonly used items
pub use config::ImporterConfig;
pub use resolve::{
    find_import, is_json_file, load_json_file, resolve_import, search_paths, ImportedStylesheet,
};
