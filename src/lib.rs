//! # json2sass
//!
//! Build helpers for stylesheets: expose JSON files as SASS variables and
//! clean up the CSS a bundler emits.
//!
//! ## Example
//!
//! ```no_run
//! use json2sass::importer::{resolve_import, ImporterConfig};
//! use json2sass::postprocess::{BuildOutput, CssPostProcessor};
//! use std::path::Path;
//!
//! // `@import "theme.json";` inside src/styles/app.scss
//! let config = ImporterConfig::from_delimited("src/shared");
//! if let Some(import) = resolve_import("theme.json", Path::new("src/styles/app.scss"), &config).unwrap() {
//!     println!("{}", import.contents);
//! }
//!
//! // Rewrite the stylesheets of a finished build
//! let mut output = BuildOutput::from_dir(Path::new("build"), "main").unwrap();
//! let report = CssPostProcessor::default().process(&mut output).unwrap();
//! println!("Rewrote {} stylesheet(s)", report.rewritten.len());
//! ```

pub mod error;
pub mod importer;
pub mod postprocess;
pub mod sass;
pub mod types;

// Re-export commonly used items
pub use error::{Json2SassError, Result};
pub use types::SassValue;
