/// Post-processing of stylesheet assets after a build pass
///
/// - `output`: in-memory build output (assets and chunks)
/// - `options`: minifier profile, deserializable from its JSON form
/// - `optimize`: rule-level passes over a parsed stylesheet
/// - `minify`: parse, optimize and print a single stylesheet
/// - `processor`: rewrite every `.css` asset of a build output
pub mod minify;
pub mod optimize;
pub mod options;
pub mod output;
pub mod processor;

// Re-export commonly used items
pub use minify::minify_css;
pub use options::{CleanCssOptions, Format, Level, Level2Options};
pub use output::{Asset, BuildOutput, Chunk};
pub use processor::{is_css_file, CssPostProcessor, ProcessReport, RewrittenAsset};
