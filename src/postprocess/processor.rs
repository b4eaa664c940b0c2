use crate::error::Result;
use crate::postprocess::minify::minify_css;
use crate::postprocess::options::CleanCssOptions;
use crate::postprocess::output::{Asset, BuildOutput};
use log::{debug, info};

/// Extension of the assets this processor rewrites (case-sensitive)
const CSS_EXTENSION: &str = ".css";

/// Check if an output file is a stylesheet
pub fn is_css_file(name: &str) -> bool {
    name.ends_with(CSS_EXTENSION)
}

/// One rewritten asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenAsset {
    pub name: String,
    pub original_size: usize,
    pub size: usize,
}

/// Summary of a post-processing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub rewritten: Vec<RewrittenAsset>,
}

impl ProcessReport {
    /// Bytes saved across all rewritten assets (negative if output grew)
    pub fn saved_bytes(&self) -> i64 {
        self.rewritten
            .iter()
            .map(|a| a.original_size as i64 - a.size as i64)
            .sum()
    }
}

/// Rewrites the stylesheets of a finished build through the minifier
#[derive(Debug, Clone, Default)]
pub struct CssPostProcessor {
    options: CleanCssOptions,
}

impl CssPostProcessor {
    pub fn new(options: CleanCssOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CleanCssOptions {
        &self.options
    }

    /// Rewrite every `.css` file listed by a chunk
    ///
    /// All stylesheets are minified before any asset is replaced, so a
    /// failure leaves `output` untouched. Other files are never modified and
    /// no file is added or removed.
    ///
    /// # Examples
    /// ```
    /// use json2sass::postprocess::{Asset, BuildOutput, Chunk, CssPostProcessor};
    ///
    /// let mut output = BuildOutput::new();
    /// output.insert_asset("a.css", Asset::new("a{color:red} a{color:red}"));
    /// output.add_chunk(Chunk::new("main", ["a.css"]));
    ///
    /// let report = CssPostProcessor::default().process(&mut output).unwrap();
    /// assert_eq!(report.rewritten.len(), 1);
    /// ```
    pub fn process(&self, output: &mut BuildOutput) -> Result<ProcessReport> {
        let mut replacements = Vec::new();

        for name in output.chunk_files() {
            if !is_css_file(name) {
                continue;
            }
            let Some(asset) = output.asset(name) else {
                debug!("Chunk lists {} but no such asset exists", name);
                continue;
            };

            let minified = minify_css(name, asset.source(), &self.options)?;
            replacements.push((name.to_string(), asset.size(), Asset::new(minified)));
        }

        let mut report = ProcessReport::default();
        for (name, original_size, asset) in replacements {
            let size = asset.size();
            info!("Rewrote {} ({} -> {} bytes)", name, original_size, size);
            output.replace_asset(&name, asset);
            report.rewritten.push(RewrittenAsset {
                name,
                original_size,
                size,
            });
        }

        Ok(report)
    }

    /// Build-completion hook: rewrite stylesheets, then signal `done`
    ///
    /// `done` runs exactly once after every matching asset was replaced. It is
    /// not called when processing fails; the error is returned instead.
    pub fn emit<F>(&self, output: &mut BuildOutput, done: F) -> Result<ProcessReport>
    where
        F: FnOnce(),
    {
        let report = self.process(output)?;
        done();
        Ok(report)
    }
}
