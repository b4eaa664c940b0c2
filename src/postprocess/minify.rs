use crate::error::{Json2SassError, Result};
use crate::postprocess::optimize::optimize_rules;
use crate::postprocess::options::{CleanCssOptions, Format};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Rewrite a stylesheet with the configured rule-level passes
///
/// # Arguments
/// * `name` - Asset name, used for error messages
/// * `source` - CSS text
/// * `options` - Formatting and level 2 settings
///
/// # Returns
/// * `Ok(String)` - The rewritten stylesheet
/// * `Err(Json2SassError::CssParse)` - If the input is not valid CSS
///
/// # Examples
/// ```
/// use json2sass::postprocess::{minify_css, CleanCssOptions};
///
/// let css = minify_css("a.css", "a{color:red} a{color:red}", &CleanCssOptions::default()).unwrap();
/// assert_eq!(css.matches("color").count(), 1);
/// ```
pub fn minify_css(name: &str, source: &str, options: &CleanCssOptions) -> Result<String> {
    let parser_options = ParserOptions {
        filename: name.to_string(),
        ..ParserOptions::default()
    };
    let mut stylesheet =
        StyleSheet::parse(source, parser_options).map_err(|e| Json2SassError::CssParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    if let Some(level2) = &options.level.two {
        optimize_rules(&mut stylesheet.rules.0, level2).map_err(|e| Json2SassError::CssPrint {
            name: name.to_string(),
            message: e.to_string(),
        })?;
    }

    let printed = stylesheet
        .to_css(PrinterOptions {
            minify: options.format == Format::Compact,
            ..PrinterOptions::default()
        })
        .map_err(|e| Json2SassError::CssPrint {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    Ok(printed.code)
}
