use crate::postprocess::options::Level2Options;
use lightningcss::error::PrinterError;
use lightningcss::rules::style::StyleRule;
use lightningcss::rules::CssRule;
use lightningcss::stylesheet::PrinterOptions;
use lightningcss::traits::ToCss;
use std::collections::HashSet;

type PrintResult<T> = std::result::Result<T, PrinterError>;

/// Apply the enabled rule-level passes to a list of rules
///
/// Passes run in this order, each one only if enabled:
/// 1. drop empty rules
/// 2. recurse into `@media` bodies
/// 3. merge non-adjacent rules with identical selectors
/// 4. drop duplicate `@font-face` blocks (first wins)
/// 5. drop duplicate `@media` blocks (last wins)
/// 6. drop duplicate style rules (last wins)
/// 7. drop rules emptied by the passes above
pub fn optimize_rules(rules: &mut Vec<CssRule<'_>>, options: &Level2Options) -> PrintResult<()> {
    if options.remove_empty {
        remove_empty(rules);
    }

    for rule in rules.iter_mut() {
        if let CssRule::Media(media) = rule {
            optimize_rules(&mut media.rules.0, options)?;
        }
    }

    if options.reduce_non_adjacent_rules {
        reduce_non_adjacent_rules(rules)?;
    }
    if options.remove_duplicate_font_rules {
        remove_duplicate_font_rules(rules)?;
    }
    if options.remove_duplicate_media_blocks {
        remove_duplicate_media_blocks(rules)?;
    }
    if options.remove_duplicate_rules {
        remove_duplicate_rules(rules)?;
    }
    if options.remove_empty {
        remove_empty(rules);
    }

    Ok(())
}

/// Compact serialization used to compare rules
fn key<T: ToCss>(item: &T) -> PrintResult<String> {
    item.to_css_string(PrinterOptions {
        minify: true,
        ..PrinterOptions::default()
    })
}

fn is_empty_style(style: &StyleRule<'_>) -> bool {
    style.declarations.declarations.is_empty()
        && style.declarations.important_declarations.is_empty()
        && style.rules.0.is_empty()
}

/// Drop style rules without declarations, empty `@media` and empty `@font-face`
fn remove_empty(rules: &mut Vec<CssRule<'_>>) {
    rules.retain_mut(|rule| match rule {
        CssRule::Style(style) => !is_empty_style(style),
        CssRule::Media(media) => {
            remove_empty(&mut media.rules.0);
            !media.rules.0.is_empty()
        }
        CssRule::FontFace(font_face) => !font_face.properties.is_empty(),
        _ => true,
    });
}

/// Keep only the rules whose flag is `true`
fn retain_marked(rules: &mut Vec<CssRule<'_>>, keep: &[bool]) {
    let mut flags = keep.iter();
    rules.retain(|_| *flags.next().unwrap_or(&true));
}

/// Style rules with identical selector and body; the last one is kept
fn remove_duplicate_rules(rules: &mut Vec<CssRule<'_>>) -> PrintResult<()> {
    let mut seen = HashSet::new();
    let mut keep = vec![true; rules.len()];

    for (i, rule) in rules.iter().enumerate().rev() {
        if let CssRule::Style(style) = rule {
            if !seen.insert(key(style)?) {
                keep[i] = false;
            }
        }
    }

    retain_marked(rules, &keep);
    Ok(())
}

/// Identical `@font-face` blocks; the first one is kept
fn remove_duplicate_font_rules(rules: &mut Vec<CssRule<'_>>) -> PrintResult<()> {
    let mut seen = HashSet::new();
    let mut keep = vec![true; rules.len()];

    for (i, rule) in rules.iter().enumerate() {
        if let CssRule::FontFace(font_face) = rule {
            if !seen.insert(key(font_face)?) {
                keep[i] = false;
            }
        }
    }

    retain_marked(rules, &keep);
    Ok(())
}

/// Identical `@media` blocks; the last one is kept
fn remove_duplicate_media_blocks(rules: &mut Vec<CssRule<'_>>) -> PrintResult<()> {
    let mut seen = HashSet::new();
    let mut keep = vec![true; rules.len()];

    for (i, rule) in rules.iter().enumerate().rev() {
        if let CssRule::Media(media) = rule {
            if !seen.insert(key(media)?) {
                keep[i] = false;
            }
        }
    }

    retain_marked(rules, &keep);
    Ok(())
}

/// Group of properties that can override one another
///
/// A shorthand, its longhands and their logical or physical counterparts all
/// share a group (`margin`, `margin-top` and `margin-inline-start` are all
/// `margin`). Groups are coarse; two properties in one group may not actually
/// interact, which only blocks a merge.
fn cascade_group(name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }

    let unprefixed = ["-webkit-", "-moz-", "-ms-", "-o-"]
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);
    let root = unprefixed.split('-').next().unwrap_or(unprefixed);

    let group = match root {
        "top" | "right" | "bottom" | "left" | "inset" => "inset",
        "width" | "height" | "inline" | "block" => "size",
        "place" | "align" | "justify" => "align",
        "gap" | "row" | "column" | "columns" => "gap",
        "line" => "font",
        other => other,
    };
    group.to_string()
}

/// Whether two sets of cascade groups touch each other
fn groups_overlap(a: &HashSet<String>, b: &HashSet<String>) -> bool {
    a.contains("all") || b.contains("all") || !a.is_disjoint(b)
}

/// Cascade groups a rule sets, `None` when they cannot be known
///
/// `None` blocks any merge across the rule.
fn declared_properties(rule: &CssRule<'_>) -> Option<HashSet<String>> {
    match rule {
        CssRule::Style(style) => {
            if !style.rules.0.is_empty() {
                return None;
            }
            Some(
                style
                    .declarations
                    .declarations
                    .iter()
                    .chain(style.declarations.important_declarations.iter())
                    .map(|property| cascade_group(property.property_id().name()))
                    .collect(),
            )
        }
        CssRule::Media(media) => {
            let mut names = HashSet::new();
            for nested in &media.rules.0 {
                names.extend(declared_properties(nested)?);
            }
            Some(names)
        }
        CssRule::FontFace(_)
        | CssRule::Import(_)
        | CssRule::Namespace(_)
        | CssRule::Keyframes(_)
        | CssRule::Ignored => Some(HashSet::new()),
        _ => None,
    }
}

/// Merge a style rule into a later rule with the same selectors
///
/// The earlier rule is folded forward when at least one rule sits between the
/// two and none of the rules in between sets a property that could override one
/// the earlier rule sets (shorthands and longhands count as overlapping).
/// Declarations the later rule already has are not copied.
fn reduce_non_adjacent_rules(rules: &mut Vec<CssRule<'_>>) -> PrintResult<()> {
    let mut selectors = Vec::with_capacity(rules.len());
    for rule in rules.iter() {
        selectors.push(match rule {
            CssRule::Style(style) if style.rules.0.is_empty() => {
                Some((key(&style.selectors)?, style.vendor_prefix))
            }
            _ => None,
        });
    }

    let mut keep = vec![true; rules.len()];

    for i in 0..rules.len() {
        let Some(selector) = &selectors[i] else {
            continue;
        };

        let Some(j) = (i + 1..rules.len())
            .filter(|&j| keep[j])
            .find(|&j| selectors[j].as_ref() == Some(selector))
        else {
            continue;
        };

        let between: Vec<usize> = (i + 1..j).filter(|&k| keep[k]).collect();
        if between.is_empty() {
            continue;
        }

        let Some(moving) = declared_properties(&rules[i]) else {
            continue;
        };
        let blocked = between.iter().any(|&k| match declared_properties(&rules[k]) {
            Some(names) => groups_overlap(&names, &moving),
            None => true,
        });
        if blocked {
            continue;
        }

        let (head, tail) = rules.split_at_mut(j);
        if let (CssRule::Style(earlier), CssRule::Style(later)) = (&mut head[i], &mut tail[0]) {
            merge_into(earlier, later);
            keep[i] = false;
        }
    }

    retain_marked(rules, &keep);
    Ok(())
}

/// Prepend `earlier`'s declarations that `later` does not override
fn merge_into<'i>(earlier: &mut StyleRule<'i>, later: &mut StyleRule<'i>) {
    let normal: HashSet<String> = later
        .declarations
        .declarations
        .iter()
        .map(|p| p.property_id().name().to_string())
        .collect();
    let important: HashSet<String> = later
        .declarations
        .important_declarations
        .iter()
        .map(|p| p.property_id().name().to_string())
        .collect();

    let moved: Vec<_> = std::mem::take(&mut earlier.declarations.declarations)
        .into_iter()
        .filter(|p| !normal.contains(p.property_id().name()))
        .collect();
    let moved_important: Vec<_> = std::mem::take(&mut earlier.declarations.important_declarations)
        .into_iter()
        .filter(|p| !important.contains(p.property_id().name()))
        .collect();

    later.declarations.declarations.splice(0..0, moved);
    later
        .declarations
        .important_declarations
        .splice(0..0, moved_important);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightningcss::stylesheet::{ParserOptions, StyleSheet};

    fn run(css: &str, options: &Level2Options) -> String {
        let mut sheet = StyleSheet::parse(css, ParserOptions::default()).unwrap();
        optimize_rules(&mut sheet.rules.0, options).unwrap();
        sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .unwrap()
            .code
    }

    fn only(pass: impl FnOnce(&mut Level2Options)) -> Level2Options {
        let mut options = Level2Options::none();
        pass(&mut options);
        options
    }

    #[test]
    fn test_remove_duplicate_rules_keeps_one() {
        let options = only(|o| o.remove_duplicate_rules = true);
        let out = run("a{color:red} a{color:red}", &options);
        assert_eq!(out.matches("color").count(), 1);
    }

    #[test]
    fn test_remove_duplicate_rules_keeps_last() {
        let options = only(|o| o.remove_duplicate_rules = true);
        let out = run(".x{color:red} .y{color:blue} .x{color:red}", &options);
        let x = out.find(".x").unwrap();
        let y = out.find(".y").unwrap();
        assert!(y < x, "expected .y before .x in {}", out);
        assert_eq!(out.matches(".x").count(), 1);
    }

    #[test]
    fn test_different_bodies_are_not_duplicates() {
        let options = only(|o| o.remove_duplicate_rules = true);
        let out = run("a{color:red} a{color:blue}", &options);
        assert_eq!(out.matches("color").count(), 2);
    }

    #[test]
    fn test_remove_empty() {
        let options = only(|o| o.remove_empty = true);
        let out = run(".gone{} .kept{color:red} @media print{} @media screen{.also{}}", &options);
        assert!(!out.contains(".gone"));
        assert!(!out.contains("@media"));
        assert!(out.contains(".kept"));
    }

    #[test]
    fn test_remove_duplicate_font_rules() {
        let options = only(|o| o.remove_duplicate_font_rules = true);
        let css = "@font-face{font-family:Foo;src:url(foo.woff)} \
                   @font-face{font-family:Foo;src:url(foo.woff)} \
                   @font-face{font-family:Bar;src:url(bar.woff)}";
        let out = run(css, &options);
        assert_eq!(out.matches("@font-face").count(), 2);
        assert!(out.contains("Bar"));
    }

    #[test]
    fn test_remove_duplicate_media_blocks_keeps_last() {
        let options = only(|o| o.remove_duplicate_media_blocks = true);
        let css = "@media (min-width:100px){a{color:red}} b{color:blue} @media (min-width:100px){a{color:red}}";
        let out = run(css, &options);
        assert_eq!(out.matches("@media").count(), 1);
        assert!(out.find("b{").unwrap() < out.find("@media").unwrap());
    }

    #[test]
    fn test_duplicates_inside_media_are_removed() {
        let options = only(|o| o.remove_duplicate_rules = true);
        let out = run("@media print{a{color:red} a{color:red}}", &options);
        assert_eq!(out.matches("color").count(), 1);
    }

    #[test]
    fn test_reduce_non_adjacent_rules_merges_forward() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{width:1px} .b{margin:0} .a{padding:0}", &options);

        assert_eq!(out.matches(".a").count(), 1);
        assert!(out.contains("width:1px"));
        assert!(out.contains("padding:0"));
        assert!(out.find(".b").unwrap() < out.find(".a").unwrap());
    }

    #[test]
    fn test_reduce_non_adjacent_rules_blocked_by_conflict() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{width:1px} .b{width:2px} .a{padding:0}", &options);
        assert_eq!(out.matches(".a").count(), 2);
    }

    #[test]
    fn test_reduce_non_adjacent_rules_later_value_wins() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{width:1px} .b{margin:0} .a{width:2px}", &options);
        assert_eq!(out.matches(".a").count(), 1);
        assert!(out.contains("width:2px"));
        assert!(!out.contains("width:1px"));
    }

    #[test]
    fn test_reduce_non_adjacent_rules_blocked_by_shorthand() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{margin-top:1px} .b{margin:0} .a{padding:0}", &options);

        assert_eq!(out.matches(".a").count(), 2);
        assert!(out.find("margin-top").unwrap() < out.find("margin:0").unwrap());
    }

    #[test]
    fn test_reduce_non_adjacent_rules_blocked_by_logical_property() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{left:1px} .b{inset-inline-start:0} .a{padding:0}", &options);
        assert_eq!(out.matches(".a").count(), 2);
    }

    #[test]
    fn test_reduce_non_adjacent_rules_blocked_by_all() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{width:1px} .b{all:unset} .a{padding:0}", &options);
        assert_eq!(out.matches(".a").count(), 2);
    }

    #[test]
    fn test_cascade_group() {
        assert_eq!(cascade_group("margin"), "margin");
        assert_eq!(cascade_group("margin-top"), "margin");
        assert_eq!(cascade_group("margin-inline-start"), "margin");
        assert_eq!(cascade_group("border-top-width"), "border");
        assert_eq!(cascade_group("-webkit-border-radius"), "border");
        assert_eq!(cascade_group("left"), "inset");
        assert_eq!(cascade_group("inset-block-end"), "inset");
        assert_eq!(cascade_group("width"), "size");
        assert_eq!(cascade_group("inline-size"), "size");
        assert_eq!(cascade_group("line-height"), "font");
        assert_eq!(cascade_group("--brand"), "--brand");
    }

    #[test]
    fn test_adjacent_rules_are_left_alone() {
        let options = only(|o| o.reduce_non_adjacent_rules = true);
        let out = run(".a{color:red} .a{padding:0}", &options);
        assert_eq!(out.matches(".a").count(), 2);
    }

    #[test]
    fn test_all_passes_off_changes_nothing() {
        let out = run("a{color:red} a{color:red}", &Level2Options::none());
        assert_eq!(out.matches("color").count(), 2);
    }
}
