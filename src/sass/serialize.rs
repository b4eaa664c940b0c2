use crate::error::{Json2SassError, Result};
use crate::types::SassValue;
use serde_json::{Number, Value as JsonValue};

/// Deepest nesting the serializer will follow before giving up
pub const MAX_DEPTH: usize = 256;

/// Serialize a value to SASS syntax
///
/// - Lists become `(a,b,c)`
/// - Maps become `(key: value,other: value)`
/// - Strings, numbers, booleans and null are emitted as-is, without quoting
///
/// # Arguments
/// * `value` - The value to serialize
///
/// # Returns
/// * `Ok(String)` - SASS source for the value
/// * `Err(Json2SassError::CyclicStructure)` - If nesting exceeds `MAX_DEPTH`
///
/// # Examples
/// ```
/// use json2sass::sass::serialize_value;
/// use json2sass::SassValue;
/// use serde_json::json;
///
/// let value = SassValue::from(json!({"x": 1, "y": [2, 3]}));
/// assert_eq!(serialize_value(&value).unwrap(), "(x: 1,y: (2,3))");
/// ```
pub fn serialize_value(value: &SassValue) -> Result<String> {
    let mut out = String::new();
    write_value(value, 0, &mut out)?;
    Ok(out)
}

/// Turn a document into one `$key: value;` line per top-level key
///
/// Lines keep the order of `entries` and are joined with `\n`. An empty
/// document produces an empty string.
///
/// # Examples
/// ```
/// use json2sass::sass::transform_document;
/// use json2sass::SassValue;
///
/// let entries = vec![
///     ("b".to_string(), SassValue::Number(1.into())),
///     ("a".to_string(), SassValue::Number(2.into())),
/// ];
/// assert_eq!(transform_document(&entries).unwrap(), "$b: 1;\n$a: 2;");
/// ```
pub fn transform_document(entries: &[(String, SassValue)]) -> Result<String> {
    let lines = entries
        .iter()
        .map(|(key, value)| Ok(format!("${}: {};", key, serialize_value(value)?)))
        .collect::<Result<Vec<String>>>()?;

    Ok(lines.join("\n"))
}

/// Transform a parsed JSON document into SASS variables
///
/// The top-level value must be an object.
pub fn transform_json(json: &JsonValue) -> Result<String> {
    match SassValue::from(json) {
        SassValue::Map(entries) => transform_document(&entries),
        other => Err(Json2SassError::NotAMapping(other.kind())),
    }
}

fn write_value(value: &SassValue, depth: usize, out: &mut String) -> Result<()> {
    match value {
        SassValue::List(items) => {
            let depth = enter(depth)?;
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, depth, out)?;
            }
            out.push(')');
        }
        SassValue::Map(entries) => {
            let depth = enter(depth)?;
            out.push('(');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(key);
                out.push_str(": ");
                write_value(item, depth, out)?;
            }
            out.push(')');
        }
        SassValue::String(s) => out.push_str(s),
        SassValue::Number(n) => out.push_str(&format_number(n)),
        SassValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        SassValue::Null => out.push_str("null"),
    }

    Ok(())
}

fn enter(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(Json2SassError::CyclicStructure {
            max_depth: MAX_DEPTH,
        });
    }
    Ok(depth + 1)
}

/// Format a number the way JavaScript's `String(n)` would
///
/// Whole floats drop their fractional part (`1.0` -> `1`). Magnitudes of
/// `1e21` and above, or below `1e-6`, use exponent form (`1e+21`, `1e-7`).
fn format_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => {
            let text = format!("{:e}", f);
            match text.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    format!("{}e+{}", mantissa, exponent)
                }
                _ => text,
            }
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn serialize_json(value: JsonValue) -> String {
        serialize_value(&SassValue::from(value)).unwrap()
    }

    /// Deepest parenthesis nesting in serialized output
    fn paren_depth(text: &str) -> usize {
        let mut depth = 0usize;
        let mut max = 0usize;
        for c in text.chars() {
            match c {
                '(' => {
                    depth += 1;
                    max = max.max(depth);
                }
                ')' => depth -= 1,
                _ => {}
            }
        }
        max
    }

    #[test]
    fn test_serialize_list() {
        assert_eq!(serialize_json(json!([1, 2, 3])), "(1,2,3)");
    }

    #[test]
    fn test_serialize_empty_list() {
        assert_eq!(serialize_json(json!([])), "()");
    }

    #[test]
    fn test_serialize_map() {
        assert_eq!(serialize_json(json!({"x": 1, "y": [2, 3]})), "(x: 1,y: (2,3))");
    }

    #[test]
    fn test_serialize_empty_map() {
        assert_eq!(serialize_json(json!({})), "()");
    }

    #[test]
    fn test_serialize_scalars_unquoted() {
        assert_eq!(serialize_json(json!("#ff0000")), "#ff0000");
        assert_eq!(serialize_json(json!("Helvetica, sans-serif")), "Helvetica, sans-serif");
        assert_eq!(serialize_json(json!(true)), "true");
        assert_eq!(serialize_json(json!(false)), "false");
        assert_eq!(serialize_json(json!(null)), "null");
    }

    #[test]
    fn test_serialize_numbers() {
        assert_eq!(serialize_json(json!(42)), "42");
        assert_eq!(serialize_json(json!(-7)), "-7");
        assert_eq!(serialize_json(json!(1.5)), "1.5");
        assert_eq!(serialize_json(json!(1.0)), "1");
        assert_eq!(serialize_json(json!(0.25)), "0.25");
    }

    #[test]
    fn test_serialize_numbers_exponent_form() {
        assert_eq!(serialize_json(json!(1e-7)), "1e-7");
        assert_eq!(serialize_json(json!(-2.5e-8)), "-2.5e-8");
        assert_eq!(serialize_json(json!(1e21)), "1e+21");
        assert_eq!(serialize_json(json!(1.5e22)), "1.5e+22");
        assert_eq!(serialize_json(json!(0.000001)), "0.000001");
        assert_eq!(serialize_json(json!(1e20)), "100000000000000000000");
        assert_eq!(serialize_json(json!(-0.0)), "0");
    }

    #[test]
    fn test_serialize_null_list_element() {
        assert_eq!(serialize_json(json!([1, null])), "(1,null)");
    }

    #[test]
    fn test_serialize_nested() {
        let value = json!({
            "breakpoints": {"sm": "576px", "md": "768px"},
            "spacers": [0, 4, 8]
        });
        assert_eq!(
            serialize_json(value),
            "(breakpoints: (sm: 576px,md: 768px),spacers: (0,4,8))"
        );
    }

    #[test]
    fn test_nesting_depth_round_trips() {
        let values = vec![
            json!([1, [2, [3, [4]]]]),
            json!({"a": {"b": {"c": []}}}),
            json!({"list": [{"x": [1]}], "flat": 1}),
        ];

        for value in values {
            let sass = SassValue::from(value);
            let text = serialize_value(&sass).unwrap();
            assert_eq!(paren_depth(&text), sass.depth(), "depth mismatch for {}", text);
        }
    }

    #[test]
    fn test_runaway_nesting_is_rejected() {
        let mut value = SassValue::Number(1.into());
        for _ in 0..(MAX_DEPTH + 10) {
            value = SassValue::List(vec![value]);
        }

        let err = serialize_value(&value).unwrap_err();
        assert!(matches!(err, Json2SassError::CyclicStructure { max_depth } if max_depth == MAX_DEPTH));
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let mut value = SassValue::Null;
        for _ in 0..MAX_DEPTH {
            value = SassValue::List(vec![value]);
        }

        let text = serialize_value(&value).unwrap();
        assert!(text.starts_with("(((("));
        assert!(text.contains("null"));
    }

    #[test]
    fn test_transform_document_preserves_order() {
        let json: JsonValue = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        assert_eq!(transform_json(&json).unwrap(), "$b: 1;\n$a: 2;");
    }

    #[test]
    fn test_transform_document_one_line_per_key() {
        let json = json!({
            "primary": "#007bff",
            "font-stack": "Helvetica, sans-serif",
            "sizes": [12, 14, 16],
            "theme": {"dark": true},
            "unset": null
        });

        let output = transform_json(&json).unwrap();
        let lines: Vec<&str> = output.split('\n').collect();

        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert!(line.starts_with('$'), "line {:?}", line);
            assert!(line.ends_with(';'), "line {:?}", line);
        }
        assert_eq!(lines[0], "$primary: #007bff;");
        assert_eq!(lines[2], "$sizes: (12,14,16);");
        assert_eq!(lines[3], "$theme: (dark: true);");
        assert_eq!(lines[4], "$unset: null;");
    }

    #[test]
    fn test_transform_empty_document() {
        assert_eq!(transform_json(&json!({})).unwrap(), "");
        assert_eq!(transform_document(&[]).unwrap(), "");
    }

    #[test]
    fn test_transform_rejects_non_object() {
        let err = transform_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, Json2SassError::NotAMapping("array")));
    }
}
