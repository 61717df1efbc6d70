//! Phase 3: Serializer
//!
//! Converts a [`Value`] tree back into JSON text. Output is pretty
//! printed: every non-empty container spans multiple lines with one
//! element per line, indented by repeating the caller-supplied unit.
//! Empty containers collapse to `[]` and `{}`.

use crate::value::Value;

/// Serialize `value` as pretty-printed JSON.
///
/// `indent_unit` is the string repeated once per nesting level,
/// typically `"  "` or `"\t"`. The result carries no trailing newline.
///
/// Non-finite numbers have no JSON spelling and are written as `null`.
pub fn serialize(value: &Value, indent_unit: &str) -> String {
    let mut out = String::new();
    write_value(value, indent_unit, 0, &mut out);
    out
}

fn write_value(value: &Value, unit: &str, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(*n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(unit, depth + 1, out);
                write_value(item, unit, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(unit, depth, out);
            out.push(']');
        }
        Value::Object(pairs) => {
            if pairs.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (i, (key, item)) in pairs.iter().enumerate() {
                push_indent(unit, depth + 1, out);
                write_string(key, out);
                out.push_str(": ");
                write_value(item, unit, depth + 1, out);
                if i + 1 < pairs.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(unit, depth, out);
            out.push('}');
        }
    }
}

fn write_number(n: f64, out: &mut String) {
    if n.is_finite() {
        out.push_str(&format!("{}", n));
    } else {
        out.push_str("null");
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(unit: &str, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(unit);
    }
}
