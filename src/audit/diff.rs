//! Human-readable diffs between two record snapshots

use serde_json::Value;

const MAX_STRING_LEN: usize = 50;

/// Describe what changed between two JSON snapshots
///
/// Nested objects are walked with dotted keys (`grades.Algebra`). Arrays are
/// compared as sets and reported as added and removed members.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let field = join_key(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &field, changes),
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        field,
                        format_value(before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_key(prefix, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        (Value::Array(before_arr), Value::Array(after_arr)) => {
            let mut members: Vec<String> = after_arr
                .iter()
                .filter(|v| !before_arr.contains(v))
                .map(|v| format!("+{}", format_value(v)))
                .collect();
            members.extend(
                before_arr
                    .iter()
                    .filter(|v| !after_arr.contains(v))
                    .map(|v| format!("-{}", format_value(v))),
            );

            if !members.is_empty() {
                changes.push(format!("{}: {}", prefix, members.join(" ")));
            }
        }
        _ => {
            if before != after {
                changes.push(format!(
                    "{}: {} -> {}",
                    prefix,
                    format_value(before),
                    format_value(after)
                ));
            }
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_STRING_LEN {
                let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
