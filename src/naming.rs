//! Name derivation
//!
//! Pure string transformations turning a table name such as `gen_test_demo`
//! into the type names, module signs and mapping paths used by the generators.
//!
//! A table name is read as `<domain>_<sign>_<segment>...`:
//!
//! | table           | sign   | default model name | upper camel     |
//! |-----------------|--------|--------------------|-----------------|
//! | `gen_test_demo` | `test` | `Demo`             | `GenTestDemo`   |
//! | `sys_area`      | `area` | *(empty)*          | `SysArea`       |

use crate::error::{Result, ScaffoldError};

/// Upper-case the first character, leave the rest untouched
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-case the first character, leave the rest untouched
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// `gen_test_demo` → `GenTestDemo`
pub fn to_upper_camel(table_name: &str) -> String {
    table_name
        .to_lowercase()
        .split('_')
        .map(upper_first)
        .collect()
}

/// `gen_test_demo` → `genTestDemo`
pub fn to_lower_camel(table_name: &str) -> String {
    lower_first(&to_upper_camel(table_name))
}

/// `GenTestDemo` → `gen_test_demo`
///
/// Every upper-case character after the first starts a new word, so
/// `IDemo` becomes `i_demo` and converts back to `IDemo`.
pub fn upper_camel_to_lower_underscore(model_name: &str) -> String {
    let mut out = String::with_capacity(model_name.len() + 4);
    for (i, c) in model_name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// `gen_test_demo` → `gen/test/demo`; a name without underscores is a single segment
pub fn table_path_from_name(table_name: &str) -> String {
    let lower = table_name.to_lowercase();
    if lower.contains('_') {
        lower.replace('_', "/")
    } else {
        lower
    }
}

/// `GenTestDemo` → `gen/test/demo`
pub fn path_from_model_name(model_name: &str) -> String {
    table_path_from_name(&upper_camel_to_lower_underscore(model_name))
}

/// Module sign: the second underscore-delimited segment, returned as written
pub fn extract_sign(table_name: &str) -> Result<String> {
    let segments = split_table_name(table_name)?;
    Ok(segments[1].to_string())
}

/// Default model name: every segment after the domain and the sign, capitalized
///
/// `gen_test_demo_extra` → `DemoExtra`. A two-segment name yields an empty string.
pub fn default_model_name(table_name: &str) -> Result<String> {
    let segments = split_table_name(table_name)?;
    Ok(segments[2..]
        .iter()
        .map(|s| upper_first(&s.to_lowercase()))
        .collect())
}

/// Last segment of a fully-qualified class name: `com.demo.core.Mapper` → `Mapper`
pub fn simple_name(reference: &str) -> &str {
    reference.rsplit('.').next().unwrap_or(reference)
}

fn split_table_name(table_name: &str) -> Result<Vec<&str>> {
    let mut segments: Vec<&str> = table_name.split('_').collect();
    // trailing separators do not open a segment
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if !table_name.contains('_') || segments.len() < 2 {
        return Err(ScaffoldError::MalformedTableName(table_name.to_string()));
    }
    Ok(segments)
}
