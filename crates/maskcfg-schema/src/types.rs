//! Declared property types and the small grammar used to write them.
//!
//! ```text
//! type  := alt ("|" alt)*
//! alt   := "str" | "int" | "uint" | "double" | "bool" | "dict"
//!        | "array" | "array<" type ">"
//! ```

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Expected type of a catalog property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Str,
    /// Any integer that fits in `i64`.
    Int,
    /// Any non-negative integer.
    Uint,
    /// Any number; integers are accepted where a double is expected.
    Double,
    Bool,
    /// An array, optionally with a declared element type.
    Array(Option<Box<PropertyType>>),
    Dict,
    /// Any of the listed alternatives.
    Union(Vec<PropertyType>),
}

impl PropertyType {
    /// Whether a JSON value has this type (element types included).
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Str => value.is_string(),
            Self::Int => value.is_i64(),
            Self::Uint => value.is_u64(),
            Self::Double => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Array(None) => value.is_array(),
            Self::Array(Some(element)) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.matches(item))),
            Self::Dict => value.is_object(),
            Self::Union(alternatives) => alternatives.iter().any(|alt| alt.matches(value)),
        }
    }

    /// Element type for typed arrays.
    pub fn element(&self) -> Option<&PropertyType> {
        match self {
            Self::Array(Some(element)) => Some(element),
            _ => None,
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err("empty type".to_string());
        }
        let alternatives = split_top_level(input)?;
        if alternatives.len() > 1 {
            return alternatives
                .into_iter()
                .map(parse_single)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Union);
        }
        parse_single(input)
    }
}

fn parse_single(input: &str) -> Result<PropertyType, String> {
    let input = input.trim();
    if let Some(inner) = input
        .strip_prefix("array<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        let element: PropertyType = inner.parse()?;
        return Ok(PropertyType::Array(Some(Box::new(element))));
    }
    match input {
        "str" => Ok(PropertyType::Str),
        "int" => Ok(PropertyType::Int),
        "uint" => Ok(PropertyType::Uint),
        "double" => Ok(PropertyType::Double),
        "bool" => Ok(PropertyType::Bool),
        "array" => Ok(PropertyType::Array(None)),
        "dict" => Ok(PropertyType::Dict),
        other => Err(format!("unknown type `{other}`")),
    }
}

/// Split on `|` outside of angle brackets.
fn split_top_level(input: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced `>` in `{input}`"))?;
            }
            '|' if depth == 0 => {
                parts.push(&input[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced `<` in `{input}`"));
    }
    parts.push(&input[start..]);
    Ok(parts)
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => f.write_str("str"),
            Self::Int => f.write_str("int"),
            Self::Uint => f.write_str("uint"),
            Self::Double => f.write_str("double"),
            Self::Bool => f.write_str("bool"),
            Self::Array(None) => f.write_str("array"),
            Self::Array(Some(element)) => write!(f, "array<{element}>"),
            Self::Dict => f.write_str("dict"),
            Self::Union(alternatives) => {
                for (idx, alt) in alternatives.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{alt}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_unions_and_nested_arrays() {
        let parsed: PropertyType = "array<str|dict>|bool".parse().expect("type");
        assert_eq!(
            parsed,
            PropertyType::Union(vec![
                PropertyType::Array(Some(Box::new(PropertyType::Union(vec![
                    PropertyType::Str,
                    PropertyType::Dict,
                ])))),
                PropertyType::Bool,
            ])
        );
        assert_eq!(parsed.to_string(), "array<str|dict>|bool");
    }

    #[test]
    fn rejects_unknown_and_unbalanced_types() {
        assert!("string".parse::<PropertyType>().is_err());
        assert!("array<str".parse::<PropertyType>().is_err());
        assert!("".parse::<PropertyType>().is_err());
    }

    #[test]
    fn numeric_matching_follows_representation() {
        assert!(PropertyType::Uint.matches(&json!(3)));
        assert!(!PropertyType::Uint.matches(&json!(-3)));
        assert!(PropertyType::Int.matches(&json!(-3)));
        assert!(!PropertyType::Int.matches(&json!(1.5)));
        assert!(PropertyType::Double.matches(&json!(3)));
        assert!(PropertyType::Int.matches(&json!(i64::MAX)));
        assert!(!PropertyType::Int.matches(&json!(u64::MAX)));
        assert!(PropertyType::Uint.matches(&json!(u64::MAX)));
    }

    #[test]
    fn typed_arrays_check_every_element() {
        let strings: PropertyType = "array<str>".parse().expect("type");
        assert!(strings.matches(&json!(["en-US", "en"])));
        assert!(strings.matches(&json!([])));
        assert!(!strings.matches(&json!(["en", 1])));
    }
}
