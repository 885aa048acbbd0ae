//! Environment-variable transport for override documents.
//!
//! Some platforms cap the length of a single environment variable, so a
//! document may be split across `NAME_1`, `NAME_2`, ... and reassembled here.

/// Read a document from `var`, or concatenate its numbered chunks.
///
/// Returns `None` when neither the variable nor its first chunk is set.
pub(crate) fn read_env_document<F>(var: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(contents) = lookup(var) {
        return Some(contents);
    }
    let mut contents = String::new();
    let mut index = 1;
    while let Some(chunk) = lookup(&format!("{var}_{index}")) {
        contents.push_str(&chunk);
        index += 1;
    }
    if index == 1 { None } else { Some(contents) }
}

/// Split a document into `(name, chunk)` pairs no longer than `max_len` bytes,
/// for hosts that pass overrides to a child process through its environment.
///
/// Chunks never split a UTF-8 character. `max_len` values below 4 are raised
/// to 4 so every character fits.
pub fn split_env_document(var: &str, contents: &str, max_len: usize) -> Vec<(String, String)> {
    let max_len = max_len.max(4);
    let mut chunks = Vec::new();
    let mut rest = contents;
    while !rest.is_empty() {
        let mut end = rest.len().min(max_len);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push((format!("{var}_{}", chunks.len() + 1), chunk.to_string()));
        rest = tail;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn whole_variable_takes_precedence_over_chunks() {
        let vars = HashMap::from([("MASK_CONFIG", "{}"), ("MASK_CONFIG_1", "{ a: 1 }")]);
        let found = read_env_document("MASK_CONFIG", &|name: &str| {
            vars.get(name).map(|value| value.to_string())
        });
        assert_eq!(found.as_deref(), Some("{}"));
    }

    #[test]
    fn chunks_stop_at_first_gap() {
        let vars = HashMap::from([
            ("MASK_CONFIG_1", "ab"),
            ("MASK_CONFIG_2", "cd"),
            ("MASK_CONFIG_4", "zz"),
        ]);
        let found = read_env_document("MASK_CONFIG", &|name: &str| {
            vars.get(name).map(|value| value.to_string())
        });
        assert_eq!(found.as_deref(), Some("abcd"));
    }

    #[test]
    fn split_respects_char_boundaries() {
        let doc = r#"{ "locale:region": "Ålesund" }"#;
        let chunks = split_env_document("MASK_CONFIG", doc, 21);
        assert!(chunks.iter().all(|(_, chunk)| chunk.len() <= 21));
        assert_eq!(chunks[0].0, "MASK_CONFIG_1");
        let vars: HashMap<String, String> = chunks.into_iter().collect();
        let joined = read_env_document("MASK_CONFIG", &|name: &str| vars.get(name).cloned());
        assert_eq!(joined.as_deref(), Some(doc));
    }
}
