//! Locale override (`locale:*` keys plus `navigator.languages`).

use maskcfg_config::MaskConfig;
use serde::Serialize;

pub const LANGUAGE_KEY: &str = "locale:language";
pub const REGION_KEY: &str = "locale:region";
pub const SCRIPT_KEY: &str = "locale:script";
pub const LANGUAGES_KEY: &str = "navigator.languages";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Explicit `navigator.languages`; empty means "derive from the tag".
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl Locale {
    /// Read the locale; `None` without a non-empty `locale:language`.
    pub fn from_config(config: &MaskConfig) -> Option<Self> {
        let language = config
            .get_string(LANGUAGE_KEY)
            .filter(|language| !language.is_empty())?;
        Some(Self {
            language,
            region: config
                .get_string(REGION_KEY)
                .filter(|region| !region.is_empty()),
            script: config
                .get_string(SCRIPT_KEY)
                .filter(|script| !script.is_empty()),
            languages: config.get_list(LANGUAGES_KEY),
        })
    }

    /// BCP 47 tag, e.g. `zh-Hant-TW`.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        for part in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(part);
        }
        tag
    }

    /// Value for `navigator.languages`.
    pub fn navigator_languages(&self) -> Vec<String> {
        if self.languages.is_empty() {
            vec![self.tag()]
        } else {
            self.languages.clone()
        }
    }

    /// `Accept-Language` header with descending quality values.
    pub fn accept_language(&self) -> String {
        self.navigator_languages()
            .iter()
            .enumerate()
            .map(|(idx, language)| {
                if idx == 0 {
                    language.clone()
                } else {
                    let quality = (10 - idx.min(9)) as f64 / 10.0;
                    format!("{language};q={quality:.1}")
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskcfg_test_utils::overlay_from;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_tag_from_parts() {
        let config = overlay_from(
            r#"{ "locale:language": "zh", "locale:script": "Hant", "locale:region": "TW" }"#,
        );
        let locale = Locale::from_config(&config).expect("locale");
        assert_eq!(locale.tag(), "zh-Hant-TW");
        assert_eq!(locale.navigator_languages(), vec!["zh-Hant-TW".to_string()]);
    }

    #[test]
    fn explicit_languages_drive_accept_language() {
        let config = overlay_from(
            r#"{ "locale:language": "fi", "locale:region": "FI",
                 "navigator.languages": ["fi-FI", "fi", "en-US"] }"#,
        );
        let locale = Locale::from_config(&config).expect("locale");
        assert_eq!(locale.accept_language(), "fi-FI,fi;q=0.9,en-US;q=0.8");
    }

    #[test]
    fn language_is_required() {
        let config = overlay_from(r#"{ "locale:region": "FI", "locale:language": "" }"#);
        assert_eq!(Locale::from_config(&config), None);
    }
}
