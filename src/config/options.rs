use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::sync::Arc;

use html5ever::LocalName;
use serde::Deserialize;

use crate::config::default::DEFAULT_CONFIG;
use crate::config::{Filter, FilterToken, SanitizerConfig};
use crate::error::Result;

const CATCH_ALL: &str = "*";

/// A partial configuration. Every option that is set replaces the corresponding field of the
/// base configuration as a whole; nothing is merged element by element.
///
/// Deserializes from the JSON shape `sanitize-markdown` users already write:
///
/// ```json
/// {
///   "allowedTags": ["div", "a"],
///   "allowedAttributes": { "*": ["id"], "a": ["href"] },
///   "allowedClasses": { "div": ["note"] },
///   "allowedSchemes": ["https"]
/// }
/// ```
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SanitizerOptions {
    pub allowed_tags: Option<Vec<String>>,
    pub allowed_attributes: Option<HashMap<String, Vec<String>>>,
    pub allowed_classes: Option<HashMap<String, Vec<String>>>,
    pub allowed_schemes: Option<Vec<String>>,
    pub url_attributes: Option<Vec<String>>,
    #[serde(skip)]
    pub filter: Option<Filter>,
}

impl SanitizerOptions {
    pub fn from_reader(reader: impl Read) -> Result<SanitizerOptions> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<SanitizerOptions> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_filter<F>(mut self, filter: F) -> SanitizerOptions
    where
        F: Fn(&FilterToken) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Builds the configuration for one sanitize call. With `strict` the options are the whole
    /// configuration and anything unset stays empty; otherwise they override
    /// [`DEFAULT_CONFIG`].
    pub fn resolve(self, strict: bool) -> SanitizerConfig {
        let mut config = if strict {
            SanitizerConfig::empty()
        } else {
            DEFAULT_CONFIG.clone()
        };

        if let Some(tags) = self.allowed_tags {
            config.allowed_tags = tags.iter().map(|tag| LocalName::from(&**tag)).collect();
        }
        if let Some(attributes) = self.allowed_attributes {
            let (catch_all, per_element) = split_catch_all(attributes, |name| LocalName::from(name));
            config.allowed_attributes = catch_all.unwrap_or_default();
            config.allowed_attributes_per_element = per_element;
        }
        if let Some(classes) = self.allowed_classes {
            let (catch_all, per_element) = split_catch_all(classes, str::to_string);
            config.allowed_classes = catch_all;
            config.allowed_classes_per_element = per_element;
        }
        if let Some(schemes) = self.allowed_schemes {
            config.allowed_schemes = schemes.into_iter().collect();
        }
        if let Some(names) = self.url_attributes {
            config.url_attributes = names.iter().map(|name| LocalName::from(&**name)).collect();
        }
        if self.filter.is_some() {
            config.filter = self.filter;
        }

        config
    }
}

fn split_catch_all<T, F>(
    rules: HashMap<String, Vec<String>>,
    convert: F,
) -> (Option<HashSet<T>>, HashMap<LocalName, HashSet<T>>)
where
    T: Eq + std::hash::Hash,
    F: Fn(&str) -> T,
{
    let mut catch_all = None;
    let mut per_element = HashMap::new();
    for (tag, values) in rules {
        let values: HashSet<T> = values.iter().map(|value| convert(value)).collect();
        if tag == CATCH_ALL {
            catch_all = Some(values);
        } else {
            per_element.insert(LocalName::from(tag), values);
        }
    }
    (catch_all, per_element)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_options_resolve_to_defaults() {
        let config = SanitizerOptions::default().resolve(false);
        assert_eq!(config.allowed_tags, DEFAULT_CONFIG.allowed_tags);
        assert_eq!(config.allowed_schemes, DEFAULT_CONFIG.allowed_schemes);
        assert!(config.filter.is_none());
    }

    #[test]
    fn strict_options_start_from_nothing() {
        let options = SanitizerOptions {
            allowed_tags: Some(vec!["p".to_string()]),
            ..SanitizerOptions::default()
        };
        let config = options.resolve(true);
        assert_eq!(config.allowed_tags, hashset! { local_name!("p") });
        assert!(config.allowed_attributes_per_element.is_empty());
        assert!(config.allowed_schemes.is_empty());
        assert!(config.is_url_attribute(&local_name!("href")));
    }

    #[test]
    fn set_options_replace_default_fields_whole() {
        let options = SanitizerOptions {
            allowed_attributes: Some(hashmap! { "div".to_string() => vec!["b".to_string()] }),
            ..SanitizerOptions::default()
        };
        let config = options.resolve(false);
        assert_eq!(config.allowed_tags, DEFAULT_CONFIG.allowed_tags);
        assert!(!config.is_attribute_allowed(&local_name!("a"), &local_name!("href")));
        assert!(config.is_attribute_allowed(&local_name!("div"), &LocalName::from("b")));
    }

    #[test]
    fn parses_json_with_catch_all_keys() {
        let options = SanitizerOptions::from_json(
            r#"{
                "allowedTags": ["div"],
                "allowedAttributes": { "*": ["id", "class"], "div": ["title"] },
                "allowedClasses": { "*": ["note"] },
                "allowedSchemes": ["https"]
            }"#,
        )
        .unwrap();
        let config = options.resolve(true);

        assert_eq!(config.allowed_tags, hashset! { local_name!("div") });
        assert_eq!(
            config.allowed_attributes,
            hashset! { local_name!("id"), local_name!("class") }
        );
        assert!(config.is_attribute_allowed(&local_name!("div"), &local_name!("title")));
        assert_eq!(
            config.allowed_classes,
            Some(hashset! { "note".to_string() })
        );
        assert!(config.allowed_classes_per_element.is_empty());
        assert_eq!(config.allowed_schemes, hashset! { "https".to_string() });
    }

    #[test]
    fn url_attributes_replace_the_default_set() {
        let options =
            SanitizerOptions::from_json(r#"{ "urlAttributes": ["data-src", "href"] }"#).unwrap();
        let config = options.resolve(false);
        assert_eq!(
            config.url_attributes,
            hashset! { LocalName::from("data-src"), local_name!("href") }
        );
        assert!(!config.is_url_attribute(&local_name!("src")));
        assert!(config.is_url_attribute(&LocalName::from("data-src")));
    }

    #[test]
    fn filter_is_carried_into_the_config() {
        let config = SanitizerOptions::default()
            .with_filter(|token| token.attr("id").is_some())
            .resolve(true);
        assert!(config.filter.is_some());
    }

    #[test]
    fn rejects_unknown_options() {
        assert!(SanitizerOptions::from_json(r#"{ "allowedTag": ["div"] }"#).is_err());
    }
}
