use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use html5ever::LocalName;

use crate::tokenizer::Attribute;

pub mod default;
pub mod options;

/// Decides per tag occurrence whether an otherwise allowed tag is emitted. Returning `false`
/// drops the tag together with everything nested inside it.
pub type Filter = Arc<dyn Fn(&FilterToken) -> bool + Send + Sync>;

/// The tag occurrence handed to a [`Filter`], with its attributes exactly as they were parsed.
#[derive(Debug, Clone, Copy)]
pub struct FilterToken<'a> {
    pub tag: &'a LocalName,
    pub attrs: &'a [Attribute],
}

impl<'a> FilterToken<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|attr| &*attr.name == name)
            .map(|attr| &*attr.value)
    }
}

#[derive(Clone)]
pub struct SanitizerConfig {
    pub allowed_tags: HashSet<LocalName>,
    /// Attributes allowed on every element (the `*` rule).
    pub allowed_attributes: HashSet<LocalName>,
    pub allowed_attributes_per_element: HashMap<LocalName, HashSet<LocalName>>,
    /// Class names allowed on every element. `None` when there is no `*` rule at all, which
    /// differs from `Some` of an empty set: the latter still lets `class` through the class
    /// filter (where every token is then dropped).
    pub allowed_classes: Option<HashSet<String>>,
    pub allowed_classes_per_element: HashMap<LocalName, HashSet<String>>,
    pub allowed_schemes: HashSet<String>,
    /// Attributes whose values are URLs and must pass the scheme check.
    pub url_attributes: HashSet<LocalName>,
    pub filter: Option<Filter>,
}

impl SanitizerConfig {
    /// A configuration that allows nothing. URL attributes keep their defaults so that allowing
    /// `href` later does not silently skip the scheme check.
    pub fn empty() -> SanitizerConfig {
        SanitizerConfig {
            allowed_tags: HashSet::new(),
            allowed_attributes: HashSet::new(),
            allowed_attributes_per_element: HashMap::new(),
            allowed_classes: None,
            allowed_classes_per_element: HashMap::new(),
            allowed_schemes: HashSet::new(),
            url_attributes: default::URL_ATTRIBUTES.clone(),
            filter: None,
        }
    }

    pub fn with_filter<F>(mut self, filter: F) -> SanitizerConfig
    where
        F: Fn(&FilterToken) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn is_tag_allowed(&self, tag: &LocalName) -> bool {
        self.allowed_tags.contains(tag)
    }

    pub fn is_attribute_allowed(&self, tag: &LocalName, name: &LocalName) -> bool {
        self.allowed_attributes.contains(name)
            || self
                .allowed_attributes_per_element
                .get(tag)
                .map_or(false, |names| names.contains(name))
    }

    pub fn has_class_rules(&self, tag: &LocalName) -> bool {
        self.allowed_classes.is_some() || self.allowed_classes_per_element.contains_key(tag)
    }

    pub fn is_class_allowed(&self, tag: &LocalName, class: &str) -> bool {
        self.allowed_classes
            .as_ref()
            .map_or(false, |classes| classes.contains(class))
            || self
                .allowed_classes_per_element
                .get(tag)
                .map_or(false, |classes| classes.contains(class))
    }

    pub fn is_url_attribute(&self, name: &LocalName) -> bool {
        self.url_attributes.contains(name)
    }
}
