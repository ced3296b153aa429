use html5ever::tendril::StrTendril;
use html5ever::LocalName;

use crate::config::SanitizerConfig;
use crate::scheme::is_safe_url;
use crate::tokenizer::Attribute;

/// Reduces the attributes of an admitted tag to the ones `config` allows, keeping their order.
pub fn filter_attributes(
    tag: &LocalName,
    attrs: &[Attribute],
    config: &SanitizerConfig,
) -> Vec<Attribute> {
    attrs
        .iter()
        .filter_map(|attr| filter_attribute(tag, attr, config))
        .collect()
}

fn filter_attribute(
    tag: &LocalName,
    attr: &Attribute,
    config: &SanitizerConfig,
) -> Option<Attribute> {
    let allowed = config.is_attribute_allowed(tag, &attr.name);

    if attr.name == local_name!("class") && !allowed {
        return filter_classes(tag, &attr.value, config).map(|value| Attribute {
            name: attr.name.clone(),
            value,
        });
    }

    if !allowed {
        trace!("dropping attribute {} on <{}>", attr.name, tag);
        return None;
    }

    if config.is_url_attribute(&attr.name) && !is_safe_url(&attr.value, &config.allowed_schemes) {
        debug!(
            "dropping attribute {} on <{}>: disallowed url scheme in {:?}",
            attr.name, tag, &*attr.value
        );
        return None;
    }

    Some(attr.clone())
}

/// Keeps the allowed class names of `value`. Returns `None` when the tag has no class rules or
/// when no class name survives.
fn filter_classes(tag: &LocalName, value: &str, config: &SanitizerConfig) -> Option<StrTendril> {
    if !config.has_class_rules(tag) {
        trace!("dropping attribute class on <{}>", tag);
        return None;
    }

    let classes: Vec<&str> = value
        .split_ascii_whitespace()
        .filter(|class| config.is_class_allowed(tag, class))
        .collect();

    if classes.is_empty() {
        None
    } else {
        Some(StrTendril::from(classes.join(" ")))
    }
}
