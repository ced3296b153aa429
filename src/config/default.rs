use std::collections::{HashMap, HashSet};

use html5ever::LocalName;

use crate::config::SanitizerConfig;

lazy_static! {
    pub static ref URL_ATTRIBUTES: HashSet<LocalName> = hashset! {
        local_name!("action"),
        local_name!("background"),
        local_name!("cite"),
        LocalName::from("formaction"),
        local_name!("href"),
        local_name!("longdesc"),
        LocalName::from("poster"),
        local_name!("src"),
        local_name!("usemap"),
        LocalName::from("xlink:href"),
    };
    pub static ref DEFAULT_CONFIG: SanitizerConfig = SanitizerConfig {
        allowed_tags: hashset! {
            local_name!("a"),
            local_name!("abbr"),
            local_name!("article"),
            local_name!("b"),
            local_name!("blockquote"),
            local_name!("br"),
            local_name!("caption"),
            local_name!("code"),
            local_name!("del"),
            local_name!("details"),
            local_name!("div"),
            local_name!("em"),
            local_name!("h1"),
            local_name!("h2"),
            local_name!("h3"),
            local_name!("h4"),
            local_name!("h5"),
            local_name!("h6"),
            local_name!("hr"),
            local_name!("i"),
            local_name!("img"),
            local_name!("ins"),
            local_name!("kbd"),
            local_name!("li"),
            local_name!("main"),
            local_name!("mark"),
            local_name!("ol"),
            local_name!("p"),
            local_name!("pre"),
            local_name!("section"),
            local_name!("span"),
            local_name!("strike"),
            local_name!("strong"),
            local_name!("sub"),
            local_name!("summary"),
            local_name!("sup"),
            local_name!("table"),
            local_name!("tbody"),
            local_name!("td"),
            local_name!("th"),
            local_name!("thead"),
            local_name!("tr"),
            local_name!("u"),
            local_name!("ul"),
        },
        allowed_attributes: HashSet::new(),
        allowed_attributes_per_element: hashmap! {
            local_name!("a") => hashset! {
                local_name!("href"),
                local_name!("name"),
                local_name!("target"),
                local_name!("title"),
                LocalName::from("aria-label"),
            },
            // iframe is not an allowed tag by default; these apply once a caller allows it.
            local_name!("iframe") => hashset! {
                LocalName::from("allowfullscreen"),
                local_name!("frameborder"),
                local_name!("src"),
            },
            local_name!("img") => hashset! {
                local_name!("src"),
                local_name!("alt"),
                local_name!("title"),
                LocalName::from("aria-label"),
            },
        },
        allowed_classes: None,
        allowed_classes_per_element: HashMap::new(),
        allowed_schemes: hashset! {
            "http".to_string(),
            "https".to_string(),
            "mailto".to_string(),
        },
        url_attributes: URL_ATTRIBUTES.clone(),
        filter: None,
    };
}
