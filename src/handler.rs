use html5ever::LocalName;

use crate::attributes::filter_attributes;
use crate::config::{FilterToken, SanitizerConfig};
use crate::tokenizer::{is_raw_text_element, Attribute, TokenHandler};

struct Frame {
    tag: LocalName,
    /// The tag was written out, so its end tag must be too.
    admitted: bool,
    /// Nothing inside this element is written out. Set when the element itself or any
    /// ancestor was not admitted.
    suppressed: bool,
}

/// Consumes tokenizer events and writes out the allowed subset of them.
///
/// Suppression is decided when an element opens, before anything inside it is seen, so output
/// is only ever appended to.
pub struct SanitizingHandler<'config> {
    config: &'config SanitizerConfig,
    stack: Vec<Frame>,
    output: String,
    /// An admitted `plaintext` element is open. The tokenizer reads the rest of the input as
    /// its text, so no end tag written after it would parse as one.
    in_plaintext: bool,
}

impl<'config> SanitizingHandler<'config> {
    pub fn new(config: &'config SanitizerConfig) -> SanitizingHandler<'config> {
        SanitizingHandler {
            config,
            stack: Vec::new(),
            output: String::new(),
            in_plaintext: false,
        }
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn parent_suppressed(&self) -> bool {
        self.stack.last().map_or(false, |frame| frame.suppressed)
    }

    fn admit(&self, tag: &LocalName, attrs: &[Attribute]) -> bool {
        if !self.config.is_tag_allowed(tag) {
            debug!("dropping <{}> and its contents: tag not allowed", tag);
            return false;
        }

        if let Some(filter) = &self.config.filter {
            if !filter(&FilterToken { tag, attrs }) {
                debug!("dropping <{}> and its contents: rejected by filter", tag);
                return false;
            }
        }

        true
    }

    fn write_start_tag(&mut self, tag: &LocalName, attrs: &[Attribute], self_closing: bool) {
        self.output.push('<');
        self.output.push_str(tag);
        for attr in filter_attributes(tag, attrs, self.config) {
            self.output.push(' ');
            self.output.push_str(&attr.name);
            if !attr.value.is_empty() {
                self.output.push_str("=\"");
                self.output.push_str(&htmlize::escape_attribute(&*attr.value));
                self.output.push('"');
            }
        }
        if self_closing {
            self.output.push('/');
        }
        self.output.push('>');
    }
}

impl<'config> TokenHandler for SanitizingHandler<'config> {
    fn open(&mut self, tag: &LocalName, attrs: &[Attribute]) {
        let admitted = !self.parent_suppressed() && self.admit(tag, attrs);
        if admitted {
            self.write_start_tag(tag, attrs, false);
            if *tag == local_name!("plaintext") {
                self.in_plaintext = true;
            }
        }
        self.stack.push(Frame {
            tag: tag.clone(),
            admitted,
            suppressed: !admitted,
        });
    }

    fn self_close(&mut self, tag: &LocalName, attrs: &[Attribute]) {
        if !self.parent_suppressed() && self.admit(tag, attrs) {
            self.write_start_tag(tag, attrs, true);
        }
    }

    fn close(&mut self, tag: &LocalName) {
        let frame = match self.stack.pop() {
            Some(frame) => frame,
            None => return,
        };
        debug_assert_eq!(&frame.tag, tag);

        if frame.admitted && !self.in_plaintext {
            self.output.push_str("</");
            self.output.push_str(&frame.tag);
            self.output.push('>');
        }
    }

    fn text(&mut self, chars: &str) {
        match self.stack.last() {
            Some(frame) if frame.suppressed => {}
            Some(frame) if is_raw_text_element(&frame.tag) => self.output.push_str(chars),
            _ => self.output.push_str(&htmlize::escape_text(chars)),
        }
    }
}
