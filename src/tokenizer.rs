//! Turns html5ever's token stream into balanced open/self-close/close/text events.
//!
//! The html5ever tokenizer reports tags exactly as written, so end tags may be missing, stray,
//! or out of order. [`EventDispatcher`] keeps its own stack of open elements so that every
//! `open` reaching a [`TokenHandler`] is matched by exactly one `close` at the right depth.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use html5ever::LocalName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: LocalName,
    pub value: StrTendril,
}

pub trait TokenHandler {
    fn open(&mut self, tag: &LocalName, attrs: &[Attribute]);
    fn self_close(&mut self, tag: &LocalName, attrs: &[Attribute]);
    fn close(&mut self, tag: &LocalName);
    fn text(&mut self, chars: &str);
}

/// Elements that never have contents, including obsolete ones browsers still parse as void.
pub fn is_void_element(tag: &LocalName) -> bool {
    matches!(
        &**tag,
        "area"
            | "base"
            | "basefont"
            | "bgsound"
            | "br"
            | "col"
            | "command"
            | "embed"
            | "frame"
            | "hr"
            | "image"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose contents html5ever passes through verbatim, with no markup and no character
/// references, and which are therefore serialized without escaping.
///
/// Whether a browser parses `noscript`, `noembed` and `noframes` as markup depends on its
/// settings. Allowing any of them writes their contents unescaped, which may re-parse as tags.
pub fn is_raw_text_element(tag: &LocalName) -> bool {
    matches!(
        *tag,
        local_name!("script")
            | local_name!("style")
            | local_name!("xmp")
            | local_name!("iframe")
            | local_name!("noembed")
            | local_name!("noframes")
            | local_name!("noscript")
            | local_name!("plaintext")
    )
}

pub struct EventDispatcher<H> {
    handler: RefCell<H>,
    open_elements: RefCell<Vec<LocalName>>,
}

impl<H: TokenHandler> EventDispatcher<H> {
    pub fn new(handler: H) -> EventDispatcher<H> {
        EventDispatcher {
            handler: RefCell::new(handler),
            open_elements: RefCell::new(Vec::new()),
        }
    }

    /// Closes everything still open at the end of the input and hands back the handler.
    pub fn finish(self) -> H {
        let mut handler = self.handler.into_inner();
        for tag in self.open_elements.into_inner().iter().rev() {
            handler.close(tag);
        }
        handler
    }

    fn start_tag(&self, tag: Tag) -> TokenSinkResult<()> {
        let attrs: Vec<Attribute> = tag
            .attrs
            .into_iter()
            .map(|attr| Attribute {
                name: attr.name.local,
                value: attr.value,
            })
            .collect();

        if is_void_element(&tag.name) {
            self.handler.borrow_mut().self_close(&tag.name, &attrs);
            return TokenSinkResult::Continue;
        }

        self.handler.borrow_mut().open(&tag.name, &attrs);
        self.open_elements.borrow_mut().push(tag.name.clone());

        match tag.name {
            local_name!("script") => TokenSinkResult::RawData(RawKind::ScriptData),
            local_name!("style")
            | local_name!("xmp")
            | local_name!("iframe")
            | local_name!("noembed")
            | local_name!("noframes")
            | local_name!("noscript") => TokenSinkResult::RawData(RawKind::Rawtext),
            local_name!("title") | local_name!("textarea") => {
                TokenSinkResult::RawData(RawKind::Rcdata)
            }
            local_name!("plaintext") => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&self, tag: &LocalName, line_number: u64) {
        if is_void_element(tag) {
            debug!("line {}: ignoring end tag of void element </{}>", line_number, tag);
            return;
        }

        let mut open_elements = self.open_elements.borrow_mut();
        let position = match open_elements.iter().rposition(|open| open == tag) {
            Some(position) => position,
            None => {
                debug!("line {}: ignoring unmatched end tag </{}>", line_number, tag);
                return;
            }
        };

        let mut handler = self.handler.borrow_mut();
        for unclosed in open_elements.drain(position..).rev() {
            if &unclosed != tag {
                trace!("line {}: </{}> implicitly closes <{}>", line_number, tag, unclosed);
            }
            handler.close(&unclosed);
        }
    }
}

impl<H: TokenHandler> TokenSink for EventDispatcher<H> {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(tag),
                TagKind::EndTag => self.end_tag(&tag.name, line_number),
            },
            Token::CharacterTokens(text) => self.handler.borrow_mut().text(&text),
            Token::ParseError(error) => trace!("line {}: parse error: {}", line_number, error),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Runs `html` through the html5ever tokenizer, feeding balanced events to `handler`.
pub fn tokenize<H: TokenHandler>(html: &str, handler: H) -> H {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(EventDispatcher::new(handler), TokenizerOpts::default());
    // The sink never asks to pause for a script, so one feed consumes the whole input.
    let result = tokenizer.feed(&input);
    debug_assert!(matches!(result, TokenizerResult::Done));
    tokenizer.end();
    tokenizer.sink.finish()
}
