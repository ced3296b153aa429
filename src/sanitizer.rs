use std::io::{Read, Write};

use crate::config::SanitizerConfig;
use crate::error::Result;
use crate::handler::SanitizingHandler;
use crate::tokenizer::tokenize;

pub struct Sanitizer<'config> {
    config: &'config SanitizerConfig,
}

impl<'config> Sanitizer<'config> {
    pub fn new(config: &'config SanitizerConfig) -> Sanitizer<'config> {
        Sanitizer { config }
    }

    pub fn sanitize_str(&self, html: &str) -> String {
        tokenize(html, SanitizingHandler::new(self.config)).into_output()
    }

    pub fn sanitize_fragment(&self, input: &mut impl Read, output: &mut impl Write) -> Result<()> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let html = String::from_utf8(bytes)?;
        output.write_all(self.sanitize_str(&html).as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io;

    use html5ever::LocalName;

    use crate::config::default::DEFAULT_CONFIG;
    use crate::error::Error;

    struct MockRead {
        contents: &'static [u8],
    }

    impl MockRead {
        fn new(contents: &'static str) -> MockRead {
            MockRead {
                contents: contents.as_bytes(),
            }
        }
    }

    impl Read for MockRead {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Ok(1)
        }

        fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
            buf.extend_from_slice(self.contents);
            Ok(self.contents.len())
        }
    }

    fn config_allowing(tags: &[&str]) -> SanitizerConfig {
        let mut config = SanitizerConfig::empty();
        config
            .allowed_tags
            .extend(tags.iter().map(|tag| LocalName::from(*tag)));
        config
    }

    fn sanitize_fragment(config: &SanitizerConfig, html: &'static str) -> String {
        let sanitizer = Sanitizer::new(config);
        let mut mock_data = MockRead::new(html);
        let mut output = vec![];
        sanitizer
            .sanitize_fragment(&mut mock_data, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn disallow_all_elements() {
        let config = SanitizerConfig::empty();
        assert_eq!(sanitize_fragment(&config, "<div><!-- remove me --></div>"), "");
    }

    #[test]
    fn remove_html_comments() {
        let config = config_allowing(&["div"]);
        assert_eq!(
            sanitize_fragment(&config, "<div><!-- remove me --></div>"),
            "<div></div>"
        );
    }

    #[test]
    fn remove_script_elements_and_contents() {
        let config = config_allowing(&["div"]);
        assert_eq!(
            sanitize_fragment(&config, "<div><script>alert('haX0rz')</script></div>"),
            "<div></div>"
        );
    }

    #[test]
    fn remove_script_element_siblings() {
        let config = config_allowing(&["div"]);
        assert_eq!(
            sanitize_fragment(
                &config,
                "<div><script>alert('haX0rz')</script><script>two</script></div>"
            ),
            "<div></div>"
        );
    }

    #[test]
    fn remove_script_element_in_separate_sub_trees() {
        let config = config_allowing(&["div"]);
        assert_eq!(
            sanitize_fragment(
                &config,
                "<div><script>alert('haX0rz')</script>one</div><div><script>two</script>two</div>"
            ),
            "<div>one</div><div>two</div>"
        );
    }

    #[test]
    fn script_markup_is_not_parsed_as_tags() {
        assert_eq!(
            sanitize_fragment(&DEFAULT_CONFIG, "<script>'<div>'</script><div>ok</div>"),
            "<div>ok</div>"
        );
    }

    #[test]
    fn rejects_invalid_utf8() {
        struct InvalidUtf8;

        impl Read for InvalidUtf8 {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Ok(0)
            }

            fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
                buf.extend_from_slice(&[0x3c, 0xff, 0xfe]);
                Ok(3)
            }
        }

        let sanitizer = Sanitizer::new(&DEFAULT_CONFIG);
        let mut output = vec![];
        let result = sanitizer.sanitize_fragment(&mut InvalidUtf8, &mut output);
        assert!(matches!(result, Err(Error::Utf8(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn sanitize_str_matches_sanitize_fragment() {
        let html = r#"<p>a <a href="javascript:alert(1)" title="t">link</a></p>"#;
        let sanitizer = Sanitizer::new(&DEFAULT_CONFIG);
        assert_eq!(
            sanitizer.sanitize_str(html),
            sanitize_fragment(&DEFAULT_CONFIG, html)
        );
        assert_eq!(
            sanitizer.sanitize_str(html),
            r#"<p>a <a title="t">link</a></p>"#
        );
    }
}
