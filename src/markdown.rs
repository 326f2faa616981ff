use pulldown_cmark::{html, Options, Parser};

/// Converts a markdown string into an HTML string. Content is trusted (it
/// comes from the author's own source files), so no sanitization happens
/// beyond what markdown itself requires.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(to_html("hello *world*"), "<p>hello <em>world</em></p>\n");
    }

    #[test]
    fn test_strikethrough_enabled() {
        assert_eq!(to_html("~~gone~~"), "<p><del>gone</del></p>\n");
    }
}
