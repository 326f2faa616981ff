//! The renderer-dispatch stage: turns a normalized [`Record`] into one whose
//! `html` field is populated. Each type renderer is a pure
//! `fn(Record) -> Result<Record>` that inspects the record's content type and
//! either produces the `html` fragment or passes the record through
//! untouched. [`render`] applies a renderer sequence (usually
//! [`DEFAULT_RENDERERS`]) and fails if the record comes out the other end
//! still unrendered.

use crate::markdown;
use crate::record::{OneOrMany, Record};
use pulldown_cmark::escape::escape_html;
use regex::Regex;
use std::fmt;

/// A type renderer: no-ops unless its content-type guard matches.
pub type Renderer = fn(Record) -> Result<Record>;

/// The default renderer sequence. Renderers are mutually exclusive by
/// content-type guard, so the order doesn't affect which one fires, but a
/// fixed order keeps dispatch deterministic.
pub const DEFAULT_RENDERERS: [Renderer; 5] = [
    render_youtube,
    render_image,
    render_html,
    render_markdown,
    render_irc,
];

/// Applies every renderer in `renderers` to `record` in sequence.
/// Non-matching renderers are no-ops, so the whole sequence always runs.
/// Fails with [`Error::UnrenderedContentType`] if no renderer produced an
/// `html` fragment.
pub fn render(record: Record, renderers: &[Renderer]) -> Result<Record> {
    let mut record = record;
    for renderer in renderers {
        record = renderer(record)?;
    }
    if record.html.is_none() {
        return Err(Error::UnrenderedContentType {
            content_type: record.content_type.unwrap_or_default(),
        });
    }
    Ok(record)
}

fn content_type_is(record: &Record, content_type: &str) -> bool {
    record.content_type.as_deref() == Some(content_type)
}

/// HTML-escapes untrusted text for interpolation into a fragment.
fn escape(text: &str) -> String {
    let mut out = String::new();
    // escape_html is infallible when writing into a String
    let _ = escape_html(&mut out, text);
    out
}

const YOUTUBE_EMBED_WIDTH: u32 = 854;
const YOUTUBE_EMBED_HEIGHT: u32 = 480;

/// Renders `youtube` records into an iframe embed. A `youtube` record with
/// no video identifier is left unrendered for dispatch to catch.
pub fn render_youtube(mut record: Record) -> Result<Record> {
    if content_type_is(&record, "youtube") {
        if let Some(key) = &record.youtube {
            record.html = Some(format!(
                "\n<iframe class='youtube' width=\"{}\" height=\"{}\" \
                 src=\"http://www.youtube.com/embed/{}\" frameborder=\"0\" \
                 allowfullscreen></iframe>",
                YOUTUBE_EMBED_WIDTH, YOUTUBE_EMBED_HEIGHT, key
            ));
        }
    }
    Ok(record)
}

/// Renders `image` and `comic` records into one `<img>` fragment per URL.
/// The `image` key wins when both are present. Alt text defaults to the
/// empty string and is always HTML-escaped.
pub fn render_image(mut record: Record) -> Result<Record> {
    if content_type_is(&record, "image") || content_type_is(&record, "comic") {
        let urls = match record.image.as_ref().or(record.comic.as_ref()) {
            Some(urls) => urls,
            None => {
                return Err(Error::MissingMediaElement {
                    content_type: record.content_type.unwrap_or_default(),
                })
            }
        };
        let alt = escape(record.alt_text.as_deref().unwrap_or(""));
        let mut html = String::new();
        for url in urls.as_slice() {
            html.push_str(&format!("\n<img src=\"{}\" alt=\"{}\">", url, alt));
        }
        record.html = Some(html);
    }
    Ok(record)
}

/// Renders `html` records. Mostly a passthrough: an `html` field already
/// present wins, otherwise the `content` field is used verbatim (trusted raw
/// HTML by contract, so no escaping). A record with neither gets an empty
/// fragment, which still counts as rendered.
pub fn render_html(mut record: Record) -> Result<Record> {
    if content_type_is(&record, "html") {
        let html = record
            .html
            .take()
            .or_else(|| record.content.as_ref().map(|c| c.join("\n")))
            .unwrap_or_default();
        record.html = Some(html);
    }
    Ok(record)
}

/// Renders `markdown` records through the markdown-to-HTML transform. The
/// `content` key wins over `markdown` when both are present. The branch is
/// on payload form, not length: a list payload renders each fragment
/// followed by a `<br />` separator (even a one-element list), while a
/// single string gets no separator.
pub fn render_markdown(mut record: Record) -> Result<Record> {
    if content_type_is(&record, "markdown") {
        let fragments = match record.content.as_ref().or(record.markdown.as_ref()) {
            Some(fragments) => fragments,
            None => {
                return Err(Error::MissingMediaElement {
                    content_type: record.content_type.unwrap_or_default(),
                })
            }
        };
        let html = match fragments {
            OneOrMany::One(single) => markdown::to_html(single),
            OneOrMany::Many(many) => {
                let mut html = String::new();
                for fragment in many {
                    html.push_str(&markdown::to_html(fragment));
                    html.push_str("<br />");
                }
                html
            }
        };
        record.html = Some(html);
    }
    Ok(record)
}

/// Renders `irc` records: each transcript line of the form
/// `<speaker>message` becomes a list item with the speaker name in emphasis;
/// lines that don't match are dropped. Speaker and message are both
/// HTML-escaped. The `content` key wins over `irc` when both are present.
pub fn render_irc(mut record: Record) -> Result<Record> {
    if content_type_is(&record, "irc") {
        let transcript = match record
            .content
            .as_ref()
            .map(|c| c.join("\n"))
            .or_else(|| record.irc.clone())
        {
            Some(transcript) => transcript,
            None => {
                return Err(Error::MissingMediaElement {
                    content_type: record.content_type.unwrap_or_default(),
                })
            }
        };
        // pattern is a constant, so compiling can't fail
        let line_pattern = Regex::new(r"<(\S+)>(.*)").unwrap();
        let mut html = String::from("<ul class='irc'>");
        for line in transcript.lines() {
            if let Some(captures) = line_pattern.captures(line) {
                html.push_str(&format!(
                    "<li><strong class='name'>{}</strong> {}</li>\n",
                    escape(&captures[1]),
                    escape(&captures[2])
                ));
            }
        }
        html.push_str("</ul>");
        record.html = Some(html);
    }
    Ok(record)
}

/// The result of a render operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a [`Record`] to HTML.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Returned when a renderer's guard matched but the payload field it
    /// needs is absent (e.g. an `image` record with no `image` or `comic`
    /// key).
    MissingMediaElement { content_type: String },

    /// Returned when the whole renderer sequence ran and none of them set
    /// `html`.
    UnrenderedContentType { content_type: String },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingMediaElement { content_type } => write!(
                f,
                "posts with content-type `{}` must have a `{}` element",
                content_type, content_type
            ),
            Error::UnrenderedContentType { content_type } => {
                write!(f, "no renderer found for content-type `{}`", content_type)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::record::OneOrMany;

    fn record(content_type: &str) -> Record {
        Record {
            id: String::from("a"),
            content_type: Some(content_type.to_owned()),
            ..Record::default()
        }
    }

    #[test]
    fn test_youtube() {
        let rendered = render(
            Record {
                youtube: Some(String::from("pQ6RTUcNqNk")),
                ..record("youtube")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        let html = rendered.html.unwrap();
        assert!(html.contains("http://www.youtube.com/embed/pQ6RTUcNqNk"));
        assert!(html.contains("width=\"854\""));
        assert!(html.contains("height=\"480\""));
    }

    #[test]
    fn test_youtube_without_key_is_unrendered() {
        assert_eq!(
            render(record("youtube"), &DEFAULT_RENDERERS),
            Err(Error::UnrenderedContentType {
                content_type: String::from("youtube")
            })
        );
    }

    #[test]
    fn test_image_single() {
        let rendered = render(
            Record {
                image: Some(OneOrMany::from("a.png")),
                ..record("image")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some("\n<img src=\"a.png\" alt=\"\">")
        );
    }

    #[test]
    fn test_image_multiple_with_escaped_alt() {
        let rendered = render(
            Record {
                image: Some(OneOrMany::Many(vec![
                    String::from("a.png"),
                    String::from("b.png"),
                ])),
                alt_text: Some(String::from("<x>")),
                ..record("image")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some(
                "\n<img src=\"a.png\" alt=\"&lt;x&gt;\">\
                 \n<img src=\"b.png\" alt=\"&lt;x&gt;\">"
            )
        );
    }

    #[test]
    fn test_comic_key_accepted() {
        let rendered = render(
            Record {
                comic: Some(OneOrMany::from("c.gif")),
                ..record("comic")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some("\n<img src=\"c.gif\" alt=\"\">")
        );
    }

    #[test]
    fn test_image_missing_media_element() {
        assert_eq!(
            render(record("image"), &DEFAULT_RENDERERS),
            Err(Error::MissingMediaElement {
                content_type: String::from("image")
            })
        );
    }

    #[test]
    fn test_html_passthrough() {
        let rendered = render(
            Record {
                content: Some(OneOrMany::from("<b>raw</b>")),
                ..record("html")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        // trusted raw HTML, not escaped
        assert_eq!(rendered.html.as_deref(), Some("<b>raw</b>"));
    }

    #[test]
    fn test_html_field_wins_over_content() {
        let rendered = render(
            Record {
                html: Some(String::from("<i>direct</i>")),
                content: Some(OneOrMany::from("ignored")),
                ..record("html")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(rendered.html.as_deref(), Some("<i>direct</i>"));
    }

    #[test]
    fn test_html_empty_record_still_renders() {
        let rendered = render(record("html"), &DEFAULT_RENDERERS).unwrap();
        assert_eq!(rendered.html.as_deref(), Some(""));
    }

    #[test]
    fn test_markdown_single() {
        let rendered = render(
            Record {
                markdown: Some(OneOrMany::from("hello *world*")),
                ..record("markdown")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some("<p>hello <em>world</em></p>\n")
        );
    }

    #[test]
    fn test_markdown_multiple_separated_by_breaks() {
        let rendered = render(
            Record {
                markdown: Some(OneOrMany::Many(vec![
                    String::from("one"),
                    String::from("two"),
                ])),
                ..record("markdown")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some("<p>one</p>\n<br /><p>two</p>\n<br />")
        );
    }

    #[test]
    fn test_markdown_one_element_list_still_gets_break() {
        // the branch is on payload form, not length: a list of one still
        // renders as a list
        let rendered = render(
            Record {
                markdown: Some(OneOrMany::Many(vec![String::from("one")])),
                ..record("markdown")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(rendered.html.as_deref(), Some("<p>one</p>\n<br />"));
    }

    #[test]
    fn test_markdown_missing_media_element() {
        assert_eq!(
            render(record("markdown"), &DEFAULT_RENDERERS),
            Err(Error::MissingMediaElement {
                content_type: String::from("markdown")
            })
        );
    }

    #[test]
    fn test_irc() {
        let rendered = render(
            Record {
                irc: Some(String::from("<bob>hi\nnot a line\n<amy>hello")),
                ..record("irc")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        assert_eq!(
            rendered.html.as_deref(),
            Some(
                "<ul class='irc'>\
                 <li><strong class='name'>bob</strong> hi</li>\n\
                 <li><strong class='name'>amy</strong> hello</li>\n\
                 </ul>"
            )
        );
    }

    #[test]
    fn test_irc_escapes_speaker_and_message() {
        let rendered = render(
            Record {
                irc: Some(String::from("<b&b>say <script> now")),
                ..record("irc")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        let html = rendered.html.unwrap();
        assert!(html.contains("b&amp;b"));
        assert!(html.contains("say &lt;script&gt; now"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unknown_content_type() {
        assert_eq!(
            render(record("interpretive-dance"), &DEFAULT_RENDERERS),
            Err(Error::UnrenderedContentType {
                content_type: String::from("interpretive-dance")
            })
        );
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let rendered = render(
            Record {
                markdown: Some(OneOrMany::from("hello")),
                ..record("markdown")
            },
            &DEFAULT_RENDERERS,
        )
        .unwrap();
        let again = render(rendered.clone(), &DEFAULT_RENDERERS).unwrap();
        assert_eq!(rendered.html, again.html);
    }
}
