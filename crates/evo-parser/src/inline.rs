//! Inline Markdown values
//!
//! Header values mix prose, links and emphasis
//! (`[Name](https://...), [Other](https://...)`). pulldown-cmark splits
//! them into plain text and link destinations.

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};

/// Link found in an inline value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLink {
    /// Link text
    pub text: String,
    /// Destination URL as written
    pub url: String,
}

/// Inline value split into plain text and links
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineValue {
    /// Rendered text with markup removed and whitespace collapsed
    pub text: String,
    /// Links in order of appearance
    pub links: Vec<InlineLink>,
}

impl InlineValue {
    /// Parse an inline Markdown fragment
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut text = String::new();
        let mut links = Vec::new();
        let mut open_link: Option<InlineLink> = None;

        for event in MdParser::new(source) {
            match event {
                Event::Start(Tag::Link { dest_url, .. }) => {
                    open_link = Some(InlineLink {
                        text: String::new(),
                        url: dest_url.to_string(),
                    });
                }
                Event::End(TagEnd::Link) => {
                    if let Some(mut link) = open_link.take() {
                        link.text = collapse_whitespace(&link.text);
                        links.push(link);
                    }
                }
                Event::Text(fragment) | Event::Code(fragment) => {
                    text.push_str(&fragment);
                    if let Some(link) = open_link.as_mut() {
                        link.text.push_str(&fragment);
                    }
                }
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                // Separate block-level pieces (a value that looks like a list item)
                Event::End(TagEnd::Paragraph | TagEnd::Item) => text.push(' '),
                _ => {}
            }
        }

        Self {
            text: collapse_whitespace(&text),
            links,
        }
    }

    /// Whether the value has neither text nor links
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.links.is_empty()
    }

    /// Link destinations
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.url.as_str())
    }
}

/// Collapse runs of whitespace to single spaces and trim
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
