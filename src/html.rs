//! Minimal HTML builder that escapes everything it is handed.
//!
//! Tag and attribute names are `&'static str` so they can only come from
//! code. Text content and attribute values are escaped on the way in; the
//! only way to emit a link target is a [`SafeUrl`], which is built from
//! parsed, known-scheme input.

use std::fmt;

use url::Url;

/// Escape text for use in element content or a quoted attribute value.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// An `https://` link target derived from a bare domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeUrl(String);

impl SafeUrl {
    /// Builds `https://<domain>` if the result parses as an https URL with a host.
    pub fn https(domain: &str) -> Option<Self> {
        let domain = domain.trim();
        if domain.is_empty() || domain.contains("://") || domain.chars().any(char::is_whitespace) {
            return None;
        }
        let candidate = format!("https://{domain}");
        let parsed = Url::parse(&candidate).ok()?;
        if parsed.scheme() != "https" || parsed.host_str().is_none() {
            return None;
        }
        Some(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute value accepted by [`Markup`].
#[derive(Debug, Clone, Copy)]
pub enum Attr<'a> {
    Text(&'a str),
    Url(&'a SafeUrl),
}

impl<'a> From<&'a str> for Attr<'a> {
    fn from(value: &'a str) -> Self {
        Attr::Text(value)
    }
}

impl<'a> From<&'a String> for Attr<'a> {
    fn from(value: &'a String) -> Self {
        Attr::Text(value.as_str())
    }
}

impl<'a> From<&'a SafeUrl> for Attr<'a> {
    fn from(value: &'a SafeUrl) -> Self {
        Attr::Url(value)
    }
}

/// String buffer of well-formed, escaped markup.
#[derive(Debug, Default, Clone)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `<tag attr="value" ...>`.
    pub fn open(&mut self, tag: &'static str, attrs: &[(&'static str, Attr<'_>)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            let value = match value {
                Attr::Text(text) => escape(text),
                Attr::Url(url) => escape(url.as_str()),
            };
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&value);
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close(&mut self, tag: &'static str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape(text));
        self
    }

    /// `<tag attrs>text</tag>` in one call.
    pub fn element(
        &mut self,
        tag: &'static str,
        attrs: &[(&'static str, Attr<'_>)],
        text: &str,
    ) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    /// Appends markup produced by another builder.
    pub fn append(&mut self, other: &Markup) -> &mut Self {
        self.buf.push_str(&other.buf);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Wraps markup that an escaping builder already produced.
    pub(crate) fn from_trusted(buf: String) -> Self {
        Self { buf }
    }

    /// Appends a literal that is part of the template itself.
    pub(crate) fn raw(&mut self, literal: &'static str) -> &mut Self {
        self.buf.push_str(literal);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
