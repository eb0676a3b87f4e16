//! Manifest parser: XML text to document tree.
//!
//! Recursive-descent over a byte cursor. Comments and CDATA content are kept
//! in the tree; processing instructions and DOCTYPE declarations are
//! skipped. The leading `<?xml ...?>` declaration is captured verbatim so
//! the serializer can re-emit it.

use indexmap::IndexMap;

use crate::manifest::cursor::Cursor;
use crate::manifest::error::{ManifestError, ManifestResult};
use crate::manifest::model::{Content, Document, Element};

/// Manifest XML parser.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over raw manifest text.
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse a complete manifest document.
    pub fn parse(&mut self) -> ManifestResult<Document> {
        let declaration = self.parse_prolog()?;
        let root = self.parse_element()?;

        // Only whitespace and comments may follow the root element.
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                break;
            }
            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.take_until(b"-->")?;
                continue;
            }
            return Err(self.error_here("trailing content after document root"));
        }

        Ok(Document { declaration, root })
    }

    /// Consume the declaration (captured), plus any comments, processing
    /// instructions, and DOCTYPE before the root element.
    fn parse_prolog(&mut self) -> ManifestResult<Option<String>> {
        self.cursor.skip_whitespace();

        let mut declaration = None;
        if self.cursor.starts_with(b"<?xml") {
            let start = self.cursor.pos();
            self.cursor.advance_by(5);
            self.take_until(b"?>")?;
            declaration = Some(bytes_to_string(self.cursor.slice_from(start))?);
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                self.take_until(b"-->")?;
            } else if self.cursor.starts_with(b"<!DOCTYPE") {
                self.cursor.advance_by(9);
                self.take_until(b">")?;
            } else if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.take_until(b"?>")?;
            } else {
                break;
            }
        }

        Ok(declaration)
    }

    fn parse_element(&mut self) -> ManifestResult<Element> {
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'/') {
            return Err(self.error_here("unexpected closing tag"));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error_here("unterminated element"));
            }

            if self.cursor.starts_with(b"</") {
                self.cursor.advance_by(2);
                let close_name = self.parse_name()?;
                if close_name != name {
                    return Err(self.error_here(format!(
                        "mismatched closing tag: expected </{name}>, found </{close_name}>"
                    )));
                }
                self.cursor.skip_whitespace();
                self.expect_byte(b'>')?;
                break;
            }

            if self.cursor.starts_with(b"<!--") {
                self.cursor.advance_by(4);
                let start = self.cursor.pos();
                self.take_until(b"-->")?;
                let raw = self.cursor.slice_from(start);
                let raw = &raw[..raw.len() - 3];
                children.push(Content::Comment(bytes_to_string(raw)?));
                continue;
            }

            if self.cursor.starts_with(b"<![CDATA[") {
                self.cursor.advance_by(9);
                let start = self.cursor.pos();
                self.take_until(b"]]>")?;
                let raw = self.cursor.slice_from(start);
                let raw = &raw[..raw.len() - 3];
                children.push(Content::Text(bytes_to_string(raw)?));
                continue;
            }

            if self.cursor.starts_with(b"<?") {
                self.cursor.advance_by(2);
                self.take_until(b"?>")?;
                continue;
            }

            if self.cursor.current() == Some(b'<') {
                let child = self.parse_element()?;
                children.push(Content::Element(child));
                continue;
            }

            if let Some(text) = self.parse_text()? {
                children.push(Content::Text(text));
            }
        }

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> ManifestResult<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unexpected end of input in tag")),
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(self.error_here(format!("duplicate attribute: {name}")));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> ManifestResult<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(self.error_here("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw)?;
                return self.decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_here("unterminated attribute value"))
    }

    fn parse_text(&mut self) -> ManifestResult<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = bytes_to_string(raw)?;
        let text = self.decode_entities(&text)?;

        // Inter-element whitespace is formatting, not content.
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn parse_name(&mut self) -> ManifestResult<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(self.error_here("expected name"));
        };
        if !is_name_start(first) {
            return Err(self.error_here("invalid name"));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        bytes_to_string(self.cursor.slice_from(start))
    }

    fn take_until(&mut self, pattern: &[u8]) -> ManifestResult<()> {
        while self.cursor.current().is_some() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> ManifestResult<()> {
        if self.cursor.current() == Some(expected) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.error_here(format!("expected '{}'", expected as char)))
        }
    }

    fn decode_entities(&self, input: &str) -> ManifestResult<String> {
        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '&' {
                result.push(ch);
                continue;
            }

            let mut entity = String::new();
            let mut terminated = false;
            for next in chars.by_ref() {
                if next == ';' {
                    terminated = true;
                    break;
                }
                entity.push(next);
            }

            let decoded = if terminated {
                match entity.as_str() {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => decode_numeric_entity(&entity),
                }
            } else {
                None
            };

            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error_here(format!("invalid entity: &{entity}"))),
            }
        }

        Ok(result)
    }

    fn error_here(&self, message: impl Into<String>) -> ManifestError {
        ManifestError::malformed(self.cursor.line(), self.cursor.col(), message)
    }
}

/// Parse manifest text into a document tree.
pub fn parse(input: &str) -> ManifestResult<Document> {
    Parser::new(input.as_bytes()).parse()
}

fn bytes_to_string(bytes: &[u8]) -> ManifestResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| ManifestError::malformed(0, 0, "invalid utf-8"))
}

pub(crate) fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

pub(crate) fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
