//! JSONPath text parser
//!
//! Turns `$.a.b[0]`, `{.a['b c']}`, `$..name[1:3]` and friends into a flat
//! list of segments. Filter expressions are not supported.

use super::PathError;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static MEMBER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+").expect("member name pattern"));

/// One step of a parsed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `.name` or `['name']`
    Child(String),
    /// `.*` or `[*]`
    Wildcard,
    /// `..name`
    Descendant(String),
    /// `..*`
    DescendantWildcard,
    /// `[n]`, negative counts from the end
    Index(i64),
    /// `[start:end:step]`
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: SmallVec<[Segment; 4]>,
}

impl JsonPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Parse a path expression
pub fn parse(expr: &str) -> Result<JsonPath, PathError> {
    Parser {
        src: expr,
        pos: 0,
        end: expr.len(),
    }
    .parse()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    end: usize,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<JsonPath, PathError> {
        self.trim();
        if self.rest().is_empty() {
            return Err(self.error("empty path"));
        }

        // Template form: {.a.b}
        if self.peek() == Some('{') {
            if !self.rest().ends_with('}') {
                return Err(self.error("unterminated `{`"));
            }
            self.pos += 1;
            self.end -= 1;
            self.trim();
            if self.rest().is_empty() {
                return Err(self.error("empty path"));
            }
        }

        match self.peek() {
            Some('$') => self.pos += 1,
            Some('.') | Some('[') => {}
            _ => return Err(self.error("path must start with `$`, `.` or `[`")),
        }

        let mut segments = SmallVec::new();
        while let Some(c) = self.peek() {
            let segment = match c {
                '.' => self.dot_segment()?,
                '[' => self.bracket_segment()?,
                other => return Err(self.error(format!("unexpected character `{}`", other))),
            };
            segments.push(segment);
        }

        Ok(JsonPath { segments })
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..self.end]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn trim(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
        self.end = self.pos + self.rest().trim_end().len();
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn dot_segment(&mut self) -> Result<Segment, PathError> {
        self.pos += 1;
        let descendant = self.peek() == Some('.');
        if descendant {
            self.pos += 1;
        }

        if self.peek() == Some('*') {
            self.pos += 1;
            return Ok(if descendant {
                Segment::DescendantWildcard
            } else {
                Segment::Wildcard
            });
        }

        let name = self.member_name()?;
        Ok(if descendant {
            Segment::Descendant(name)
        } else {
            Segment::Child(name)
        })
    }

    fn member_name(&mut self) -> Result<String, PathError> {
        match MEMBER_NAME.find(self.rest()) {
            Some(m) => {
                self.pos += m.end();
                Ok(m.as_str().to_string())
            }
            None => Err(self.error("expected a member name")),
        }
    }

    fn bracket_segment(&mut self) -> Result<Segment, PathError> {
        let open = self.pos;
        self.pos += 1;
        self.skip_whitespace();

        let segment = match self.peek() {
            Some(quote @ ('\'' | '"')) => Segment::Child(self.quoted(quote)?),
            Some('*') => {
                self.pos += 1;
                Segment::Wildcard
            }
            Some('?') => return Err(self.error("filter expressions are not supported")),
            Some(_) => self.index_or_slice()?,
            None => return Err(self.error_at(open, "unterminated `[`")),
        };

        self.skip_whitespace();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(segment)
            }
            _ => Err(self.error_at(open, "unterminated `[`")),
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, PathError> {
        let start = self.pos;
        self.pos += quote.len_utf8();

        let mut name = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => name.push(escaped),
                    None => break,
                },
                c if c == quote => {
                    self.pos += i + c.len_utf8();
                    return Ok(name);
                }
                c => name.push(c),
            }
        }

        Err(self.error_at(start, "unterminated string"))
    }

    fn index_or_slice(&mut self) -> Result<Segment, PathError> {
        let start = self.pos;
        let body = match self.rest().find(']') {
            Some(close) => &self.rest()[..close],
            None => return Err(self.error_at(start, "unterminated `[`")),
        };

        let bound = |text: &str| -> Result<Option<i64>, PathError> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| self.error_at(start, format!("invalid index `{}`", text)))
        };

        let parts: Vec<&str> = body.split(':').collect();
        let segment = match parts.as_slice() {
            [index] => match bound(*index)? {
                Some(index) => Segment::Index(index),
                None => return Err(self.error_at(start, "expected an index")),
            },
            [from, to] => Segment::Slice {
                start: bound(*from)?,
                end: bound(*to)?,
                step: None,
            },
            [from, to, step] => Segment::Slice {
                start: bound(*from)?,
                end: bound(*to)?,
                step: bound(*step)?,
            },
            _ => return Err(self.error_at(start, "too many `:` in slice")),
        };

        self.pos += body.len();
        Ok(segment)
    }

    fn error(&self, message: impl Into<String>) -> PathError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> PathError {
        PathError::Syntax {
            path: self.src.to_string(),
            offset,
            message: message.into(),
        }
    }
}
