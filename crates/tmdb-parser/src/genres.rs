//! Parser for the serialized genre cell, e.g. `[{"id": 28, "name": "Action"}]`.
//!
//! TMDB exports use JSON, hand-edited copies of the dataset tend to use
//! Python literal syntax (single quotes, `True`/`None`). Both are accepted.

use crate::errors::GenreParseError;

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    Number,
    Bool,
    Null,
    List(Vec<Literal>),
    Map(Vec<(Literal, Literal)>),
}

/// Returns the `name` of every mapping in the list, in order.
///
/// Blank input yields an empty list. Anything that is not a list of mappings
/// with a string `name` is an error.
pub fn parse_genre_names(text: &str) -> Result<Vec<String>, GenreParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut cursor = Cursor::new(text);
    let value = cursor.parse_value()?;
    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(cursor.error("unexpected trailing characters"));
    }

    let Literal::List(items) = value else {
        return Err(GenreParseError::new(0, "expected a list of genre mappings"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Literal::Map(entries) => entries
                .into_iter()
                .find_map(|(key, value)| match (key, value) {
                    (Literal::Str(key), Literal::Str(name)) if key == "name" => Some(name),
                    _ => None,
                })
                .ok_or_else(|| {
                    GenreParseError::new(0, format!("entry {index} has no string 'name'"))
                }),
            _ => Err(GenreParseError::new(
                0,
                format!("entry {index} is not a mapping"),
            )),
        })
        .collect()
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> GenreParseError {
        GenreParseError::new(self.pos, message)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), GenreParseError> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn parse_value(&mut self) -> Result<Literal, GenreParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_list(),
            Some('{') => self.parse_map(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote, false).map(Literal::Str),
            Some(ch) if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() => {
                self.parse_number()
            }
            Some(ch) if ch.is_ascii_alphabetic() => self.parse_keyword(),
            Some(ch) => Err(self.error(format!("unexpected character '{ch}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_list(&mut self) -> Result<Literal, GenreParseError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Literal::List(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(items)),
                Some(ch) => return Err(self.error(format!("expected ',' or ']', found '{ch}'"))),
                None => return Err(self.error("unterminated list")),
            }
        }
    }

    fn parse_map(&mut self) -> Result<Literal, GenreParseError> {
        self.expect('{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Literal::Map(entries));
            }
            let key = self.parse_value()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Map(entries)),
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{ch}'"))),
                None => return Err(self.error("unterminated mapping")),
            }
        }
    }

    fn parse_string(&mut self, quote: char, raw: bool) -> Result<String, GenreParseError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') if raw => {
                    // a raw string still cannot end on an escaped quote
                    out.push('\\');
                    match self.bump() {
                        Some(next) => out.push(next),
                        None => return Err(self.error("unterminated string")),
                    }
                }
                Some('\\') => self.parse_escape(&mut out)?,
                Some(ch) => out.push(ch),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), GenreParseError> {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('/') => out.push('/'),
            Some(ch @ ('\\' | '\'' | '"')) => out.push(ch),
            Some('u') => out.push(self.parse_hex_char(4)?),
            Some('x') => out.push(self.parse_hex_char(2)?),
            // Python keeps unknown escapes verbatim.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return Err(self.error("unterminated escape sequence")),
        }
        Ok(())
    }

    fn parse_hex_char(&mut self, digits: usize) -> Result<char, GenreParseError> {
        let start = self.pos;
        let end = start + digits;
        let hex = self
            .input
            .get(start..end)
            .ok_or_else(|| self.error("truncated escape sequence"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error(format!("invalid hex escape '{hex}'")))?;
        self.pos = end;
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {code:#x}")))
    }

    fn parse_number(&mut self) -> Result<Literal, GenreParseError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E')
        ) {
            self.bump();
        }
        let token = &self.input[start..self.pos];
        token
            .parse::<f64>()
            .map(|_| Literal::Number)
            .map_err(|_| GenreParseError::new(start, format!("invalid number '{token}'")))
    }

    fn parse_keyword(&mut self) -> Result<Literal, GenreParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            self.bump();
        }
        let input = self.input;
        let word = &input[start..self.pos];

        // String prefixes: u'Action', b"Drama", r'Sci\Fi'.
        if let Some(quote @ ('"' | '\'')) = self.peek() {
            let prefix = word.to_ascii_lowercase();
            if matches!(prefix.as_str(), "u" | "b" | "r" | "br" | "rb") {
                let raw = prefix.contains('r');
                return self.parse_string(quote, raw).map(Literal::Str);
            }
        }

        match word {
            "True" | "False" | "true" | "false" => Ok(Literal::Bool),
            "None" | "null" => Ok(Literal::Null),
            other => Err(GenreParseError::new(
                start,
                format!("unexpected identifier '{other}'"),
            )),
        }
    }
}
