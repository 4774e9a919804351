// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating text to a [Value](crate::value::Value) tree.

//! Recursive descent: the first character of each value selects the
//! reader method via a dispatch table, containers recurse back into
//! [Reader::read]. Containers are returned only when complete.

use crate::container::{coerce_key, MapBuilder};
use crate::error::{At, DecodeError, DecodeErrorWithPos};
use crate::number::Number;
use crate::pos::Pos;
use crate::scanner::{is_closing_char, is_token_end, Scanner};
use crate::settings::{DecodeSettings, HASH_SETTINGS};
use crate::value::{Keyword, Parenkind, Symbol, Value};
use kstring::KString;
use num::BigInt;

type Handler<'s, 't> = fn(&mut Reader<'s, 't>) -> Result<Value, DecodeErrorWithPos>;

/// The dispatch table, keyed by the first character of a value.
fn handler_for<'s, 't>(c: char) -> Option<Handler<'s, 't>> {
    match c {
        '0'..='9' | '+' | '-' | '.' => Some(Reader::read_number),
        '"' => Some(Reader::read_string),
        ':' => Some(Reader::read_keyword),
        '\'' => Some(Reader::read_symbol),
        '{' => Some(Reader::read_map),
        '[' => Some(Reader::read_vector),
        '(' => Some(Reader::read_list),
        '#' => Some(Reader::read_hash_prefixed),
        't' | 'f' | 'n' => Some(Reader::read_literal),
        _ => None
    }
}

// Length (in bytes, all ASCII) of the longest prefix of `s` matching
// `digits? ('.' digits)? ([eE][+-]?digits)?`, and whether the
// fraction or exponent part is present. (0, false) if no digits
// matched at all.
fn match_unsigned_number(s: &str) -> (usize, bool) {
    let b = s.as_bytes();
    let digits = |from: usize| {
        b.get(from..).map_or(0, |t| t.iter().take_while(|c| c.is_ascii_digit()).count())
    };
    let mut len = digits(0);
    let mut seen_digits = len > 0;
    let mut is_float = false;
    if b.get(len) == Some(&b'.') {
        let n = digits(len + 1);
        if n > 0 {
            len += 1 + n;
            seen_digits = true;
            is_float = true;
        }
    }
    if matches!(b.get(len), Some(b'e' | b'E')) {
        let mut i = len + 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let n = digits(i);
        if n > 0 {
            len = i + n;
            seen_digits = true;
            is_float = true;
        }
    }
    if seen_digits { (len, is_float) } else { (0, false) }
}

/// Reads values from one in-memory document. Not shared between
/// threads; create one per document.
#[derive(Debug)]
pub struct Reader<'s, 't> {
    scanner: Scanner<'s>,
    settings: &'t DecodeSettings,
    depth_fuel: u32,
}

impl<'s, 't> Reader<'s, 't> {
    pub fn new(input: &'s str, settings: &'t DecodeSettings) -> Reader<'s, 't> {
        Reader {
            scanner: Scanner::new(input),
            settings,
            depth_fuel: settings.max_depth,
        }
    }

    pub fn pos(&self) -> Pos {
        self.scanner.pos()
    }

    /// Whether only whitespace is left.
    pub fn at_end(&mut self) -> bool {
        self.scanner.skip_whitespace();
        self.scanner.at_end()
    }

    /// Read the next value.
    pub fn read(&mut self) -> Result<Value, DecodeErrorWithPos> {
        self.scanner.skip_whitespace();
        let pos = self.scanner.pos();
        let c = self.scanner.peek().ok_or(DecodeError::EndOfInput).at(pos)?;
        let handler = handler_for(c).ok_or(DecodeError::UnknownConstruct(c)).at(pos)?;
        handler(self)
    }

    fn read_literal(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        let (text, value) = match self.scanner.peek() {
            Some('t') => ("true", Value::Bool(true)),
            Some('f') => ("false", self.settings.false_value.clone()),
            _ => ("nil", self.settings.nil.clone()),
        };
        for expected in text.chars() {
            if self.scanner.peek() != Some(expected) {
                return Err(DecodeError::UnrecognizedLiteral(text).at(pos))
            }
            self.scanner.advance(1);
        }
        match self.scanner.peek() {
            Some(c) if !is_token_end(c) =>
                Err(DecodeError::UnrecognizedLiteral(text).at(pos)),
            _ => Ok(value)
        }
    }

    fn read_number(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        match self.scanner.peek() {
            Some(sign @ ('+' | '-')) => {
                self.scanner.advance(1);
                let n = self.read_unsigned_number(pos)?;
                Ok(Value::Number(if sign == '-' { -n } else { n }))
            }
            _ => Ok(Value::Number(self.read_unsigned_number(pos)?))
        }
    }

    fn read_unsigned_number(&mut self, start: Pos) -> Result<Number, DecodeErrorWithPos> {
        let rest = self.scanner.rest();
        let (len, is_float) = match_unsigned_number(rest);
        if len == 0 {
            let token = self.scanner.take_token();
            return Err(DecodeError::InvalidNumberFormat(token.into()).at(start))
        }
        let text = &rest[..len];
        self.scanner.advance(len);
        let n = if is_float {
            text.parse::<f64>().ok().map(Number::Float)
        } else {
            text.parse::<BigInt>().ok().map(Number::Integer)
        };
        n.ok_or_else(|| DecodeError::InvalidNumberFormat(text.into())).at(start)
    }

    fn read_string(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let start = self.scanner.pos();
        self.scanner.advance(1);
        let mut out = String::new();
        loop {
            let c = self.scanner.pop()
                .map_err(|_| DecodeError::UnterminatedString.at(start))?;
            match c {
                '"' => return Ok(Value::String(KString::from_string(out))),
                '\\' => {
                    let pos = self.scanner.pos();
                    let e = self.scanner.pop()
                        .map_err(|_| DecodeError::UnterminatedString.at(start))?;
                    out.push(match e {
                        'b' => '\x08',
                        'f' => '\x0C',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'u' => self.read_unicode_escape(pos)?,
                        // '"', '\\' and anything else stand for themselves
                        _ => e
                    });
                }
                _ => out.push(c)
            }
        }
    }

    // Just after `\u`. A high surrogate must be followed by an
    // escaped low surrogate.
    fn read_unicode_escape(&mut self, pos: Pos) -> Result<char, DecodeErrorWithPos> {
        let code = self.read_hex4(pos)?;
        let code = match code {
            0xD800..=0xDBFF => {
                if self.scanner.rest().starts_with("\\u") {
                    self.scanner.advance(2);
                    let low = self.read_hex4(pos)?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(DecodeError::BadUnicodeEscape(format!("{:04x}", low))
                                   .at(pos))
                    }
                    0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    return Err(DecodeError::BadUnicodeEscape(format!("{:04x}", code))
                               .at(pos))
                }
            }
            _ => code
        };
        char::from_u32(code)
            .ok_or_else(|| DecodeError::BadUnicodeEscape(format!("{:04x}", code)))
            .at(pos)
    }

    fn read_hex4(&mut self, pos: Pos) -> Result<u32, DecodeErrorWithPos> {
        let hex: String = self.scanner.rest().chars().take(4).collect();
        if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DecodeError::BadUnicodeEscape(hex).at(pos))
        }
        let code = u32::from_str_radix(&hex, 16)
            .map_err(|_| DecodeError::BadUnicodeEscape(hex.clone()).at(pos))?;
        self.scanner.advance(4);
        Ok(code)
    }

    fn read_keyword(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        self.scanner.advance(1);
        let name = self.scanner.take_token();
        if name.is_empty() {
            return Err(DecodeError::InvalidKeywordFormat(":".into()).at(pos))
        }
        Ok(Value::Keyword(Keyword::new(name)))
    }

    fn read_symbol(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        self.scanner.advance(1);
        let name = self.scanner.take_token();
        if name.is_empty() {
            return Err(DecodeError::InvalidSymbolFormat("'".into()).at(pos))
        }
        Ok(Value::Symbol(Symbol::new(name)))
    }

    fn read_list(&mut self) -> Result<Value, DecodeErrorWithPos> {
        Ok(Value::List(self.read_elements(Parenkind::Round)?))
    }

    fn read_vector(&mut self) -> Result<Value, DecodeErrorWithPos> {
        Ok(Value::Vector(self.read_elements(Parenkind::Square)?))
    }

    // `#{` starts a set, `##` a non-finite float.
    fn read_hash_prefixed(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        self.scanner.advance(1);
        match self.scanner.peek() {
            Some('{') => Ok(Value::Set(self.read_elements(Parenkind::Curly)?)),
            Some('#') => {
                self.scanner.advance(1);
                let x = match self.scanner.take_token() {
                    "Inf" => f64::INFINITY,
                    "-Inf" => f64::NEG_INFINITY,
                    "NaN" => f64::NAN,
                    token => return Err(
                        DecodeError::InvalidNumberFormat(format!("##{token}")).at(pos))
                };
                Ok(Value::Number(Number::Float(x)))
            }
            c => Err(DecodeError::MalformedSet(c).at(pos))
        }
    }

    fn read_map(&mut self) -> Result<Value, DecodeErrorWithPos> {
        let start = self.enter()?;
        let coercion = self.settings.key_coercion();
        let mut builder = MapBuilder::new(self.settings.container);
        self.scanner.skip_whitespace();
        while !self.at_closing(Parenkind::Curly, start)? {
            let key_pos = self.scanner.pos();
            let key = self.read()?;
            self.skip_separator();
            if self.scanner.peek().map_or(false, is_closing_char) {
                return Err(DecodeError::OddMapEntries.at(self.scanner.pos()))
            }
            let value = self.read()?;
            let key = coerce_key(key, coercion, self.settings.max_depth)
                .map_err(|_| DecodeError::NestingTooDeep.at(key_pos))?;
            builder.insert(key, value);
            self.skip_separator();
        }
        self.leave();
        Ok(builder.finish())
    }

    // The scanner is on the opening character.
    fn read_elements(&mut self, pk: Parenkind) -> Result<Vec<Value>, DecodeErrorWithPos> {
        let start = self.enter()?;
        let mut v = Vec::new();
        self.scanner.skip_whitespace();
        while !self.at_closing(pk, start)? {
            v.push(self.read()?);
            self.skip_separator();
        }
        self.leave();
        Ok(v)
    }

    // Step over an opening character, returning its position.
    fn enter(&mut self) -> Result<Pos, DecodeErrorWithPos> {
        let pos = self.scanner.pos();
        if self.depth_fuel == 0 {
            return Err(DecodeError::NestingTooDeep.at(pos))
        }
        self.depth_fuel -= 1;
        self.scanner.advance(1);
        Ok(pos)
    }

    fn leave(&mut self) {
        self.depth_fuel += 1;
    }

    // Consumes the closing character if it is next.
    fn at_closing(&mut self, pk: Parenkind, start: Pos) -> Result<bool, DecodeErrorWithPos> {
        match self.scanner.peek() {
            Some(c) if c == pk.closing() => {
                self.scanner.advance(1);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Err(DecodeError::EndOfInput.at(start))
        }
    }

    fn skip_separator(&mut self) {
        self.scanner.skip_whitespace();
        if self.scanner.peek() == Some(',') {
            self.scanner.advance(1);
        }
        self.scanner.skip_whitespace();
    }
}

/// Read one value with the default settings (hash maps, string keys).
/// Anything after the value is ignored.
pub fn decode(input: &str) -> Result<Value, DecodeErrorWithPos> {
    decode_with(input, &HASH_SETTINGS)
}

pub fn decode_with(
    input: &str,
    settings: &DecodeSettings
) -> Result<Value, DecodeErrorWithPos> {
    Reader::new(input, settings).read()
}

/// Read all values up to the end of `input`.
pub fn decode_all(
    input: &str,
    settings: &DecodeSettings
) -> Result<Vec<Value>, DecodeErrorWithPos> {
    let mut reader = Reader::new(input, settings);
    let mut vals = Vec::new();
    while !reader.at_end() {
        vals.push(reader.read()?);
    }
    Ok(vals)
}
