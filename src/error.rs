// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Failures of reading and writing. Every one of them aborts the
//! current call; there is no recovery.

use crate::pos::Pos;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("no reader for construct starting with '{0}'")]
    UnknownConstruct(char),
    #[error("unrecognized literal, expected '{0}'")]
    UnrecognizedLiteral(&'static str),
    #[error("invalid number format '{0}'")]
    InvalidNumberFormat(String),
    #[error("bad unicode escape '\\u{0}'")]
    BadUnicodeEscape(String),
    #[error("unterminated string starting")]
    UnterminatedString,
    #[error("invalid keyword '{0}'")]
    InvalidKeywordFormat(String),
    #[error("invalid symbol '{0}'")]
    InvalidSymbolFormat(String),
    #[error("map literal with a key but no value")]
    OddMapEntries,
    #[error("expected '{{' or '#' after '#', got {}", describe_char(&.0))]
    MalformedSet(Option<char>),
    #[error("nesting too deep")]
    NestingTooDeep,
}

fn describe_char(c: &Option<char>) -> String {
    match c {
        Some(c) => format!("'{}'", c),
        None => "end of input".into(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{err} {pos}")]
pub struct DecodeErrorWithPos {
    pub err: DecodeError,
    pub pos: Pos
}

impl DecodeError {
    pub fn at(self, p: Pos) -> DecodeErrorWithPos {
        DecodeErrorWithPos {
            err: self,
            pos: p
        }
    }
}

pub(crate) trait At<T> {
    fn at(self, p: Pos) -> Result<T, DecodeErrorWithPos>;
}

impl<T> At<T> for Result<T, DecodeError> {
    fn at(self, p: Pos) -> Result<T, DecodeErrorWithPos> {
        self.map_err(|e| e.at(p))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("value cannot be encoded: {0}")]
    UnencodableValue(String),
}

/// Either kind of failure, for callers doing both directions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Decode(#[from] DecodeErrorWithPos),
    #[error("{0}")]
    Encode(#[from] EncodeError),
}
