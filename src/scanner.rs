// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from an in-memory string.

//! The whole document has to be available before reading starts;
//! there is no incremental mode. A `Scanner` is owned by exactly one
//! read and never shared.

use crate::error::DecodeError;
use crate::pos::Pos;

/// Characters skipped between tokens.
pub fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C' | '\x08')
}

pub fn is_closing_char(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Characters that end keyword, symbol and literal tokens.
pub fn is_token_end(c: char) -> bool {
    is_whitespace_char(c) || is_closing_char(c) || c == ','
}

#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    input: &'s str,
    /// Byte index into `input`, always on a char boundary
    index: usize,
    pos: Pos,
}

impl<'s> Scanner<'s> {
    pub fn new(input: &'s str) -> Scanner<'s> {
        Scanner { input, index: 0, pos: Pos::default() }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// The not yet consumed part of the input.
    pub fn rest(&self) -> &'s str {
        &self.input[self.index..]
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    /// The current character, `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Return the current character and move past it.
    pub fn pop(&mut self) -> Result<char, DecodeError> {
        let c = self.peek().ok_or(DecodeError::EndOfInput)?;
        self.index += c.len_utf8();
        self.pos = self.pos.after(c);
        Ok(c)
    }

    /// Skip `n` characters; stops silently at end of input, callers
    /// are expected to have peeked at what they skip.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if self.pop().is_err() {
                break
            }
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace_char(c) {
                break
            }
            self.advance(1);
        }
    }

    /// Consume characters up to (not including) end of input,
    /// whitespace, a comma or a closing delimiter.
    pub fn take_token(&mut self) -> &'s str {
        let start = self.index;
        while let Some(c) = self.peek() {
            if is_token_end(c) {
                break
            }
            self.advance(1);
        }
        &self.input[start..self.index]
    }
}
