// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing a decoded value.

//! The set of kinds is closed. Maps come in three shapes depending on
//! the container strategy used for reading: `Map` (hash strategy),
//! `List` of `Pair`s (association list strategy), or a flat `List`
//! alternating keys and values (flat sequence strategy).

use crate::intern::{intern, Interned};
use crate::number::Number;
use indexmap::IndexMap;
use kstring::KString;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(Interned);

impl Keyword {
    /// `name` is without the leading colon.
    pub fn new(name: &str) -> Keyword {
        Keyword(intern(name))
    }
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!(":{}", self.name()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Interned);

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        Symbol(intern(name))
    }
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parenkind {
    Round,
    Square,
    Curly
}

impl Parenkind {
    pub fn opening(self) -> char {
        match self {
            Parenkind::Round => '(',
            Parenkind::Square => '[',
            Parenkind::Curly => '{'
        }
    }
    pub fn closing(self) -> char {
        match self {
            Parenkind::Round => ')',
            Parenkind::Square => ']',
            Parenkind::Curly => '}'
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(Number),
    String(KString),
    Keyword(Keyword),
    Symbol(Symbol),
    /// `( )`
    List(Vec<Value>),
    /// `[ ]`
    Vector(Vec<Value>),
    /// `#{ }`, in the order read
    Set(Vec<Value>),
    /// `{ }` read with the hash strategy; equality ignores order
    Map(IndexMap<Value, Value>),
    /// A key/value cell as built by the association list strategy
    Pair(Box<Value>, Box<Value>),
}

// Consistent with the order-insensitive equality of maps: map entries
// are hashed one by one and combined with a commutative sum.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Nil => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            Value::Keyword(k) => k.hash(state),
            Value::Symbol(s) => s.hash(state),
            Value::List(v) | Value::Vector(v) | Value::Set(v) => v.hash(state),
            Value::Map(m) => {
                m.len().hash(state);
                m.iter()
                    .map(|entry| {
                        let mut h = DefaultHasher::new();
                        entry.hash(&mut h);
                        h.finish()
                    })
                    .fold(0u64, u64::wrapping_add)
                    .hash(state)
            }
            Value::Pair(a, b) => {
                a.hash(state);
                b.hash(state)
            }
        }
    }
}

impl Value {
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_integer())
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Value::Keyword(_))
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_, _))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None
        }
    }

    /// Look up `key` in any of the three map representations.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            Value::List(v) => {
                if v.iter().all(Value::is_pair) {
                    v.iter().find_map(|p| match p {
                        Value::Pair(k, val) if **k == *key => Some(&**val),
                        _ => None
                    })
                } else {
                    v.chunks_exact(2).find(|kv| kv[0] == *key).map(|kv| &kv[1])
                }
            }
            _ => None
        }
    }
}

/// Easily create a string
pub fn string(s: &str) -> Value {
    Value::String(KString::from_ref(s))
}

/// Easily create a keyword, `name` without the colon
pub fn keyword(name: &str) -> Value {
    Value::Keyword(Keyword::new(name))
}

/// Easily create a symbol
pub fn symbol(name: &str) -> Value {
    Value::Symbol(Symbol::new(name))
}

pub fn integer(n: i64) -> Value {
    Value::Number(n.into())
}

pub fn float(x: f64) -> Value {
    Value::Number(x.into())
}

/// Easily create a key/value cell
pub fn pair(a: Value, b: Value) -> Value {
    Value::Pair(Box::new(a), Box::new(b))
}

/// Easily create a hash strategy map
pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
    Value::Map(entries.into_iter().collect())
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(KString::from_string(s))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Value {
        Value::Number(n)
    }
}

impl From<Keyword> for Value {
    fn from(k: Keyword) -> Value {
        Value::Keyword(k)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Value {
        Value::Symbol(s)
    }
}
