// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Materializing `{ }` literals according to the container strategy.

use crate::error::EncodeError;
use crate::settings::{ContainerStrategy, EncodeSettings, KeyCoercion, ENCODE_SETTINGS};
use crate::value::{Keyword, Symbol, Value};
use crate::write::encode_with;
use indexmap::IndexMap;
use kstring::KString;

/// Text of a key for the string, symbol and keyword coercions.
fn key_name(key: &Value, max_depth: u32) -> Result<KString, EncodeError> {
    Ok(match key {
        Value::String(s) => s.clone(),
        Value::Keyword(k) => KString::from_ref(k.name()),
        Value::Symbol(s) => KString::from_ref(s.name()),
        Value::Number(n) => KString::from_string(n.to_string()),
        _ => KString::from_string(
            encode_with(key, &EncodeSettings { max_depth, ..ENCODE_SETTINGS })?),
    })
}

/// Fails only for container keys nested deeper than `max_depth`.
pub fn coerce_key(
    key: Value,
    coercion: KeyCoercion,
    max_depth: u32,
) -> Result<Value, EncodeError> {
    Ok(match coercion {
        KeyCoercion::Keep => key,
        KeyCoercion::String => match key {
            Value::String(_) => key,
            _ => Value::String(key_name(&key, max_depth)?),
        },
        KeyCoercion::Symbol => match key {
            Value::Symbol(_) => key,
            _ => Value::Symbol(Symbol::new(&key_name(&key, max_depth)?)),
        },
        KeyCoercion::Keyword => match key {
            Value::Keyword(_) => key,
            _ => Value::Keyword(Keyword::new(&key_name(&key, max_depth)?)),
        },
    })
}

/// Collects the entries of one map literal.
#[derive(Debug)]
pub enum MapBuilder {
    Hash(IndexMap<Value, Value>),
    AssociationList(Vec<Value>),
    FlatSequence(Vec<Value>),
}

impl MapBuilder {
    pub fn new(strategy: ContainerStrategy) -> MapBuilder {
        match strategy {
            ContainerStrategy::Hash => MapBuilder::Hash(IndexMap::new()),
            ContainerStrategy::AssociationList => MapBuilder::AssociationList(Vec::new()),
            ContainerStrategy::FlatSequence => MapBuilder::FlatSequence(Vec::new()),
        }
    }

    /// `key` must already be coerced. A repeated key replaces the
    /// earlier value in a hash map; the sequence strategies keep both.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self {
            MapBuilder::Hash(m) => {
                m.insert(key, value);
            }
            MapBuilder::AssociationList(v) => {
                v.push(Value::Pair(Box::new(key), Box::new(value)));
            }
            MapBuilder::FlatSequence(v) => {
                v.push(key);
                v.push(value);
            }
        }
    }

    pub fn finish(self) -> Value {
        match self {
            MapBuilder::Hash(m) => Value::Map(m),
            MapBuilder::AssociationList(v) => Value::List(v),
            MapBuilder::FlatSequence(v) => Value::List(v),
        }
    }
}
