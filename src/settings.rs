// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings for reading (decoding) and writing (encoding) data.

//! These are passed to every call; there is no global state, so
//! calls with different settings can run in parallel.

use crate::value::Value;
use chrono::FixedOffset;

/// How `{ }` literals are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerStrategy {
    /// `Value::Map`
    #[default]
    Hash,
    /// `Value::List` of `Value::Pair`
    AssociationList,
    /// `Value::List` of key, value, key, value, ..
    FlatSequence,
}

/// What map keys are converted to while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCoercion {
    String,
    Symbol,
    Keyword,
    /// Leave keys as read
    Keep,
}

impl ContainerStrategy {
    pub fn default_key_coercion(self) -> KeyCoercion {
        match self {
            ContainerStrategy::Hash => KeyCoercion::String,
            ContainerStrategy::AssociationList => KeyCoercion::Symbol,
            ContainerStrategy::FlatSequence => KeyCoercion::Keyword,
        }
    }
}

/// Setting `nil` and `false_value` to the same value makes `nil` and
/// `false` indistinguishable after reading; encoding then writes
/// `nil` for both.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeSettings {
    pub container: ContainerStrategy,
    /// `None`: use `container.default_key_coercion()`
    pub key_coercion: Option<KeyCoercion>,
    /// What `nil` is read as
    pub nil: Value,
    /// What `false` is read as
    pub false_value: Value,
    /// Maximal nesting of containers
    pub max_depth: u32,
}

impl DecodeSettings {
    pub fn key_coercion(&self) -> KeyCoercion {
        self.key_coercion.unwrap_or_else(|| self.container.default_key_coercion())
    }
}

// ^ the limit with default settings on Linux is around 1200
const DEFAULT_MAX_DEPTH: u32 = 500;

pub const HASH_SETTINGS: DecodeSettings = DecodeSettings {
    container: ContainerStrategy::Hash,
    key_coercion: None,
    nil: Value::Nil,
    false_value: Value::Bool(false),
    max_depth: DEFAULT_MAX_DEPTH,
};

pub const ALIST_SETTINGS: DecodeSettings = DecodeSettings {
    container: ContainerStrategy::AssociationList,
    key_coercion: None,
    nil: Value::Nil,
    false_value: Value::Bool(false),
    max_depth: DEFAULT_MAX_DEPTH,
};

pub const FLAT_SETTINGS: DecodeSettings = DecodeSettings {
    container: ContainerStrategy::FlatSequence,
    key_coercion: None,
    nil: Value::Nil,
    false_value: Value::Bool(false),
    max_depth: DEFAULT_MAX_DEPTH,
};

impl Default for DecodeSettings {
    fn default() -> DecodeSettings {
        HASH_SETTINGS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    /// Write lists of exactly two integers as `#inst`
    pub emit_timestamps: bool,
    /// Offset the `#inst` text is rendered in
    pub timestamp_offset: FixedOffset,
    /// Written as `nil`
    pub nil: Value,
    /// Written as `false`
    pub false_value: Value,
    /// Maximal nesting of containers
    pub max_depth: u32,
}

pub const ENCODE_SETTINGS: EncodeSettings = EncodeSettings {
    emit_timestamps: false,
    timestamp_offset: UTC,
    nil: Value::Nil,
    false_value: Value::Bool(false),
    max_depth: DEFAULT_MAX_DEPTH,
};

pub const TIMESTAMP_ENCODE_SETTINGS: EncodeSettings = EncodeSettings {
    emit_timestamps: true,
    timestamp_offset: UTC,
    nil: Value::Nil,
    false_value: Value::Bool(false),
    max_depth: DEFAULT_MAX_DEPTH,
};

const UTC: FixedOffset = match FixedOffset::east_opt(0) {
    Some(offset) => offset,
    None => panic!("zero offset is always valid"),
};

impl Default for EncodeSettings {
    fn default() -> EncodeSettings {
        ENCODE_SETTINGS
    }
}
