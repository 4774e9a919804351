// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This is a reader and writer for an EDN-like notation: nil, booleans,
//! numbers, strings, `:keywords`, `'symbols`, `( )` lists, `[ ]`
//! vectors, `#{ }` sets and `{ }` maps, plus `#inst` timestamps on
//! output.
//!
//! * [decode](read::decode) turns a complete in-memory document into a
//!   [Value](value::Value) tree; there is no streaming input.
//!
//! * [encode](write::encode) turns a tree back into text.
//!
//! * How maps are represented after reading (hash map, association
//!   list, flat key/value list) and what their keys are converted to
//!   is chosen per call via [settings]; there is no global state.
//!
//! Errors carry the position (line and column) where reading failed.
//! The library never logs.
//!
//! Known asymmetries: symbols are written as strings, and lists are
//! written according to their shape (see [write]), thus not every
//! tree survives a write/read cycle unchanged.

pub mod container;
pub mod error;
pub mod intern;
pub mod number;
pub mod pos;
pub mod read;
pub mod scanner;
pub mod settings;
pub mod value;
pub mod write;

pub use error::{DecodeError, DecodeErrorWithPos, EncodeError, Error};
pub use read::{decode, decode_all, decode_with};
pub use settings::{ContainerStrategy, DecodeSettings, EncodeSettings, KeyCoercion};
pub use value::Value;
pub use write::{encode, encode_with};
