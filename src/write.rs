// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a [Value](crate::value::Value) tree to text.

//! `Value::List` is the ambiguous case: the association list and
//! flat sequence strategies produce lists, too, thus lists are
//! written according to their shape, checked in this order:
//!
//! 1. empty: `nil`
//! 2. even number of elements, all `Pair`s: a map
//! 3. even number of elements, a `Keyword` at every even index: a map
//! 4. with `emit_timestamps`, exactly two integers: `#inst "..."`
//! 5. otherwise `( )`
//!
//! The shape decides, not where the list came from; e.g. a flat
//! sequence read from `{}` is empty and comes back as `nil`, and the
//! list `(1 2)` becomes a timestamp if timestamps are enabled.
//!
//! Maps are written in their iteration order, which for
//! `Value::Map` is insertion order.

use crate::error::EncodeError;
use crate::settings::{EncodeSettings, ENCODE_SETTINGS};
use crate::value::{Parenkind, Value};
use chrono::{FixedOffset, TimeZone};

fn char2escape(c: char) -> Option<&'static str> {
    match c {
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        '\x08' => Some("\\b"),
        '\x0C' => Some("\\f"),
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        _ => None
    }
}

fn write_char(out: &mut String, c: char) {
    if let Some(escape) = char2escape(c) {
        out.push_str(escape)
    } else if (' '..='~').contains(&c) {
        out.push(c)
    } else {
        // Outside the BMP as a surrogate pair, which the reader
        // combines again.
        let mut buf = [0u16; 2];
        for unit in c.encode_utf16(&mut buf) {
            out.push_str(&format!("\\u{:04x}", unit));
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        write_char(out, c);
    }
    out.push('"');
}

/// `#inst` text for a list of two integers, taken as the high and
/// low 16 bit halves of the seconds since the epoch. `None` if out
/// of range.
fn timestamp(items: &[Value], offset: FixedOffset) -> Option<String> {
    match items {
        [high, low] if high.is_integer() && low.is_integer() => {
            let secs = high.as_i64()?
                .checked_mul(1 << 16)?
                .checked_add(low.as_i64()?)?;
            let t = offset.timestamp_opt(secs, 0).single()?;
            Some(t.to_rfc3339())
        }
        _ => None
    }
}

fn write_seq(
    out: &mut String,
    pk: Parenkind,
    items: &[Value],
    settings: &EncodeSettings,
    depth_fuel: u32,
) -> Result<(), EncodeError> {
    out.push(pk.opening());
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(out, item, settings, depth_fuel)?;
    }
    out.push(pk.closing());
    Ok(())
}

fn write_entries<'v>(
    out: &mut String,
    entries: impl Iterator<Item = (&'v Value, &'v Value)>,
    settings: &EncodeSettings,
    depth_fuel: u32,
) -> Result<(), EncodeError> {
    out.push('{');
    for (i, (k, v)) in entries.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(out, k, settings, depth_fuel)?;
        out.push(' ');
        write_value(out, v, settings, depth_fuel)?;
    }
    out.push('}');
    Ok(())
}

fn write_list(
    out: &mut String,
    items: &[Value],
    settings: &EncodeSettings,
    depth_fuel: u32,
) -> Result<(), EncodeError> {
    let even = items.len() % 2 == 0;
    if items.is_empty() {
        out.push_str("nil");
        Ok(())
    } else if even && items.iter().all(Value::is_pair) {
        write_entries(
            out,
            items.iter().filter_map(|p| match p {
                Value::Pair(k, v) => Some((&**k, &**v)),
                _ => None
            }),
            settings,
            depth_fuel)
    } else if even && items.iter().step_by(2).all(Value::is_keyword) {
        write_entries(
            out,
            items.chunks_exact(2).map(|kv| (&kv[0], &kv[1])),
            settings,
            depth_fuel)
    } else if let Some(text) = settings.emit_timestamps
        .then(|| timestamp(items, settings.timestamp_offset))
        .flatten()
    {
        out.push_str("#inst ");
        write_string(out, &text);
        Ok(())
    } else {
        write_seq(out, Parenkind::Round, items, settings, depth_fuel)
    }
}

// Containers nested below `depth_fuel` levels are refused.
fn enter(depth_fuel: u32) -> Result<u32, EncodeError> {
    depth_fuel.checked_sub(1).ok_or_else(
        || EncodeError::UnencodableValue("container nesting too deep".into()))
}

fn write_value(
    out: &mut String,
    v: &Value,
    settings: &EncodeSettings,
    depth_fuel: u32,
) -> Result<(), EncodeError> {
    if *v == settings.nil {
        out.push_str("nil");
        return Ok(())
    }
    if *v == settings.false_value {
        out.push_str("false");
        return Ok(())
    }
    match v {
        Value::Nil => out.push_str("nil"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::String(s) => write_string(out, s),
        Value::Keyword(k) => {
            out.push(':');
            out.push_str(k.name())
        }
        // Symbols are written as strings and thus read back as such.
        Value::Symbol(s) => write_string(out, s.name()),
        // Non-finite floats as ##Inf, ##-Inf, ##NaN
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Map(m) => write_entries(out, m.iter(), settings, enter(depth_fuel)?)?,
        Value::Vector(items) =>
            write_seq(out, Parenkind::Square, items, settings, enter(depth_fuel)?)?,
        Value::Set(items) => {
            let depth_fuel = enter(depth_fuel)?;
            out.push('#');
            write_seq(out, Parenkind::Curly, items, settings, depth_fuel)?
        }
        Value::List(items) => write_list(out, items, settings, enter(depth_fuel)?)?,
        Value::Pair(a, b) => {
            let depth_fuel = enter(depth_fuel)?;
            out.push('(');
            write_value(out, a, settings, depth_fuel)?;
            out.push(' ');
            write_value(out, b, settings, depth_fuel)?;
            out.push(')')
        }
    }
    Ok(())
}

/// Write `value` with the default settings (no timestamps, at most
/// 500 levels of nested containers).
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    encode_with(value, &ENCODE_SETTINGS)
}

pub fn encode_with(
    value: &Value,
    settings: &EncodeSettings
) -> Result<String, EncodeError> {
    let mut out = String::new();
    write_value(&mut out, value, settings, settings.max_depth)?;
    Ok(out)
}
