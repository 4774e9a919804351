// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num::{BigInt, ToPrimitive};
use std::hash::{Hash, Hasher};

/// Numbers without fraction or exponent are read as integers of
/// unlimited size, all others as `f64` (precision beyond that is
/// lost silently).
#[derive(Debug, Clone)]
pub enum Number {
    Integer(BigInt),
    Float(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(n) => n.to_i64(),
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(n) => n.to_f64(),
            Number::Float(x) => Some(*x),
        }
    }

    /// Whether the textual form can be read back.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Float(x) => x.is_finite(),
        }
    }
}

impl std::ops::Neg for Number {
    type Output = Number;
    fn neg(self) -> Number {
        match self {
            Number::Integer(n) => Number::Integer(-n),
            Number::Float(x) => Number::Float(-x),
        }
    }
}

// Floats compare by bit pattern, so that `Number` can be `Eq` and be
// used in map keys: NaN equals itself, 0.0 and -0.0 differ.
impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Integer(n) => {
                0u8.hash(state);
                n.hash(state)
            }
            Number::Float(x) => {
                1u8.hash(state);
                x.to_bits().hash(state)
            }
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Number {
        Number::Integer(n.into())
    }
}

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Number {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Number {
        Number::Float(x)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Number::Integer(n) => f.write_fmt(format_args!("{}", n)),
            Number::Float(x) => {
                if x.is_nan() {
                    f.write_str("##NaN")
                } else if x.is_infinite() {
                    f.write_str(if *x > 0.0 { "##Inf" } else { "##-Inf" })
                } else {
                    // Debug is the shortest text that reads back to
                    // the same f64, and keeps ".0" on integral values.
                    f.write_fmt(format_args!("{:?}", x))
                }
            }
        }
    }
}
