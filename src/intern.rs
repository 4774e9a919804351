// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interning of identifier names, so that keywords and symbols
//! compare by identity.

//! The table lives for the whole process and is never cleaned up;
//! every distinct name read or constructed stays allocated. Access is
//! behind a mutex, thus interning from several threads is fine;
//! comparing and hashing afterwards does not touch the table.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

static TABLE: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

/// A canonical handle for a name. Two handles are equal iff they
/// were interned from equal strings.
#[derive(Clone)]
pub struct Interned(Arc<str>);

pub fn intern(name: &str) -> Interned {
    let table = TABLE.get_or_init(|| Mutex::new(HashSet::new()));
    // A panic while holding the lock cannot leave the set half
    // updated, so a poisoned lock is still usable.
    let mut set = table.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(existing) = set.get(name) {
        Interned(Arc::clone(existing))
    } else {
        let new: Arc<str> = Arc::from(name);
        set.insert(Arc::clone(&new));
        Interned(new)
    }
}

impl Interned {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<u8>() as usize
    }
}

impl PartialEq for Interned {
    fn eq(&self, other: &Interned) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Interned {}

impl Hash for Interned {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state)
    }
}

impl std::fmt::Debug for Interned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        std::fmt::Debug::fmt(&*self.0, f)
    }
}
