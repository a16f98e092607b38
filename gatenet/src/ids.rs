//! Entity Identity Registry
//!
//! Nets and gates are addressed by small integer ids that are unique within
//! one netlist. The registry hands them out, tracks which are in use, and
//! recycles released ids when configured to.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a gate within its netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(u32);

/// Identifier of a net within its netlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetId(u32);

macro_rules! impl_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            #[inline]
            pub fn new(id: u32) -> Self {
                $ty(id)
            }

            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $ty {
            fn from(id: u32) -> Self {
                $ty(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

impl_id!(GateId, "g");
impl_id!(NetId, "n");

/// Why an explicit id could not be reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    /// Id 0 is never handed out
    Zero,
    /// The id is already taken
    InUse,
}

/// Allocator for unique ids of one entity kind
///
/// Unclaimed ids are kept as inclusive ranges, so claiming an id far ahead
/// of the others costs the same as claiming the next one.
#[derive(Debug, Clone)]
pub struct IdRegistry {
    used: BTreeSet<u32>,
    /// start -> end (inclusive) of every allocatable range
    free: BTreeMap<u32, u32>,
    reuse_freed: bool,
}

impl IdRegistry {
    pub fn new(first_id: u32, reuse_freed: bool) -> Self {
        let mut free = BTreeMap::new();
        free.insert(first_id.max(1), u32::MAX);
        Self {
            used: BTreeSet::new(),
            free,
            reuse_freed,
        }
    }

    /// Peek at the id the next `allocate` call returns, `None` once the id
    /// space is used up.
    pub fn peek(&self) -> Option<u32> {
        self.free.keys().next().copied()
    }

    /// Hand out a fresh id and mark it as used.
    pub fn allocate(&mut self) -> Option<u32> {
        let id = self.peek()?;
        self.take(id);
        Some(id)
    }

    /// Claim a caller-chosen id.
    pub fn reserve(&mut self, id: u32) -> Result<(), ReserveError> {
        if id == 0 {
            return Err(ReserveError::Zero);
        }
        if self.used.contains(&id) {
            return Err(ReserveError::InUse);
        }
        self.take(id);
        Ok(())
    }

    /// Return an id to the pool. Returns false if it was not in use.
    pub fn release(&mut self, id: u32) -> bool {
        if !self.used.remove(&id) {
            return false;
        }
        if self.reuse_freed {
            self.give_back(id);
        }
        true
    }

    pub fn is_used(&self, id: u32) -> bool {
        self.used.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    fn take(&mut self, id: u32) {
        self.used.insert(id);
        if let Some((&start, &end)) = self.free.range(..=id).next_back() {
            if id <= end {
                self.free.remove(&start);
                if start < id {
                    self.free.insert(start, id - 1);
                }
                if id < end {
                    self.free.insert(id + 1, end);
                }
            }
        }
        if !self.reuse_freed {
            // monotonic: nothing below the newest id is handed out
            self.free = self.free.split_off(&id);
        }
    }

    fn give_back(&mut self, id: u32) {
        let mut start = id;
        let mut end = id;
        if let Some(next_end) = id.checked_add(1).and_then(|next| self.free.remove(&next)) {
            end = next_end;
        }
        if let Some((&prev_start, &prev_end)) = self.free.range(..id).next_back() {
            if prev_end.checked_add(1) == Some(id) {
                start = prev_start;
            }
        }
        self.free.insert(start, end);
    }
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new(1, true)
    }
}
