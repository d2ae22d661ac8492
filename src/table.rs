//! DoubleHashTable: fixed-capacity open addressing over string keys.
//!
//! Every hash-involving operation goes through `resolve_slot`, which walks
//! the double-hashing probe sequence and reports either the slot holding the
//! key or a slot an insert may use. Mutations are applied by the caller of
//! the resolution, never by the resolution itself.

use crate::capacity::capacity_for;
use crate::error::TableError;
use crate::hashing::Hashes;
use crate::policy::{DeleteAccounting, Policy, ReorganizeMode, TombstoneProbe};
use crate::slot::{key_is_valid, Slot, SlotRef, SlotState, MAX_KEY_LEN};
use crate::trace::{NoTrace, ProbeEvent, ProbeObserver, Relocation};
use std::collections::TryReserveError;

/// Outcome of walking the probe sequence for a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// The slot at this index holds the key as a live entry.
    Hit(usize),
    /// The key is absent; the slot at this index (empty or tombstone) can
    /// take it.
    Vacant(usize),
}

impl Resolution {
    pub fn index(self) -> usize {
        match self {
            Resolution::Hit(i) | Resolution::Vacant(i) => i,
        }
    }
}

/// One entry carried into a rebuilt slot array.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Move {
    pub key: String,
    pub from: usize,
    pub to: usize,
}

/// What a rehash or reorganize did.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Rebuild {
    /// Entries carried over, in old-index order. In a tombstones-only
    /// reorganize, a tombstone whose key was already relocated is still
    /// listed here, with the same `to` as the first one.
    pub moves: Vec<Move>,
    /// Non-empty old slots that were not carried over: slots in the state
    /// the rebuild drops, and live duplicates collapsed by rehash or a
    /// compacting reorganize.
    pub discarded: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DoubleHashTable {
    slots: Vec<Slot>,
    load_factor: f64,
    count: usize,
    max_elements: usize,
    policy: Policy,
}

impl DoubleHashTable {
    /// Table for at most `max_elements` keys, sized from `load_factor`.
    pub fn new(max_elements: usize, load_factor: f64) -> Result<Self, TableError> {
        Self::with_policy(max_elements, load_factor, Policy::default())
    }

    pub fn with_policy(
        max_elements: usize,
        load_factor: f64,
        policy: Policy,
    ) -> Result<Self, TableError> {
        let capacity = capacity_for(max_elements, load_factor)?;
        let slots = empty_slots(capacity).map_err(|_| TableError::InvalidCapacity {
            n: max_elements,
            load_factor,
        })?;
        Ok(Self {
            slots,
            load_factor,
            count: 0,
            max_elements,
            policy,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries the table counts as live (see [`DeleteAccounting`]).
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstone()).count()
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Non-empty slots with their indices, in index order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        self.slots.iter().enumerate().filter(|(_, s)| !s.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_ok()
    }

    pub fn resolve_slot(&self, key: &str) -> Result<Resolution, TableError> {
        self.resolve_slot_traced(key, &mut NoTrace)
    }

    /// Walks the probe sequence of `key`, reporting each step to `obs`.
    ///
    /// Fails with [`TableError::TableFull`] after `capacity` probes if no
    /// slot qualifies.
    pub fn resolve_slot_traced(
        &self,
        key: &str,
        obs: &mut dyn ProbeObserver,
    ) -> Result<Resolution, TableError> {
        resolve_in(&self.slots, self.policy.probe, key, obs)
    }

    pub fn insert(&mut self, key: &str) -> Result<usize, TableError> {
        self.insert_traced(key, &mut NoTrace)
    }

    /// Stores `key` and returns its index.
    pub fn insert_traced(
        &mut self,
        key: &str,
        obs: &mut dyn ProbeObserver,
    ) -> Result<usize, TableError> {
        if !key_is_valid(key) {
            return Err(TableError::InvalidKey {
                key: key.to_string(),
                max_len: MAX_KEY_LEN,
            });
        }
        if self.count >= self.max_elements {
            return Err(TableError::MaxElementsReached {
                max: self.max_elements,
            });
        }
        match self.resolve_slot_traced(key, obs)? {
            Resolution::Vacant(index) => {
                self.slots[index] = Slot::Occupied(key.to_string());
                self.count += 1;
                Ok(index)
            }
            Resolution::Hit(index) => Err(TableError::AlreadyExists {
                key: key.to_string(),
                index,
            }),
        }
    }

    pub fn remove(&mut self, key: &str) -> Result<usize, TableError> {
        self.remove_traced(key, &mut NoTrace)
    }

    /// Marks the slot holding `key` as a tombstone and returns its index.
    pub fn remove_traced(
        &mut self,
        key: &str,
        obs: &mut dyn ProbeObserver,
    ) -> Result<usize, TableError> {
        match self.resolve_slot_traced(key, obs) {
            Ok(Resolution::Hit(index)) => {
                self.slots[index].bury();
                if self.policy.delete == DeleteAccounting::Decrement {
                    self.count -= 1;
                }
                Ok(index)
            }
            // A full cycle without a hit means the key is not stored.
            Ok(Resolution::Vacant(_)) | Err(TableError::TableFull) => Err(TableError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub fn search(&self, key: &str) -> Result<SlotRef<'_>, TableError> {
        self.search_traced(key, &mut NoTrace)
    }

    pub fn search_traced(
        &self,
        key: &str,
        obs: &mut dyn ProbeObserver,
    ) -> Result<SlotRef<'_>, TableError> {
        match self.resolve_slot_traced(key, obs) {
            Ok(Resolution::Hit(index)) => self.slots[index]
                .key()
                .map(|k| SlotRef { index, key: k })
                .ok_or_else(|| TableError::NotFound {
                    key: key.to_string(),
                }),
            Ok(Resolution::Vacant(_)) | Err(TableError::TableFull) => Err(TableError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    pub fn rehash(&mut self) -> Rebuild {
        self.rehash_traced(&mut NoTrace)
    }

    /// Rebuilds the slot array at the same capacity from the live entries,
    /// dropping every tombstone.
    pub fn rehash_traced(&mut self, obs: &mut dyn ProbeObserver) -> Rebuild {
        let rebuild = self.rebuild(SlotState::Occupied, Relocation::Rehash, obs);
        self.count = rebuild.moves.len();
        rebuild
    }

    pub fn reorganize(&mut self) -> Result<Rebuild, TableError> {
        self.reorganize_traced(&mut NoTrace)
    }

    /// Rebuilds the slot array according to [`ReorganizeMode`].
    ///
    /// Requires at least one tombstone; otherwise fails with
    /// [`TableError::NothingToReorganize`] and leaves the table untouched.
    pub fn reorganize_traced(
        &mut self,
        obs: &mut dyn ProbeObserver,
    ) -> Result<Rebuild, TableError> {
        if self.tombstones() == 0 {
            return Err(TableError::NothingToReorganize);
        }
        let rebuild = match self.policy.reorganize {
            ReorganizeMode::Compact => {
                let r = self.rebuild(SlotState::Occupied, Relocation::Reorganize, obs);
                self.count = r.moves.len();
                r
            }
            ReorganizeMode::TombstonesOnly => {
                let r = self.rebuild(SlotState::Tombstone, Relocation::Reorganize, obs);
                for m in &r.moves {
                    self.slots[m.to].bury();
                }
                self.count = match self.policy.delete {
                    DeleteAccounting::Decrement => 0,
                    DeleteAccounting::Retain => r.moves.len(),
                };
                r
            }
        };
        Ok(rebuild)
    }

    /// Swaps in a fresh slot array and re-inserts, as live entries, the keys
    /// of every old slot in state `keep`. A repeated key collapses onto its
    /// first placement: tombstones count that as a move, live entries as a
    /// discard.
    fn rebuild(
        &mut self,
        keep: SlotState,
        kind: Relocation,
        obs: &mut dyn ProbeObserver,
    ) -> Rebuild {
        let capacity = self.capacity();
        let old = core::mem::replace(&mut self.slots, vec![Slot::Empty; capacity]);
        let mut out = Rebuild::default();
        for (from, slot) in old.into_iter().enumerate() {
            if slot.is_empty() {
                continue;
            }
            if slot.state() != keep {
                out.discarded += 1;
                continue;
            }
            let key = match slot {
                Slot::Occupied(k) | Slot::Tombstone(k) => k,
                Slot::Empty => continue,
            };
            // The fresh array holds no tombstones while it is being filled.
            match resolve_in(&self.slots, TombstoneProbe::Continue, &key, obs) {
                Ok(Resolution::Vacant(to)) => {
                    obs.event(ProbeEvent::Relocated {
                        kind,
                        key: &key,
                        from,
                        to,
                    });
                    self.slots[to] = Slot::Occupied(key.clone());
                    out.moves.push(Move { key, from, to });
                }
                Ok(Resolution::Hit(to)) if keep == SlotState::Tombstone => {
                    obs.event(ProbeEvent::Relocated {
                        kind,
                        key: &key,
                        from,
                        to,
                    });
                    out.moves.push(Move { key, from, to });
                }
                Ok(Resolution::Hit(_)) => out.discarded += 1,
                // The fresh array has as many slots as the old one, so
                // every kept key finds room.
                Err(e) => {
                    debug_assert!(false, "rebuild found no slot for `{key}`: {e}");
                    out.discarded += 1;
                }
            }
        }
        out
    }
}

/// A slot array of `capacity` empty slots, or an error if it cannot be
/// allocated.
fn empty_slots(capacity: usize) -> Result<Vec<Slot>, TryReserveError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize(capacity, Slot::Empty);
    Ok(slots)
}

fn resolve_in(
    slots: &[Slot],
    probe: TombstoneProbe,
    key: &str,
    obs: &mut dyn ProbeObserver,
) -> Result<Resolution, TableError> {
    let hashes = Hashes::of(key, slots.len());
    obs.event(ProbeEvent::Hashes {
        key,
        h1: hashes.h1,
        h2: hashes.h2,
    });
    let mut reusable = None;
    for (i, index) in hashes.probe().enumerate() {
        obs.event(ProbeEvent::Attempt {
            attempt: i + 1,
            index,
        });
        let resolved = match &slots[index] {
            Slot::Empty => Some(Resolution::Vacant(reusable.unwrap_or(index))),
            Slot::Occupied(k) if k == key => Some(Resolution::Hit(index)),
            Slot::Occupied(_) => None,
            Slot::Tombstone(_) => match probe {
                TombstoneProbe::Stop => Some(Resolution::Vacant(index)),
                TombstoneProbe::Continue => {
                    reusable.get_or_insert(index);
                    None
                }
            },
        };
        if let Some(r) = resolved {
            report(obs, key, r);
            return Ok(r);
        }
    }
    match reusable {
        Some(index) => {
            let r = Resolution::Vacant(index);
            report(obs, key, r);
            Ok(r)
        }
        None => Err(TableError::TableFull),
    }
}

fn report(obs: &mut dyn ProbeObserver, key: &str, r: Resolution) {
    obs.event(ProbeEvent::Resolved {
        key,
        index: r.index(),
        hit: matches!(r, Resolution::Hit(_)),
    });
}
