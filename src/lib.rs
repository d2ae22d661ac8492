//! double-hash-table: a fixed-capacity, open-addressing hash table of
//! usernames with double hashing, tombstone deletion and explicit
//! rebuilds, plus the interactive console that drives it.
//!
//! Internal Design:
//!
//! Summary
//! - `capacity`: sizes the table as the first prime at or above
//!   `ceil(n / load_factor)` (never below 3).
//! - `hashing`: Horner string hash modulo the capacity, the derived
//!   `h1`/`h2`, and the probe sequence `(h1 + i * h2) mod capacity`.
//! - `slot`: tri-state slots (`Empty`, `Occupied`, `Tombstone`).
//! - `table`: `DoubleHashTable`, where every operation goes through one slot
//!   resolution routine and then mutates the resolved slot itself.
//! - `trace`: probe events and observers backing the console's debug mode.
//! - `config` / `session`: parameter parsing and the command loop.
//!
//! Constraints
//! - Single-threaded; every mutation takes `&mut self`.
//! - Capacity is fixed at creation. Rehash and reorganize rebuild the slot
//!   array at the same capacity.
//! - The probe sequence is a permutation of all slots, so resolution
//!   terminates after at most `capacity` probes.
//! - Keys are unique among live entries and 1 to 30 characters long.
//!
//! Policies
//! - Three behaviors of the console program this models are questionable:
//!   delete not decrementing the count, reorganize relocating only deleted
//!   entries, and probing that stops at the first tombstone. `Policy`
//!   makes each one a switch; see its variants for the defaults.
//!
//! Notes and non-goals
//! - No growth: inserts fail with `TableFull` or `MaxElementsReached`
//!   rather than resizing.
//! - No persistence and no concurrent access.

pub mod capacity;
pub mod config;
pub mod error;
pub mod hashing;
pub mod policy;
pub mod session;
pub mod slot;
pub mod table;
mod table_proptest;
pub mod trace;

// Public surface
pub use config::{Config, Mode, PartialConfig};
pub use error::TableError;
pub use policy::{DeleteAccounting, Policy, ReorganizeMode, TombstoneProbe};
pub use session::{Session, SessionError};
pub use slot::{Slot, SlotRef, SlotState, MAX_KEY_LEN};
pub use table::{DoubleHashTable, Move, Rebuild, Resolution};
