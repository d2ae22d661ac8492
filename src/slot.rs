//! Slot states of the open-addressing array.

/// Longest key accepted by the table, in characters.
pub const MAX_KEY_LEN: usize = 30;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Slot {
    /// Never used. Ends every probe sequence.
    #[default]
    Empty,
    /// Holds a live key.
    Occupied(String),
    /// Held a key that was deleted. The key is kept for display and for
    /// reorganize; the slot may be reused by an insert.
    Tombstone(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SlotState {
    Empty,
    Occupied,
    Tombstone,
}

impl SlotState {
    /// Status word used by the table display.
    pub fn label(self) -> &'static str {
        match self {
            SlotState::Empty => "Empty",
            SlotState::Occupied => "Active",
            SlotState::Tombstone => "Deleted",
        }
    }
}

impl Slot {
    pub fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Occupied(_) => SlotState::Occupied,
            Slot::Tombstone(_) => SlotState::Tombstone,
        }
    }

    /// The stored key, live or deleted.
    pub fn key(&self) -> Option<&str> {
        match self {
            Slot::Empty => None,
            Slot::Occupied(k) | Slot::Tombstone(k) => Some(k),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone(_))
    }

    /// True if the slot holds `key` as a live entry.
    pub fn holds(&self, key: &str) -> bool {
        matches!(self, Slot::Occupied(k) if k == key)
    }

    /// Turns a live entry into a tombstone. Other states are left as is.
    pub(crate) fn bury(&mut self) {
        if let Slot::Occupied(k) = self {
            *self = Slot::Tombstone(core::mem::take(k));
        }
    }
}

/// Read-only view of a live slot, returned by a successful search.
///
/// Borrows the table: it cannot outlive the next mutating call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SlotRef<'a> {
    pub index: usize,
    pub key: &'a str,
}

pub(crate) fn key_is_valid(key: &str) -> bool {
    !key.is_empty() && key.chars().count() <= MAX_KEY_LEN
}
