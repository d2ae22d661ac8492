//! Behavior switches for the places where the observed console program and
//! the evidently intended semantics disagree. Defaults pick the intended
//! behavior except for reorganize, which stays literal.

use clap::ValueEnum;

/// What `remove` does to the live-entry count.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum DeleteAccounting {
    /// Count tracks live entries: a successful delete decrements it.
    #[default]
    Decrement,
    /// Count is never decremented by a delete, so it keeps counting
    /// tombstones as entries (and they keep counting toward the cap).
    Retain,
}

/// What `reorganize` carries over into the fresh slot array.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ReorganizeMode {
    /// Only tombstoned keys are relocated, still marked deleted. Live
    /// entries are dropped.
    #[default]
    TombstonesOnly,
    /// Live entries are relocated and tombstones dropped, same as rehash.
    Compact,
}

/// How slot resolution treats a tombstone on the probe path.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum TombstoneProbe {
    /// Walk past tombstones; only an empty slot ends an unsuccessful
    /// lookup. Inserts reuse the first tombstone seen.
    #[default]
    Continue,
    /// Stop at the first tombstone and treat it as the resolved slot. Keys
    /// further down the chain become unreachable until a rehash.
    Stop,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Policy {
    pub delete: DeleteAccounting,
    pub reorganize: ReorganizeMode,
    pub probe: TombstoneProbe,
}

impl Policy {
    /// Every switch set to reproduce the observed console program.
    pub fn literal() -> Self {
        Policy {
            delete: DeleteAccounting::Retain,
            reorganize: ReorganizeMode::TombstonesOnly,
            probe: TombstoneProbe::Stop,
        }
    }
}
