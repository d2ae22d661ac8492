//! Probe diagnostics.
//!
//! Table operations report what they do as [`ProbeEvent`]s to a
//! [`ProbeObserver`]. The console picks an observer once from its mode:
//! [`NoTrace`] in normal mode, a [`TraceWriter`] over stderr in debug mode.
//! [`TraceLog`] keeps owned copies of the events for inspection.

use std::io::Write;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Relocation {
    Rehash,
    Reorganize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProbeEvent<'a> {
    /// Hash values computed for `key` before probing.
    Hashes { key: &'a str, h1: usize, h2: usize },
    /// One probe; `attempt` counts from 1.
    Attempt { attempt: usize, index: usize },
    /// Probing stopped at `index`; `hit` is true if the slot holds `key`.
    Resolved { key: &'a str, index: usize, hit: bool },
    /// An entry moved during a rebuild of the slot array.
    Relocated {
        kind: Relocation,
        key: &'a str,
        from: usize,
        to: usize,
    },
}

pub trait ProbeObserver {
    fn event(&mut self, event: ProbeEvent<'_>);
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTrace;

impl ProbeObserver for NoTrace {
    #[inline]
    fn event(&mut self, _event: ProbeEvent<'_>) {}
}

/// Renders one line per event.
///
/// Write failures are ignored: diagnostics must never fail a table operation.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        TraceWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProbeObserver for TraceWriter<W> {
    fn event(&mut self, event: ProbeEvent<'_>) {
        let _ = match event {
            ProbeEvent::Hashes { key, h1, h2 } => {
                writeln!(self.out, "h1({key}) = {h1}\nh2({key}) = {h2}")
            }
            ProbeEvent::Attempt { attempt, index } => {
                writeln!(self.out, "probe {attempt}: index {index}")
            }
            ProbeEvent::Resolved { key, index, hit } => {
                let what = if hit { "found" } else { "not found" };
                writeln!(self.out, "{key} {what} at index {index}")
            }
            ProbeEvent::Relocated {
                kind,
                key,
                from,
                to,
            } => {
                let label = match kind {
                    Relocation::Rehash => "rehash",
                    Relocation::Reorganize => "reorganize",
                };
                writeln!(self.out, "{label}: old index {from}, new index {to}, key {key}")
            }
        };
    }
}

/// Owned copy of a [`ProbeEvent`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OwnedProbeEvent {
    Hashes { key: String, h1: usize, h2: usize },
    Attempt { attempt: usize, index: usize },
    Resolved { key: String, index: usize, hit: bool },
    Relocated {
        kind: Relocation,
        key: String,
        from: usize,
        to: usize,
    },
}

impl From<ProbeEvent<'_>> for OwnedProbeEvent {
    fn from(e: ProbeEvent<'_>) -> Self {
        match e {
            ProbeEvent::Hashes { key, h1, h2 } => OwnedProbeEvent::Hashes {
                key: key.to_string(),
                h1,
                h2,
            },
            ProbeEvent::Attempt { attempt, index } => OwnedProbeEvent::Attempt { attempt, index },
            ProbeEvent::Resolved { key, index, hit } => OwnedProbeEvent::Resolved {
                key: key.to_string(),
                index,
                hit,
            },
            ProbeEvent::Relocated {
                kind,
                key,
                from,
                to,
            } => OwnedProbeEvent::Relocated {
                kind,
                key: key.to_string(),
                from,
                to,
            },
        }
    }
}

/// Records every event.
#[derive(Clone, Debug, Default)]
pub struct TraceLog {
    pub events: Vec<OwnedProbeEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of probe attempts recorded so far.
    pub fn attempts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OwnedProbeEvent::Attempt { .. }))
            .count()
    }
}

impl ProbeObserver for TraceLog {
    fn event(&mut self, event: ProbeEvent<'_>) {
        self.events.push(event.into());
    }
}
