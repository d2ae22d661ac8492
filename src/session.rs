//! Interactive console over any reader and pair of writers.
//!
//! Prompts and results go to `out`; in debug mode probe diagnostics go to
//! `diag`. Input is consumed as whitespace-separated tokens, so answers may
//! share a line.

use crate::capacity::capacity_for;
use crate::config::{parse_load_factor, parse_max_elements, Config, ConfigError, Mode, PartialConfig};
use crate::error::TableError;
use crate::slot::Slot;
use crate::table::DoubleHashTable;
use crate::trace::{NoTrace, ProbeObserver, TraceWriter};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console I/O failed")]
    Io(#[from] io::Error),
    #[error("input closed before the table was configured")]
    InputClosed,
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Insert,
    Delete,
    Search,
    Display,
    Reorganize,
    Rehash,
    Quit,
}

impl Command {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "e" => Command::Insert,
            "s" => Command::Delete,
            "a" => Command::Search,
            "g" => Command::Display,
            "d" => Command::Reorganize,
            "r" => Command::Rehash,
            "q" => Command::Quit,
            _ => return None,
        })
    }
}

/// Whitespace-separated tokens read lazily, line by line.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(t) = self.pending.pop_front() {
                return Ok(Some(t));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Drops whatever is left of the current line.
    pub fn discard_line(&mut self) {
        self.pending.clear();
    }
}

pub struct Session<R, W, D> {
    input: Tokens<R>,
    out: W,
    diag: D,
}

impl<R: BufRead, W: Write, D: Write> Session<R, W, D> {
    pub fn new(input: R, out: W, diag: D) -> Self {
        Session {
            input: Tokens::new(input),
            out,
            diag,
        }
    }

    pub fn into_parts(self) -> (W, D) {
        (self.out, self.diag)
    }

    /// Configures a table, prompting for anything `partial` leaves open,
    /// then runs the command loop until `q` or end of input.
    pub fn run(&mut self, partial: PartialConfig) -> Result<(), SessionError> {
        let config = self.configure(partial)?;
        let mut table =
            DoubleHashTable::with_policy(config.max_elements, config.load_factor, config.policy)?;
        self.run_commands(&mut table, config.mode)
    }

    pub fn configure(&mut self, partial: PartialConfig) -> Result<Config, SessionError> {
        let max_elements = match partial.max_elements {
            Some(n) => n,
            None => self.ask("Number of elements to store: ", parse_max_elements)?,
        };
        let load_factor = match partial.load_factor {
            Some(lf) => lf,
            None => self.ask("Load factor (a positive number): ", parse_load_factor)?,
        };
        let capacity = capacity_for(max_elements, load_factor)?;
        writeln!(self.out, "Table capacity computed as {capacity}.")?;
        let mode = match partial.mode {
            Some(m) => m,
            None => self.ask("Mode (NORMAL/DEBUG): ", |s| s.parse::<Mode>())?,
        };
        Ok(Config {
            max_elements,
            load_factor,
            mode,
            policy: partial.policy,
        })
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, ConfigError>,
    ) -> Result<T, SessionError> {
        loop {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
            let token = self.input.next_token()?.ok_or(SessionError::InputClosed)?;
            match parse(&token) {
                Ok(v) => return Ok(v),
                Err(e) => {
                    self.input.discard_line();
                    writeln!(self.out, "{e}")?;
                }
            }
        }
    }

    /// Command loop over an existing table.
    pub fn run_commands(
        &mut self,
        table: &mut DoubleHashTable,
        mode: Mode,
    ) -> Result<(), SessionError> {
        let Session { input, out, diag } = self;
        let mut tracer = TraceWriter::new(&mut *diag);
        let mut silent = NoTrace;
        let obs: &mut dyn ProbeObserver = match mode {
            Mode::Debug => &mut tracer,
            Mode::Normal => &mut silent,
        };

        loop {
            write!(
                out,
                "\nInsert (e), Delete (s), Search (a), Display (g), Reorganize (d), Rehash (r), Quit (q): "
            )?;
            out.flush()?;
            let Some(token) = input.next_token()? else {
                break;
            };
            let Some(command) = Command::from_token(&token) else {
                writeln!(out, "Unknown command `{token}`. Enter one of e, s, a, g, d, r, q.")?;
                continue;
            };
            match command {
                Command::Quit => break,
                Command::Display => display(&mut *out, table)?,
                Command::Rehash => {
                    let r = table.rehash_traced(obs);
                    writeln!(
                        out,
                        "Table rehashed: {} entries kept, {} deleted entries dropped.",
                        r.moves.len(),
                        r.discarded
                    )?;
                }
                Command::Reorganize => match table.reorganize_traced(obs) {
                    Ok(r) => writeln!(
                        out,
                        "Table reorganized: {} entries relocated, {} discarded.",
                        r.moves.len(),
                        r.discarded
                    )?,
                    Err(e) => writeln!(out, "{e}")?,
                },
                Command::Insert | Command::Delete | Command::Search => {
                    let prompt = match command {
                        Command::Insert => "Username to insert: ",
                        Command::Delete => "Username to delete: ",
                        _ => "Username to search: ",
                    };
                    write!(out, "{prompt}")?;
                    out.flush()?;
                    let Some(key) = input.next_token()? else {
                        break;
                    };
                    match command {
                        Command::Insert => match table.insert_traced(&key, obs) {
                            Ok(i) => writeln!(out, "Stored {key} at index {i}.")?,
                            Err(e) => writeln!(out, "{e}")?,
                        },
                        Command::Delete => match table.remove_traced(&key, obs) {
                            Ok(i) => writeln!(out, "Deleted {key} at index {i}.")?,
                            Err(e) => writeln!(out, "{e}")?,
                        },
                        _ => match table.search_traced(&key, obs) {
                            Ok(s) => writeln!(out, "{} is at index {}.", s.key, s.index)?,
                            Err(e) => writeln!(out, "{e}")?,
                        },
                    }
                }
            }
        }
        out.flush()?;
        diag.flush()?;
        Ok(())
    }
}

fn display(out: &mut impl Write, table: &DoubleHashTable) -> io::Result<()> {
    writeln!(out, "\nTable capacity: {}", table.capacity())?;
    writeln!(out, "Table contents:")?;
    for (index, slot) in table.slots() {
        if let Slot::Occupied(key) | Slot::Tombstone(key) = slot {
            writeln!(
                out,
                "Index: {index}, username: {key}, status: {}",
                slot.state().label()
            )?;
        }
    }
    Ok(())
}
