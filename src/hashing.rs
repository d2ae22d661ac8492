//! Key hashing: a Horner string hash reduced modulo the capacity, and the
//! two derived hashes that drive the double-hashing probe sequence.

const HORNER_BASE: u128 = 31;

/// Polynomial hash of `key`'s bytes, reduced modulo `capacity` at every step.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn horner_hash(key: &str, capacity: usize) -> u64 {
    let m = capacity as u128;
    key.bytes()
        .fold(0u128, |h, b| (h * HORNER_BASE + b as u128) % m) as u64
}

/// Primary hash: the starting index of the probe sequence.
///
/// # Panics
///
/// Panics if `capacity` is zero.
#[inline]
pub fn h1(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Secondary hash: the probe step, always in `1..=capacity - 2`.
///
/// # Panics
///
/// Panics if `capacity` is 2 or less, in every build profile.
#[inline]
pub fn h2(hash: u64, capacity: usize) -> usize {
    assert!(capacity > 2, "h2 needs capacity > 2, got {capacity}");
    1 + (hash % (capacity as u64 - 2)) as usize
}

/// Every hash value derived from a key for one capacity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Hashes {
    pub hash: u64,
    pub h1: usize,
    pub h2: usize,
    pub capacity: usize,
}

impl Hashes {
    /// # Panics
    ///
    /// Panics if `capacity` is 2 or less. Table capacities from
    /// [`capacity_for`](crate::capacity::capacity_for) are always at least 3.
    pub fn of(key: &str, capacity: usize) -> Self {
        let hash = horner_hash(key, capacity);
        Hashes {
            hash,
            h1: h1(hash, capacity),
            h2: h2(hash, capacity),
            capacity,
        }
    }

    pub fn probe(&self) -> ProbeSequence {
        ProbeSequence {
            start: self.h1,
            step: self.h2,
            capacity: self.capacity,
            i: 0,
        }
    }
}

/// Indices `(h1 + i * h2) mod capacity` for `i in 0..capacity`.
///
/// With a prime capacity and `h2` in `1..capacity` the step is coprime with
/// the capacity, so the sequence is a permutation of `0..capacity`.
#[derive(Clone, Debug)]
pub struct ProbeSequence {
    start: usize,
    step: usize,
    capacity: usize,
    i: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.i >= self.capacity {
            return None;
        }
        let m = self.capacity as u128;
        let idx = (self.start as u128 + self.i as u128 * self.step as u128) % m;
        self.i += 1;
        Some(idx as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.capacity - self.i;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ProbeSequence {}
