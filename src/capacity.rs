//! Table sizing: prime capacities derived from an element count and a
//! load factor.

use crate::error::TableError;

/// Smallest capacity handed out. `h2` divides by `capacity - 2`, so any
/// capacity must be strictly greater than 2.
pub const MIN_CAPACITY: usize = 3;

/// Trial division over the 6k ± 1 wheel.
pub fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5usize;
    while i.checked_mul(i).is_some_and(|sq| sq <= n) {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Returns the first prime `>= ceil(n / load_factor)` (and `>= MIN_CAPACITY`).
///
/// Fails with [`TableError::InvalidCapacity`] when `n` is zero, when the load
/// factor is not a finite positive number, or when the result does not fit
/// in `usize`.
pub fn capacity_for(n: usize, load_factor: f64) -> Result<usize, TableError> {
    if n == 0 || !load_factor.is_finite() || load_factor <= 0.0 {
        return Err(TableError::InvalidCapacity { n, load_factor });
    }
    let theoretical = (n as f64 / load_factor).ceil();
    if !theoretical.is_finite() || theoretical >= usize::MAX as f64 {
        return Err(TableError::InvalidCapacity { n, load_factor });
    }
    let mut candidate = (theoretical as usize).max(MIN_CAPACITY);
    while !is_prime(candidate) {
        candidate = candidate
            .checked_add(1)
            .ok_or(TableError::InvalidCapacity { n, load_factor })?;
    }
    Ok(candidate)
}
