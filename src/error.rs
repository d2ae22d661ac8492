use thiserror::Error;

/// Failure conditions of table operations. All are recoverable: the table is
/// left unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("cannot size a table for {n} elements at load factor {load_factor}")]
    InvalidCapacity { n: usize, load_factor: f64 },
    #[error("invalid key `{key}`: keys must be 1 to {max_len} characters")]
    InvalidKey { key: String, max_len: usize },
    #[error("table is full, no slot available")]
    TableFull,
    #[error("table already holds its maximum of {max} elements")]
    MaxElementsReached { max: usize },
    #[error("`{key}` already exists at index {index}")]
    AlreadyExists { key: String, index: usize },
    #[error("`{key}` not found")]
    NotFound { key: String },
    #[error("nothing to reorganize: delete at least one element first")]
    NothingToReorganize,
}
