// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Symbol must not be empty")]
    EmptySymbol,
}

pub type Result<T> = std::result::Result<T, Error>;
