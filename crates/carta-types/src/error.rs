use std::fmt;

use crate::item::ItemId;
use crate::price::PriceColumn;

/// Result type for carta-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Neither the selected price column nor the fallback column carries a
    /// value for the item. Fatal: the catalog shape is unusable for pricing.
    MissingPriceColumn { item: ItemId, column: PriceColumn },

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingPriceColumn { item, column } => write!(
                f,
                "price column '{}' is missing for item {} and no fallback value exists",
                column.key(),
                item
            ),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingPriceColumn { .. } => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
