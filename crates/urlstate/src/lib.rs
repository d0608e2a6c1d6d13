//! URL query string as the only persisted, shareable dashboard state.

pub mod map_state;
pub mod param;
pub mod query;
pub mod state;
pub mod store;

pub use map_state::*;
pub use param::*;
pub use query::*;
pub use state::*;
pub use store::*;

use foundation::bounds::BoundsError;

#[derive(Debug, Clone, PartialEq)]
pub enum UrlStateError {
    /// No browser location/history to read from or write to.
    Unavailable,
    Io(String),
    /// A value was refused before anything was committed.
    Rejected(BoundsError),
}

impl std::fmt::Display for UrlStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlStateError::Unavailable => write!(f, "browser location unavailable"),
            UrlStateError::Io(msg) => write!(f, "url state error: {msg}"),
            UrlStateError::Rejected(err) => write!(f, "rejected value: {err}"),
        }
    }
}

impl std::error::Error for UrlStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UrlStateError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoundsError> for UrlStateError {
    fn from(err: BoundsError) -> Self {
        UrlStateError::Rejected(err)
    }
}
