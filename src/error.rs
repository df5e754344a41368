use std::fmt;

use thiserror::Error;

use crate::{config::StoreKind, contact::Contact};

/// Errors returned by the store operations.
///
/// None of them is fatal. The store is left unchanged whenever an error is
/// returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A contact with an equal identity is already stored. The rejected
    /// contact is handed back.
    #[error("contact {0} already exists")]
    DuplicateIdentity(Contact),
    #[error("contact \"{0}\" does not exist")]
    NotFound(String),
    #[error("the store has exhausted its capacity of {capacity} contacts")]
    CapacityExceeded { capacity: usize },
    #[error("invalid connection: {kind} (\"{name}\")")]
    InvalidConnection {
        kind: ConnectionErrorKind,
        name: String,
    },
    #[error("{0} store does not support connections")]
    UnsupportedCapability(StoreKind),
}

impl Error {
    pub(crate) fn not_found(name: &str) -> Self {
        Error::NotFound(name.trim().to_owned())
    }

    pub(crate) fn invalid_connection(kind: ConnectionErrorKind, name: &str) -> Self {
        Error::InvalidConnection {
            kind,
            name: name.trim().to_owned(),
        }
    }
}

/// The reason a connection operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionErrorKind {
    SourceAbsent,
    DestinationAbsent,
    SelfLoop,
}

impl fmt::Display for ConnectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ConnectionErrorKind::SourceAbsent => "source does not exist",
            ConnectionErrorKind::DestinationAbsent => "destination does not exist",
            ConnectionErrorKind::SelfLoop => "a contact cannot be connected to itself",
        };
        f.write_str(reason)
    }
}
