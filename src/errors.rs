// Copyright 2025 Cowboy AI, LLC.

//! Error types for pizzeria operations

use thiserror::Error;

/// Errors raised while loading or querying the pizza ontology
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OntologyError {
    /// Two catalog entries share the same class name
    #[error("Duplicate class: {0}")]
    DuplicateClass(String),

    /// A catalog entry referenced a class that is not defined anywhere
    #[error("Unknown class {referenced} referenced by {referrer}")]
    UnknownClass {
        /// Name of the class that does not exist
        referenced: String,
        /// Name of the entry holding the dangling reference
        referrer: String,
    },

    /// A name was looked up that does not exist in the taxonomy
    #[error("No such class: {0}")]
    NoSuchClass(String),

    /// A wire identifier resolved to something that is not on the menu
    #[error("Class id {0} does not name a pizza")]
    NotAPizza(u32),

    /// The catalog file could not be read
    #[error("Catalog read error: {0}")]
    CatalogRead(String),

    /// The catalog file could not be parsed
    #[error("Catalog parse error: {0}")]
    CatalogParse(String),
}

/// Errors raised by the framed wire exchange
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Socket read or write failed
    #[error("Socket error: {0}")]
    Io(#[from] std::io::Error),

    /// A received line was not a valid frame
    #[error("Malformed frame: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Malformed(err.to_string())
    }
}

/// Errors that can occur anywhere in the pizzeria
#[derive(Debug, Error)]
pub enum PizzeriaError {
    /// The pizza knowledge base failed
    #[error(transparent)]
    Ontology(#[from] OntologyError),

    /// The wire exchange failed
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The listener could not be bound after exhausting every attempt
    #[error("Could not open pizza place on {addr} after {attempts} attempts: {reason}")]
    BindExhausted {
        /// Address the listener was asked to bind
        addr: String,
        /// Number of attempts made before giving up
        attempts: u32,
        /// Error reported by the final attempt
        reason: String,
    },

    /// No server was reachable at the configured address
    #[error("Could not find an open pizzeria at {addr}: {reason}")]
    NoOpenPizzeria {
        /// Address that was dialled
        addr: String,
        /// Error reported by the connection attempt
        reason: String,
    },

    /// The peer broke the handshake contract
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// Socket-level failure outside the framed exchange
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pizzeria operations
pub type PizzeriaResult<T> = Result<T, PizzeriaError>;

impl PizzeriaError {
    /// Check if this error means the peer simply was not there
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            PizzeriaError::NoOpenPizzeria { .. } | PizzeriaError::BindExhausted { .. }
        )
    }
}
