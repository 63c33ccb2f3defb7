//! # Pizza Place
//!
//! A toy pizzeria you can chat with over a socket, backed by the classic
//! pizza ontology.
//!
//! The crate ships both halves of the conversation:
//! - **Ontology**: catalog, interned taxonomy and an on-demand reasoner
//!   for the pizza class hierarchy
//! - **Intent**: trigger-phrase recognition for greetings, menu requests
//!   and orders
//! - **Protocol**: newline-delimited JSON frames shared by both sides
//! - **Service**: greets customers, parses their free-text requests and
//!   answers from the ontology
//! - **Customer**: a terminal client that orders pizzas and muses over
//!   what it receives
//!
//! ## Design notes
//!
//! 1. The ontology is loaded once per process and shared across customer
//!    sessions; membership is still evaluated per question, so answers
//!    always reflect the axioms
//! 2. In reference mode the wire carries class identifiers instead of
//!    descriptions; both sides rely on deterministic interning to mean
//!    the same pizza by the same id
//! 3. Replies are framed, so multi-line text and identifiers never get
//!    mixed up on the stream

#![warn(missing_docs)]

pub mod config;
pub mod customer;
pub mod describe;
pub mod errors;
pub mod intent;
pub mod ontology;
pub mod protocol;
pub mod service;

pub use config::{CustomerConfig, ParseWireModeError, ServiceConfig, WireMode};
pub use customer::Customer;
pub use errors::{OntologyError, PizzeriaError, PizzeriaResult, ProtocolError};
pub use intent::{Intent, IntentParser};
pub use ontology::{Catalog, ClassId, Ontology, PizzaFacts, Spiciness};
pub use protocol::{ClientFrame, ServerFrame};
pub use service::PizzaPlace;
