// Copyright 2025 Cowboy AI, LLC.

//! Framed wire exchange between customer and pizzeria
//!
//! Frames are single JSON objects, one per line. Newline delimiting keeps
//! multi-line reply text unambiguous, and the tagged encoding lets the
//! reply to an order be either plain text or a pizza identifier without
//! the receiving side guessing from raw bytes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::errors::ProtocolError;
use crate::ontology::ClassId;

/// Frames a customer sends to the pizzeria
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Handshake opener; must be the first frame on a connection
    NewCustomer,
    /// One free-text customer message
    Say {
        /// The raw text the customer typed
        text: String,
    },
}

/// Frames the pizzeria sends to a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum ServerFrame {
    /// A reply to print verbatim
    Text {
        /// Reply body, possibly spanning many lines
        body: String,
    },
    /// An ordered pizza, sent as a class identifier for the customer to
    /// resolve against its own copy of the ontology
    Pizza {
        /// Interned class id of the pizza
        id: ClassId,
    },
}

/// Read one frame from a buffered reader.
///
/// Returns `Ok(None)` on a clean end of stream and a
/// [`ProtocolError::Malformed`] when the line is not a valid frame.
pub async fn read_frame<R, F>(reader: &mut R) -> Result<Option<F>, ProtocolError>
where
    R: AsyncBufRead + Unpin,
    F: DeserializeOwned,
{
    let mut line = String::new();
    let bytes = reader.read_line(&mut line).await?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line.trim())?))
}

/// Write one frame followed by a newline and flush it out
pub async fn write_frame<W, F>(writer: &mut W, frame: &F) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    F: Serialize,
{
    let mut encoded = serde_json::to_vec(frame)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}
