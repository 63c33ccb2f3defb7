// Copyright 2025 Cowboy AI, LLC.

//! The customer client
//!
//! Dials the pizzeria, introduces itself, and runs a small prompt loop.
//! Text replies are printed verbatim. A pizza reply carries only a class
//! identifier; the customer resolves it against its own copy of the
//! ontology, derives the facts afresh, and muses over the description
//! card in a thought bubble.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

use crate::config::CustomerConfig;
use crate::describe::{self, THOUGHT_WIDTH};
use crate::errors::{OntologyError, PizzeriaError, PizzeriaResult};
use crate::ontology::{ClassId, Ontology};
use crate::protocol::{self, ClientFrame, ServerFrame};

/// A customer connected to the pizzeria
#[derive(Debug)]
pub struct Customer {
    ontology: Ontology,
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Customer {
    /// Load the customer's own ontology, wait the configured moment, and
    /// dial the pizzeria.
    pub async fn connect(config: &CustomerConfig) -> PizzeriaResult<Self> {
        let ontology = match &config.catalog_path {
            Some(path) => Ontology::from_file(path)?,
            None => Ontology::builtin()?,
        };
        tokio::time::sleep(config.connect_delay()).await;

        let addr = config.addr();
        let stream =
            TcpStream::connect(&addr)
                .await
                .map_err(|error| PizzeriaError::NoOpenPizzeria {
                    addr: addr.clone(),
                    reason: error.to_string(),
                })?;
        debug!(%addr, "Connected to the pizzeria");

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            ontology,
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }

    /// Introduce ourselves and return the pizzeria's welcome
    pub async fn greet(&mut self) -> PizzeriaResult<String> {
        protocol::write_frame(&mut self.writer, &ClientFrame::NewCustomer).await?;
        match protocol::read_frame::<_, ServerFrame>(&mut self.reader).await? {
            Some(ServerFrame::Text { body }) => Ok(body),
            Some(other) => Err(PizzeriaError::Handshake(format!(
                "expected a welcome, got {other:?}"
            ))),
            None => Err(PizzeriaError::Handshake(
                "the pizzeria hung up before saying welcome".to_string(),
            )),
        }
    }

    /// Send one free-text message to the pizzeria
    pub async fn send(&mut self, text: &str) -> PizzeriaResult<()> {
        protocol::write_frame(
            &mut self.writer,
            &ClientFrame::Say {
                text: text.to_string(),
            },
        )
        .await?;
        Ok(())
    }

    /// Wait for the next reply, rendered for the terminal.
    ///
    /// `None` means the pizzeria closed the conversation.
    pub async fn next_reply(&mut self) -> PizzeriaResult<Option<String>> {
        match protocol::read_frame::<_, ServerFrame>(&mut self.reader).await? {
            None => Ok(None),
            Some(ServerFrame::Text { body }) => Ok(Some(body)),
            Some(ServerFrame::Pizza { id }) => Ok(Some(think_about(&self.ontology, id)?)),
        }
    }

    /// Run the interactive prompt until the customer says bye or the
    /// pizzeria hangs up.
    ///
    /// Empty input is skipped without bothering the pizzeria. Saying bye
    /// simply makes the pizzeria close the conversation, which ends the
    /// loop through the usual `None` reply.
    pub async fn run_repl(&mut self) -> PizzeriaResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            self.send(message).await?;
            match self.next_reply().await? {
                Some(reply) => println!("{reply}"),
                None => break,
            }
        }
        Ok(())
    }
}

/// Resolve a pizza identifier and muse over it
fn think_about(ontology: &Ontology, id: ClassId) -> Result<String, OntologyError> {
    let pizza = ontology.pizza_by_id(id)?;
    let facts = ontology.facts(pizza)?;
    Ok(describe::thought_bubble(
        &describe::description_card(&facts),
        THOUGHT_WIDTH,
    ))
}

fn prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("> ");
    std::io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pizza_identifiers_become_thought_bubbles() {
        let ontology = Ontology::builtin().unwrap();
        let margherita = ontology.pizza_by_name("Margherita").unwrap();
        let thoughts = think_about(&ontology, margherita).unwrap();

        assert!(thoughts.starts_with(" _"));
        assert!(thoughts.ends_with('-'));
        assert!(thoughts.contains("( It's a Margherita Pizza"));
        assert!(thoughts.contains("(   - Mozzarella"));
        assert!(thoughts.contains("🌿 It is a vegetarian pizza 🌿"));
    }

    #[test]
    fn identifiers_that_are_not_pizzas_are_rejected() {
        let ontology = Ontology::builtin().unwrap();
        let mozzarella = ontology.class_id("MozzarellaTopping").unwrap();
        let err = think_about(&ontology, mozzarella).unwrap_err();
        assert_eq!(err, OntologyError::NotAPizza(mozzarella.0));
    }
}
