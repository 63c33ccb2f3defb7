// Copyright 2025 Cowboy AI, LLC.

//! The pizzeria server
//!
//! Listens for customers and answers free-text requests by consulting the
//! shared ontology. The ontology is loaded once and shared across
//! connections; membership questions are still evaluated per reply, so
//! every answer reflects a fresh run of the reasoner. Each customer gets
//! their own task and a session span carrying the peer address.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{ServiceConfig, WireMode};
use crate::describe;
use crate::errors::{PizzeriaError, PizzeriaResult, ProtocolError};
use crate::intent::{Intent, IntentParser};
use crate::ontology::Ontology;
use crate::protocol::{self, ClientFrame, ServerFrame};

/// Handshake reply every customer gets (sic, the lowercase "i" included)
const WELCOME: &str = "Welcome to Pizza Place, how can i help you?";

/// Reply to a greeting
const GREET_BACK: &str = "\nHello, welcome to Pizza Place :)\n\n\
     You can either ask for the menu or order a pizza using the pizza place chat bot.\n";

/// Reply to anything the pizzeria cannot make sense of
const NOT_UNDERSTOOD: &str = "Sorry, I couldn't understand";

/// First lines of the menu reply
const MENU_HEADER: &str = "\nOf course, here is the menu:\n\n";

/// The pizzeria: configuration plus the shared knowledge base
#[derive(Debug, Clone)]
pub struct PizzaPlace {
    config: ServiceConfig,
    ontology: Arc<Ontology>,
}

impl PizzaPlace {
    /// Open a pizzeria over an already-built ontology
    pub fn new(config: ServiceConfig, ontology: Ontology) -> Self {
        Self {
            config,
            ontology: Arc::new(ontology),
        }
    }

    /// Load the catalog named by the configuration and open the pizzeria
    pub fn open(config: ServiceConfig) -> PizzeriaResult<Self> {
        let ontology = match &config.catalog_path {
            Some(path) => Ontology::from_file(path)?,
            None => Ontology::builtin()?,
        };
        Ok(Self::new(config, ontology))
    }

    /// The shared ontology
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// The configuration the pizzeria was opened with
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Bind the listener, retrying until an attempt succeeds or the
    /// configured attempts run out.
    ///
    /// The retry loop lets the pizzeria be restarted while the previous
    /// listener's port is still cooling down.
    pub async fn bind(&self) -> PizzeriaResult<TcpListener> {
        let addr = self.config.addr();
        let attempts = self.config.bind_attempts.max(1);
        let mut reason = String::new();
        for attempt in 1..=attempts {
            match TcpListener::bind(&addr).await {
                Ok(listener) => return Ok(listener),
                Err(error) => {
                    warn!(%addr, attempt, %error, "Could not bind, retrying");
                    reason = error.to_string();
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.config.bind_retry_delay()).await;
            }
        }
        Err(PizzeriaError::BindExhausted {
            addr,
            attempts,
            reason,
        })
    }

    /// Accept customers forever, one task per connection.
    ///
    /// An accept-level failure (a connection reset while it waited in
    /// the queue, descriptors running out) is logged and skipped; the
    /// pizzeria stays open.
    pub async fn serve(self, listener: TcpListener) -> PizzeriaResult<()> {
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    warn!(%error, "Could not accept a customer");
                    continue;
                }
            };
            let session = Session::new(&self, peer);
            tokio::spawn(async move {
                if let Err(error) = session.run(stream).await {
                    warn!(%peer, %error, "Customer session ended with an error");
                }
            });
        }
    }
}

/// One customer's conversation with the pizzeria
struct Session {
    id: Uuid,
    peer: SocketAddr,
    ontology: Arc<Ontology>,
    mode: WireMode,
    parser: IntentParser,
}

impl Session {
    fn new(place: &PizzaPlace, peer: SocketAddr) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer,
            ontology: Arc::clone(&place.ontology),
            mode: place.config.wire_mode,
            parser: IntentParser::new(),
        }
    }

    async fn run(self, stream: TcpStream) -> Result<(), ProtocolError> {
        let span = info_span!("customer", peer = %self.peer, session = %self.id);
        let (read_half, write_half) = stream.into_split();
        self.serve_customer(BufReader::new(read_half), write_half)
            .instrument(span)
            .await
    }

    /// Drive one conversation to its end.
    ///
    /// A connection that does not open with the customer handshake is
    /// closed without a word. After the welcome, every message is parsed
    /// and answered until the customer says bye or hangs up; saying bye
    /// gets no reply, the connection just closes.
    async fn serve_customer<R, W>(self, mut reader: R, mut writer: W) -> Result<(), ProtocolError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match protocol::read_frame::<_, ClientFrame>(&mut reader).await? {
            Some(ClientFrame::NewCustomer) => {}
            Some(other) => {
                warn!(?other, "Connection opened without the customer handshake");
                return Ok(());
            }
            None => return Ok(()),
        }

        info!("New customer");
        send_text(&mut writer, WELCOME).await?;

        loop {
            let frame = match protocol::read_frame::<_, ClientFrame>(&mut reader).await {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(ProtocolError::Malformed(reason)) => {
                    warn!(%reason, "Dropping malformed frame");
                    send_text(&mut writer, NOT_UNDERSTOOD).await?;
                    continue;
                }
                Err(error) => return Err(error),
            };
            let text = match frame {
                ClientFrame::Say { text } => text,
                ClientFrame::NewCustomer => {
                    warn!("Customer introduced themselves twice");
                    send_text(&mut writer, NOT_UNDERSTOOD).await?;
                    continue;
                }
            };

            info!("Received: {text}");
            match self.parser.parse(&text) {
                Intent::Farewell => break,
                Intent::Greeting => {
                    info!("Greeting the customer back");
                    send_text(&mut writer, GREET_BACK).await?;
                }
                Intent::Menu => {
                    info!("Sending menu");
                    send_text(&mut writer, &self.menu_reply()).await?;
                }
                Intent::Order { pizza } => {
                    self.process_order(&mut writer, &pizza).await?;
                }
                Intent::Unknown => {
                    info!("I did not understand");
                    send_text(&mut writer, NOT_UNDERSTOOD).await?;
                }
            }
        }

        info!("Customer left");
        Ok(())
    }

    fn menu_reply(&self) -> String {
        let entries = self
            .ontology
            .menu()
            .iter()
            .map(|name| format!("  - {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{MENU_HEADER}{entries}\n")
    }

    async fn process_order<W>(&self, writer: &mut W, pizza_name: &str) -> Result<(), ProtocolError>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(pizza) = self.ontology.pizza_by_name(pizza_name) else {
            info!("Not found");
            let body = format!("Sorry, we don't have {pizza_name} at Pizza Place");
            return send_text(writer, &body).await;
        };

        match self.mode {
            WireMode::Reference => {
                info!("Sending pizza (id: {pizza})");
                protocol::write_frame(writer, &ServerFrame::Pizza { id: pizza }).await
            }
            WireMode::Inline => match self.ontology.facts(pizza) {
                Ok(facts) => {
                    info!("Sending pizza description");
                    send_text(writer, &describe::description_card(&facts)).await
                }
                Err(error) => {
                    warn!(%error, "Could not describe the pizza");
                    send_text(writer, NOT_UNDERSTOOD).await
                }
            },
        }
    }
}

async fn send_text<W>(writer: &mut W, body: &str) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    protocol::write_frame(
        writer,
        &ServerFrame::Text {
            body: body.to_string(),
        },
    )
    .await
}
