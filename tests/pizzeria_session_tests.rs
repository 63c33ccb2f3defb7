//! End-to-end conversations with a pizzeria over real sockets
//!
//! Every test binds a pizzeria on an ephemeral port, walks a customer in
//! over TCP and checks the replies frame by frame.

use std::net::SocketAddr;
use std::time::Duration;

use pizza_place::config::{CustomerConfig, ServiceConfig, WireMode};
use pizza_place::ontology::Ontology;
use pizza_place::protocol::{self, ClientFrame, ServerFrame};
use pizza_place::service::PizzaPlace;
use pizza_place::Customer;
use pretty_assertions::assert_eq;
use tokio::io::BufReader;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

async fn open_pizza_place(mode: WireMode) -> SocketAddr {
    let config = ServiceConfig {
        port: 0,
        wire_mode: mode,
        ..ServiceConfig::default()
    };
    let place = PizzaPlace::new(config, Ontology::builtin().unwrap());
    let listener = place.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(place.serve(listener));
    addr
}

struct WalkInCustomer {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl WalkInCustomer {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    async fn handshake(&mut self) -> String {
        protocol::write_frame(&mut self.writer, &ClientFrame::NewCustomer)
            .await
            .unwrap();
        self.next_text().await
    }

    async fn say(&mut self, text: &str) {
        protocol::write_frame(
            &mut self.writer,
            &ClientFrame::Say {
                text: text.to_string(),
            },
        )
        .await
        .unwrap();
    }

    async fn next_frame(&mut self) -> Option<ServerFrame> {
        protocol::read_frame(&mut self.reader).await.unwrap()
    }

    async fn next_text(&mut self) -> String {
        match self.next_frame().await {
            Some(ServerFrame::Text { body }) => body,
            other => panic!("expected a text reply, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn customers_get_the_classic_welcome() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    assert_eq!(
        customer.handshake().await,
        "Welcome to Pizza Place, how can i help you?"
    );
}

#[tokio::test]
async fn greetings_are_returned_in_kind() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("good evening").await;
    let reply = customer.next_text().await;
    assert!(reply.starts_with("\nHello, welcome to Pizza Place :)"));
    assert!(reply.contains("ask for the menu or order a pizza"));
}

#[tokio::test]
async fn the_menu_lists_every_named_pizza() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("can i see the menu?").await;
    let menu = customer.next_text().await;
    assert!(menu.starts_with("\nOf course, here is the menu:\n\n"));
    assert!(menu.contains("  - Margherita\n"));
    assert!(menu.contains("  - UnclosedPizza\n"));
    assert_eq!(menu.matches("  - ").count(), 23);
}

#[tokio::test]
async fn asking_for_the_menu_beats_ordering_one() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("i want the menu").await;
    let reply = customer.next_text().await;
    assert!(reply.starts_with("\nOf course, here is the menu:"));
}

#[tokio::test]
async fn reference_mode_sends_the_interned_identifier() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("i want a lovely margherita").await;
    let frame = customer.next_frame().await;

    // The customer's own ontology interns the same catalog, so the id
    // must match without any coordination beyond the catalog itself
    let own_ontology = Ontology::builtin().unwrap();
    let margherita = own_ontology.pizza_by_name("margherita").unwrap();
    assert_eq!(frame, Some(ServerFrame::Pizza { id: margherita }));
}

#[tokio::test]
async fn inline_mode_sends_the_description_card() {
    let addr = open_pizza_place(WireMode::Inline).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("i want margherita").await;
    let card = customer.next_text().await;
    assert!(card.contains("It's a Margherita Pizza"));
    assert!(card.contains("🤌  This is an authentic Italian pizza 🤌"));
    assert!(card.contains("🌿 It is a vegetarian pizza 🌿"));
    assert!(!card.contains("🌶️"));
    assert!(card.contains("  - Mozzarella"));
}

#[tokio::test]
async fn unknown_pizzas_are_politely_declined() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("i want sushi").await;
    assert_eq!(
        customer.next_text().await,
        "Sorry, we don't have sushi at Pizza Place"
    );
}

#[tokio::test]
async fn nonsense_is_not_understood() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("flying spaghetti").await;
    assert_eq!(customer.next_text().await, "Sorry, I couldn't understand");
}

#[tokio::test]
async fn skipping_the_handshake_gets_you_nothing() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;

    customer.say("menu").await;
    assert_eq!(customer.next_frame().await, None);
}

#[tokio::test]
async fn saying_bye_closes_the_conversation() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut customer = WalkInCustomer::connect(addr).await;
    customer.handshake().await;

    customer.say("bye").await;
    assert_eq!(customer.next_frame().await, None);
}

#[tokio::test]
async fn two_customers_are_served_at_once() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let mut first = WalkInCustomer::connect(addr).await;
    let mut second = WalkInCustomer::connect(addr).await;
    first.handshake().await;
    second.handshake().await;

    first.say("i want veneziana").await;
    second.say("hello").await;

    let own_ontology = Ontology::builtin().unwrap();
    let veneziana = own_ontology.pizza_by_name("veneziana").unwrap();
    assert_eq!(
        first.next_frame().await,
        Some(ServerFrame::Pizza { id: veneziana })
    );
    assert!(second
        .next_text()
        .await
        .starts_with("\nHello, welcome to Pizza Place :)"));
}

#[tokio::test]
async fn an_aborted_connection_does_not_close_the_pizzeria() {
    let addr = open_pizza_place(WireMode::Reference).await;

    // A linger of zero turns the close into a hard reset, which the
    // pizzeria may see as an accept-time error
    let aborted = TcpStream::connect(addr).await.unwrap();
    aborted.set_linger(Some(Duration::ZERO)).unwrap();
    drop(aborted);

    let mut customer = WalkInCustomer::connect(addr).await;
    assert_eq!(
        customer.handshake().await,
        "Welcome to Pizza Place, how can i help you?"
    );
}

#[tokio::test]
async fn the_customer_client_resolves_pizzas_into_thoughts() {
    let addr = open_pizza_place(WireMode::Reference).await;
    let config = CustomerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        connect_delay_secs: 0,
        ..CustomerConfig::default()
    };

    let mut customer = Customer::connect(&config).await.unwrap();
    assert_eq!(
        customer.greet().await.unwrap(),
        "Welcome to Pizza Place, how can i help you?"
    );

    customer.send("i want one spicy cajun").await.unwrap();
    let thoughts = customer.next_reply().await.unwrap().unwrap();
    assert!(thoughts.starts_with(" _"));
    assert!(thoughts.contains("( It's a Cajun Pizza"));
    // The spicy warning is longer than the bubble width, so only its
    // first wrapped row is a stable substring
    assert!(thoughts.contains("I should be cautious"));

    customer.send("bye").await.unwrap();
    assert_eq!(customer.next_reply().await.unwrap(), None);
}

#[tokio::test]
async fn a_customer_who_cannot_find_a_pizzeria_gives_up() {
    // Nothing is listening on this port; bind briefly to learn a free
    // one, then drop the listener before the customer dials
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = CustomerConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        connect_delay_secs: 0,
        ..CustomerConfig::default()
    };
    let err = Customer::connect(&config).await.unwrap_err();
    assert!(err.is_unreachable());
}
