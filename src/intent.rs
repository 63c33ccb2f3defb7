// Copyright 2025 Cowboy AI, LLC.

//! Free-text intent recognition
//!
//! The pizzeria does not run a natural-language pipeline. Customer messages
//! are matched against a handful of trigger phrases: an exact greeting, the
//! word "menu" anywhere, or an order opening with "i want". Matching is
//! ordered, so "i want the menu" asks for the menu rather than ordering a
//! pizza called "menu".

use regex::Regex;

/// Greetings the pizzeria recognizes, matched exactly after trimming and
/// lowercasing
const GREETINGS: [&str; 6] = [
    "hello",
    "hi",
    "hey",
    "good morning",
    "good evening",
    "good afternoon",
];

/// Opening every order starts with
const ORDER_PREFIX: &str = "i want";

/// Order pattern; the last word of the message names the pizza, so filler
/// like "i want a lovely margherita" still works
const ORDER_PATTERN: &str = r"(?i)i want.*\s(\w+)$";

/// What a customer message turned out to mean
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The customer said hello
    Greeting,
    /// The customer asked for the menu
    Menu,
    /// The customer ordered a pizza by name
    Order {
        /// The word the customer used for the pizza, lowercased
        pizza: String,
    },
    /// The customer is leaving
    Farewell,
    /// Anything the pizzeria does not understand
    Unknown,
}

/// Turns raw customer text into an [`Intent`]
#[derive(Debug, Clone)]
pub struct IntentParser {
    order: Regex,
}

impl IntentParser {
    /// Build a parser with the order pattern compiled
    pub fn new() -> Self {
        Self {
            order: Regex::new(ORDER_PATTERN).expect("order pattern is valid"),
        }
    }

    /// Classify one customer message.
    ///
    /// Matching happens on the trimmed, lowercased text and is ordered:
    /// farewell, greeting, menu, order. A message opening with "i want"
    /// that never names a pizza falls through to [`Intent::Unknown`].
    pub fn parse(&self, message: &str) -> Intent {
        let text = message.trim().to_lowercase();
        if text == "bye" {
            return Intent::Farewell;
        }
        if GREETINGS.contains(&text.as_str()) {
            return Intent::Greeting;
        }
        if text.contains("menu") {
            return Intent::Menu;
        }
        if text.starts_with(ORDER_PREFIX) {
            if let Some(pizza) = self
                .order
                .captures(&text)
                .and_then(|captures| captures.get(1))
            {
                return Intent::Order {
                    pizza: pizza.as_str().to_string(),
                };
            }
        }
        Intent::Unknown
    }
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn parse(message: &str) -> Intent {
        IntentParser::new().parse(message)
    }

    #[test_case("hello" ; "plain hello")]
    #[test_case("Hi" ; "capitalised hi")]
    #[test_case("  hey  " ; "padded hey")]
    #[test_case("GOOD MORNING" ; "shouted good morning")]
    #[test_case("good evening" ; "good evening")]
    #[test_case("good afternoon" ; "good afternoon")]
    fn greetings_match_exactly(message: &str) {
        assert_eq!(parse(message), Intent::Greeting);
    }

    #[test]
    fn greetings_with_extra_words_are_not_greetings() {
        assert_eq!(parse("hello there"), Intent::Unknown);
        assert_eq!(parse("hi, anyone home?"), Intent::Unknown);
    }

    #[test_case("menu" ; "bare menu")]
    #[test_case("show me the menu please" ; "menu mid sentence")]
    #[test_case("MENU!" ; "shouted menu")]
    #[test_case("i want the menu" ; "menu wins over order")]
    fn menu_matches_anywhere(message: &str) {
        assert_eq!(parse(message), Intent::Menu);
    }

    #[test_case("i want margherita", "margherita" ; "bare order")]
    #[test_case("I WANT A LOVELY MARGHERITA", "margherita" ; "order with filler")]
    #[test_case("i want one veneziana", "veneziana" ; "order with count")]
    #[test_case("i want american hot", "hot" ; "last word names the pizza")]
    fn orders_capture_the_last_word(message: &str, pizza: &str) {
        assert_eq!(
            parse(message),
            Intent::Order {
                pizza: pizza.to_string()
            }
        );
    }

    #[test]
    fn an_order_with_no_pizza_is_not_understood() {
        assert_eq!(parse("i want"), Intent::Unknown);
        assert_eq!(parse("i want   "), Intent::Unknown);
    }

    #[test]
    fn farewell_is_exact() {
        assert_eq!(parse("bye"), Intent::Farewell);
        assert_eq!(parse("  Bye "), Intent::Farewell);
        assert_eq!(parse("bye bye"), Intent::Unknown);
        assert_eq!(parse("goodbye"), Intent::Unknown);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(parse(""), Intent::Unknown);
        assert_eq!(parse("what do you recommend?"), Intent::Unknown);
        assert_eq!(parse("margherita"), Intent::Unknown);
    }

    proptest! {
        #[test]
        fn parsing_never_panics(message in ".*") {
            let _ = parse(&message);
        }

        #[test]
        fn orders_never_capture_an_empty_name(tail in "[a-z]( [a-z]{1,8}){0,4}") {
            let message = format!("i want {tail}");
            if let Intent::Order { pizza } = parse(&message) {
                prop_assert!(!pizza.is_empty());
            }
        }
    }
}
