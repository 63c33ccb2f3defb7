// Copyright 2025 Cowboy AI, LLC.

//! Typed model of the pizza ontology
//!
//! The pizzeria's knowledge comes from an OWL-style vocabulary of pizza
//! classes. This module carries that vocabulary as typed Rust data: classes
//! are interned into a [`Taxonomy`](super::Taxonomy) and referenced by
//! [`ClassId`] everywhere else. Defined classes (VegetarianPizza, SpicyPizza,
//! ...) hold a [`ClassExpression`] and get their members from the reasoner
//! instead of asserted edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class names the rest of the crate keys on
pub mod names {
    /// Root of everything edible
    pub const FOOD: &str = "Food";
    /// Every pizza, named or not
    pub const PIZZA: &str = "Pizza";
    /// The pizzas that appear on the menu
    pub const NAMED_PIZZA: &str = "NamedPizza";
    /// Root of the topping hierarchy
    pub const PIZZA_TOPPING: &str = "PizzaTopping";
    /// Root of the base hierarchy
    pub const PIZZA_BASE: &str = "PizzaBase";
    /// Countries pizzas may originate from
    pub const COUNTRY: &str = "Country";
    /// Defined class: nothing dead on top
    pub const VEGETARIAN_PIZZA: &str = "VegetarianPizza";
    /// Defined class: at least one hot topping
    pub const SPICY_PIZZA: &str = "SpicyPizza";
    /// Defined class: originates from Italy
    pub const REAL_ITALIAN_PIZZA: &str = "RealItalianPizza";
}

/// Stable identifier a class receives when interned into the taxonomy.
///
/// Interning is deterministic: the same catalog always yields the same ids.
/// That determinism is what makes the identifier safe to put on the wire in
/// reference mode, where the receiving side resolves it against its own
/// copy of the ontology.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Position of this class in the taxonomy's interning order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spiciness value partition for toppings
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Spiciness {
    /// Safe for everyone
    #[default]
    Mild,
    /// Noticeable but not alarming
    Medium,
    /// The reason SpicyPizza exists
    Hot,
}

/// A class expression over pizzas, limited to the restriction forms the
/// pizza catalog actually uses.
///
/// Expressions are only ever evaluated against pizzas, so the `Pizza`
/// conjunct every OWL definition starts with is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassExpression {
    /// At least one topping under any of these classes (∃ hasTopping)
    ToppingSome(Vec<ClassId>),
    /// Every topping under one of these classes (∀ hasTopping).
    /// Only entailed when the pizza's topping list is closed.
    OnlyToppingsFrom(Vec<ClassId>),
    /// At least one topping at this spiciness (∃ hasTopping.(hasSpiciness ...))
    SpicinessSome(Spiciness),
    /// At least this many distinct toppings
    MinToppings(u32),
    /// The declared base is under this class (∀ hasBase)
    BaseOnly(ClassId),
    /// Originates from this country (hasCountryOfOrigin value)
    CountryOfOrigin(ClassId),
}

/// Asserted axioms of a single pizza
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PizzaAxioms {
    /// Toppings the pizza is asserted to have, in catalog order
    pub toppings: Vec<ClassId>,
    /// Whether the topping list carries a closure axiom (is exhaustive).
    /// Universal restrictions are never entailed for an unclosed pizza,
    /// no matter how innocent its listed toppings look.
    pub closed: bool,
    /// Declared base, when the catalog says anything about it
    pub base: Option<ClassId>,
    /// Declared country of origin
    pub country: Option<ClassId>,
}

/// How a class participates in the ontology
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassKind {
    /// Plain schema class (Pizza, PizzaTopping, the topping categories, ...)
    Plain,
    /// A topping, with its position on the spiciness partition
    Topping {
        /// Spiciness of the topping
        spiciness: Spiciness,
    },
    /// A pizza base
    Base,
    /// A country, used as a value by country-of-origin restrictions
    Country,
    /// A pizza on the menu, with its asserted axioms
    Pizza(PizzaAxioms),
    /// A class whose membership is inferred from an expression
    Defined(ClassExpression),
}

impl ClassKind {
    /// Whether this class is a pizza on the menu
    pub fn is_pizza(&self) -> bool {
        matches!(self, ClassKind::Pizza(_))
    }

    /// Whether this class is a defined (inferred-membership) class
    pub fn is_defined(&self) -> bool {
        matches!(self, ClassKind::Defined(_))
    }
}
