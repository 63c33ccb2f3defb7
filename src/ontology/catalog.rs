// Copyright 2025 Cowboy AI, LLC.

//! Pizza catalog definitions
//!
//! A [`Catalog`] is the declarative source a taxonomy is built from: schema
//! classes, countries, bases, toppings, pizzas and defined classes, all
//! referring to each other by name. The built-in catalog mirrors the classic
//! pizza ontology; a catalog with the same shape can also be loaded from a
//! JSON file to run the pizzeria with a different menu.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::model::{names, Spiciness};
use crate::errors::OntologyError;

fn default_closed() -> bool {
    true
}

/// A plain schema class and its parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    /// Class name
    pub name: String,
    /// Parent class names, empty for roots
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

impl SchemaDef {
    /// A root class with no parents
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
        }
    }

    /// A class with a single parent
    pub fn child(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: vec![parent.into()],
        }
    }
}

/// A pizza base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDef {
    /// Class name
    pub name: String,
    /// Human label used in descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,
}

impl BaseDef {
    /// A base with a human label
    pub fn new(name: impl Into<String>, pref_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pref_label: Some(pref_label.into()),
        }
    }
}

/// A topping, its place in the topping hierarchy and its spiciness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingDef {
    /// Class name
    pub name: String,
    /// Human label used in descriptions
    pub pref_label: String,
    /// Parent class names; toppings may sit under more than one category
    pub parents: Vec<String>,
    /// Position on the spiciness partition
    #[serde(default)]
    pub spiciness: Spiciness,
}

impl ToppingDef {
    /// A mild topping under the given parents
    pub fn new(name: impl Into<String>, pref_label: impl Into<String>, parents: &[&str]) -> Self {
        Self {
            name: name.into(),
            pref_label: pref_label.into(),
            parents: parents.iter().map(|p| (*p).to_string()).collect(),
            spiciness: Spiciness::Mild,
        }
    }

    /// Set the topping's spiciness
    pub fn with_spiciness(mut self, spiciness: Spiciness) -> Self {
        self.spiciness = spiciness;
        self
    }
}

/// A pizza on the menu and its asserted axioms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaDef {
    /// Class name, which is also the menu entry
    pub name: String,
    /// Topping class names
    #[serde(default)]
    pub toppings: Vec<String>,
    /// Whether the topping list is exhaustive
    #[serde(default = "default_closed")]
    pub closed: bool,
    /// Base class name, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Country of origin, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl PizzaDef {
    /// A closed pizza with the given toppings
    pub fn new(name: impl Into<String>, toppings: &[&str]) -> Self {
        Self {
            name: name.into(),
            toppings: toppings.iter().map(|t| (*t).to_string()).collect(),
            closed: true,
            base: None,
            country: None,
        }
    }

    /// Declare the pizza's base
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Declare the pizza's country of origin
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Drop the closure axiom: the topping list stops being exhaustive
    pub fn unclosed(mut self) -> Self {
        self.closed = false;
        self
    }
}

/// A restriction, written with class names instead of interned ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "restriction", rename_all = "snake_case")]
pub enum ExpressionDef {
    /// At least one topping under any of the named classes
    ToppingSome {
        /// Topping classes that count as a witness
        classes: Vec<String>,
    },
    /// Every topping under one of the named classes; needs a closed pizza
    OnlyToppingsFrom {
        /// Topping classes the pizza must stay inside
        classes: Vec<String>,
    },
    /// At least one topping at the given spiciness
    SpicinessSome {
        /// Required spiciness
        spiciness: Spiciness,
    },
    /// At least this many distinct toppings
    MinToppings {
        /// Minimum topping count
        count: u32,
    },
    /// The declared base sits under the named class
    BaseOnly {
        /// Required base class
        class: String,
    },
    /// Originates from the named country
    CountryOfOrigin {
        /// Required country
        country: String,
    },
}

/// A defined class and the expression that decides membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinedDef {
    /// Class name
    pub name: String,
    /// Membership expression
    pub expression: ExpressionDef,
}

impl DefinedDef {
    /// A defined class over the given expression
    pub fn new(name: impl Into<String>, expression: ExpressionDef) -> Self {
        Self {
            name: name.into(),
            expression,
        }
    }
}

/// The declarative source a taxonomy is built from.
///
/// Interning happens in struct field order (schema, countries, bases,
/// toppings, pizzas, defined), and within each field in definition order,
/// so the same catalog always produces the same class ids. Pizza definition
/// order is menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Plain schema classes, parents before children
    #[serde(default)]
    pub schema: Vec<SchemaDef>,
    /// Countries pizzas may originate from
    #[serde(default)]
    pub countries: Vec<String>,
    /// Pizza bases
    #[serde(default)]
    pub bases: Vec<BaseDef>,
    /// Toppings
    #[serde(default)]
    pub toppings: Vec<ToppingDef>,
    /// Pizzas, in menu order
    #[serde(default)]
    pub pizzas: Vec<PizzaDef>,
    /// Defined classes
    #[serde(default)]
    pub defined: Vec<DefinedDef>,
}

impl Catalog {
    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, OntologyError> {
        serde_json::from_str(json).map_err(|e| OntologyError::CatalogParse(e.to_string()))
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| OntologyError::CatalogRead(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// The classic pizza ontology the pizzeria serves by default
    pub fn builtin() -> Self {
        const CHEESE: &str = "CheeseTopping";
        const FISH: &str = "FishTopping";
        const FRUIT: &str = "FruitTopping";
        const HERB_SPICE: &str = "HerbSpiceTopping";
        const MEAT: &str = "MeatTopping";
        const NUT: &str = "NutTopping";
        const SAUCE: &str = "SauceTopping";
        const VEGETABLE: &str = "VegetableTopping";
        const DEEP_PAN: &str = "DeepPanBase";
        const THIN: &str = "ThinAndCrispyBase";
        const ITALY: &str = "Italy";

        Catalog {
            schema: vec![
                SchemaDef::root(names::FOOD),
                SchemaDef::child(names::PIZZA, names::FOOD),
                SchemaDef::child(names::PIZZA_BASE, names::FOOD),
                SchemaDef::child(names::PIZZA_TOPPING, names::FOOD),
                SchemaDef::child(names::NAMED_PIZZA, names::PIZZA),
                SchemaDef::root(names::COUNTRY),
                SchemaDef::child(CHEESE, names::PIZZA_TOPPING),
                SchemaDef::child(FISH, names::PIZZA_TOPPING),
                SchemaDef::child(FRUIT, names::PIZZA_TOPPING),
                SchemaDef::child(HERB_SPICE, names::PIZZA_TOPPING),
                SchemaDef::child(MEAT, names::PIZZA_TOPPING),
                SchemaDef::child(NUT, names::PIZZA_TOPPING),
                SchemaDef::child(SAUCE, names::PIZZA_TOPPING),
                SchemaDef::child(VEGETABLE, names::PIZZA_TOPPING),
            ],
            countries: ["America", "England", "France", "Germany", ITALY]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            bases: vec![
                BaseDef::new(DEEP_PAN, "deep pan"),
                BaseDef::new(THIN, "thin and crispy"),
            ],
            toppings: vec![
                ToppingDef::new("FourCheesesTopping", "four cheeses", &[CHEESE]),
                ToppingDef::new("GoatsCheeseTopping", "goats cheese", &[CHEESE]),
                ToppingDef::new("GorgonzolaTopping", "gorgonzola", &[CHEESE]),
                ToppingDef::new("MozzarellaTopping", "mozzarella", &[CHEESE]),
                ToppingDef::new("ParmesanTopping", "parmesan", &[CHEESE]),
                ToppingDef::new(
                    "CheeseyVegetableTopping",
                    "cheesey vegetable",
                    &[CHEESE, VEGETABLE],
                ),
                ToppingDef::new("AnchoviesTopping", "anchovies", &[FISH]),
                ToppingDef::new("MixedSeafoodTopping", "mixed seafood", &[FISH]),
                ToppingDef::new("PrawnsTopping", "prawns", &[FISH]),
                ToppingDef::new("SultanaTopping", "sultana", &[FRUIT]),
                ToppingDef::new("CajunSpiceTopping", "cajun spice", &[HERB_SPICE])
                    .with_spiciness(Spiciness::Hot),
                ToppingDef::new("RosemaryTopping", "rosemary", &[HERB_SPICE]),
                ToppingDef::new("ChickenTopping", "chicken", &[MEAT]),
                ToppingDef::new("HamTopping", "ham", &[MEAT]),
                ToppingDef::new("ParmaHamTopping", "parma ham", &["HamTopping"]),
                ToppingDef::new("HotSpicedBeefTopping", "hot spiced beef", &[MEAT])
                    .with_spiciness(Spiciness::Hot),
                ToppingDef::new("PeperoniSausageTopping", "peperoni sausage", &[MEAT])
                    .with_spiciness(Spiciness::Medium),
                ToppingDef::new("PineKernelTopping", "pine kernel", &[NUT]),
                // The classic ontology really does spell it this way, and
                // really does leave the Topping suffix off.
                ToppingDef::new("TobascoPepperSauce", "tobasco pepper sauce", &[SAUCE])
                    .with_spiciness(Spiciness::Hot),
                ToppingDef::new("ArtichokeTopping", "artichoke", &[VEGETABLE]),
                ToppingDef::new("AsparagusTopping", "asparagus", &[VEGETABLE]),
                ToppingDef::new("CaperTopping", "caper", &[VEGETABLE]),
                ToppingDef::new("GarlicTopping", "garlic", &[VEGETABLE]),
                ToppingDef::new("LeekTopping", "leek", &[VEGETABLE]),
                ToppingDef::new("MushroomTopping", "mushroom", &[VEGETABLE]),
                ToppingDef::new("OliveTopping", "olive", &[VEGETABLE]),
                ToppingDef::new("OnionTopping", "onion", &[VEGETABLE]),
                ToppingDef::new("RedOnionTopping", "red onion", &["OnionTopping"]),
                ToppingDef::new("PepperTopping", "pepper", &[VEGETABLE]),
                ToppingDef::new("GreenPepperTopping", "green pepper", &["PepperTopping"]),
                ToppingDef::new(
                    "HotGreenPepperTopping",
                    "hot green pepper",
                    &["GreenPepperTopping"],
                )
                .with_spiciness(Spiciness::Hot),
                ToppingDef::new("JalapenoPepperTopping", "jalapeno pepper", &["PepperTopping"])
                    .with_spiciness(Spiciness::Hot),
                ToppingDef::new("PeperonataTopping", "peperonata", &["PepperTopping"]),
                ToppingDef::new("SweetPepperTopping", "sweet pepper", &["PepperTopping"]),
                ToppingDef::new("PetitPoisTopping", "petit pois", &[VEGETABLE]),
                ToppingDef::new("RocketTopping", "rocket", &[VEGETABLE]),
                ToppingDef::new("SpinachTopping", "spinach", &[VEGETABLE]),
                ToppingDef::new("TomatoTopping", "tomato", &[VEGETABLE]),
                ToppingDef::new("SlicedTomatoTopping", "sliced tomato", &["TomatoTopping"]),
                ToppingDef::new(
                    "SundriedTomatoTopping",
                    "sundried tomato",
                    &["TomatoTopping"],
                ),
            ],
            pizzas: vec![
                PizzaDef::new(
                    "American",
                    &["MozzarellaTopping", "PeperoniSausageTopping", "TomatoTopping"],
                )
                .with_base(DEEP_PAN)
                .with_country("America"),
                PizzaDef::new(
                    "AmericanHot",
                    &[
                        "HotGreenPepperTopping",
                        "JalapenoPepperTopping",
                        "MozzarellaTopping",
                        "PeperoniSausageTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(DEEP_PAN)
                .with_country("America"),
                PizzaDef::new(
                    "Cajun",
                    &[
                        "MozzarellaTopping",
                        "OnionTopping",
                        "PeperonataTopping",
                        "PrawnsTopping",
                        "TobascoPepperSauce",
                        "TomatoTopping",
                    ],
                )
                .with_base(DEEP_PAN)
                .with_country("America"),
                PizzaDef::new(
                    "Capricciosa",
                    &[
                        "AnchoviesTopping",
                        "CaperTopping",
                        "HamTopping",
                        "MozzarellaTopping",
                        "MushroomTopping",
                        "OliveTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "Caprina",
                    &[
                        "GoatsCheeseTopping",
                        "MozzarellaTopping",
                        "SundriedTomatoTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "Fiorentina",
                    &[
                        "GarlicTopping",
                        "MozzarellaTopping",
                        "OliveTopping",
                        "ParmesanTopping",
                        "SpinachTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "FourSeasons",
                    &[
                        "AnchoviesTopping",
                        "CaperTopping",
                        "HamTopping",
                        "MozzarellaTopping",
                        "MushroomTopping",
                        "OliveTopping",
                        "PeperoniSausageTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "FruttiDiMare",
                    &["GarlicTopping", "MixedSeafoodTopping", "TomatoTopping"],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "Giardiniera",
                    &[
                        "LeekTopping",
                        "MozzarellaTopping",
                        "MushroomTopping",
                        "OliveTopping",
                        "PeperonataTopping",
                        "PetitPoisTopping",
                        "SlicedTomatoTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "LaReine",
                    &[
                        "HamTopping",
                        "MozzarellaTopping",
                        "MushroomTopping",
                        "OliveTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country("France"),
                PizzaDef::new("Margherita", &["MozzarellaTopping", "TomatoTopping"])
                    .with_base(THIN)
                    .with_country(ITALY),
                PizzaDef::new(
                    "Mushroom",
                    &["MozzarellaTopping", "MushroomTopping", "TomatoTopping"],
                )
                .with_base(DEEP_PAN)
                .with_country("England"),
                PizzaDef::new(
                    "Napoletana",
                    &[
                        "AnchoviesTopping",
                        "CaperTopping",
                        "MozzarellaTopping",
                        "OliveTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "Parmense",
                    &[
                        "AsparagusTopping",
                        "HamTopping",
                        "MozzarellaTopping",
                        "ParmesanTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "PolloAdAstra",
                    &[
                        "CajunSpiceTopping",
                        "ChickenTopping",
                        "MozzarellaTopping",
                        "RedOnionTopping",
                        "SweetPepperTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(DEEP_PAN)
                .with_country("England"),
                PizzaDef::new(
                    "PrinceCarlo",
                    &[
                        "LeekTopping",
                        "MozzarellaTopping",
                        "ParmesanTopping",
                        "RosemaryTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new("QuattroFormaggi", &["FourCheesesTopping", "TomatoTopping"])
                    .with_base(THIN)
                    .with_country(ITALY),
                PizzaDef::new(
                    "Rosa",
                    &["GorgonzolaTopping", "MozzarellaTopping", "TomatoTopping"],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "Siciliana",
                    &[
                        "AnchoviesTopping",
                        "ArtichokeTopping",
                        "GarlicTopping",
                        "HamTopping",
                        "MozzarellaTopping",
                        "OliveTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
                PizzaDef::new(
                    "SloppyGiuseppe",
                    &[
                        "GreenPepperTopping",
                        "HotSpicedBeefTopping",
                        "MozzarellaTopping",
                        "OnionTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(DEEP_PAN)
                .with_country("England"),
                PizzaDef::new(
                    "Soho",
                    &[
                        "GarlicTopping",
                        "MozzarellaTopping",
                        "OliveTopping",
                        "ParmesanTopping",
                        "RocketTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country("England"),
                PizzaDef::new("UnclosedPizza", &["MozzarellaTopping"]).unclosed(),
                PizzaDef::new(
                    "Veneziana",
                    &[
                        "CaperTopping",
                        "MozzarellaTopping",
                        "OliveTopping",
                        "OnionTopping",
                        "PineKernelTopping",
                        "SultanaTopping",
                        "TomatoTopping",
                    ],
                )
                .with_base(THIN)
                .with_country(ITALY),
            ],
            defined: vec![
                DefinedDef::new(
                    "CheeseyPizza",
                    ExpressionDef::ToppingSome {
                        classes: vec![CHEESE.to_string()],
                    },
                ),
                DefinedDef::new(
                    "InterestingPizza",
                    ExpressionDef::MinToppings { count: 3 },
                ),
                DefinedDef::new(
                    "MeatyPizza",
                    ExpressionDef::ToppingSome {
                        classes: vec![MEAT.to_string()],
                    },
                ),
                DefinedDef::new(
                    "NonVegetarianPizza",
                    ExpressionDef::ToppingSome {
                        classes: vec![FISH.to_string(), MEAT.to_string()],
                    },
                ),
                DefinedDef::new(
                    names::REAL_ITALIAN_PIZZA,
                    ExpressionDef::CountryOfOrigin {
                        country: ITALY.to_string(),
                    },
                ),
                DefinedDef::new(
                    names::SPICY_PIZZA,
                    ExpressionDef::SpicinessSome {
                        spiciness: Spiciness::Hot,
                    },
                ),
                DefinedDef::new(
                    "ThinAndCrispyPizza",
                    ExpressionDef::BaseOnly {
                        class: THIN.to_string(),
                    },
                ),
                DefinedDef::new(
                    names::VEGETARIAN_PIZZA,
                    ExpressionDef::OnlyToppingsFrom {
                        classes: vec![
                            CHEESE.to_string(),
                            FRUIT.to_string(),
                            HERB_SPICE.to_string(),
                            NUT.to_string(),
                            SAUCE.to_string(),
                            VEGETABLE.to_string(),
                        ],
                    },
                ),
            ],
        }
    }
}
