// Copyright 2025 Cowboy AI, LLC.

//! Pizza knowledge base
//!
//! Everything the pizzeria knows comes from here. A [`Catalog`] (built in
//! or loaded from JSON) is interned into a [`Taxonomy`] and queried through
//! the [`Ontology`] facade. Membership in the defined classes is evaluated
//! on demand by the reasoner, so the facts about a pizza are derived fresh
//! from its axioms every time they are asked for.

mod catalog;
mod model;
mod reasoner;
mod taxonomy;

pub use catalog::{BaseDef, Catalog, DefinedDef, ExpressionDef, PizzaDef, SchemaDef, ToppingDef};
pub use model::{names, ClassExpression, ClassId, ClassKind, PizzaAxioms, Spiciness};
pub use taxonomy::{ClassNode, Taxonomy};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::OntologyError;

/// Everything the pizzeria tells a customer about one pizza
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaFacts {
    /// Class name, which is also the menu entry
    pub name: String,
    /// Human labels of the asserted toppings, in catalog order
    pub toppings: Vec<String>,
    /// Member of `VegetarianPizza`
    pub vegetarian: bool,
    /// Member of `SpicyPizza`
    pub spicy: bool,
    /// Member of `RealItalianPizza`
    pub italian: bool,
}

/// The pizzeria's knowledge base
#[derive(Debug, Clone)]
pub struct Ontology {
    taxonomy: Taxonomy,
}

impl Ontology {
    /// Build the classic pizza ontology
    pub fn builtin() -> Result<Self, OntologyError> {
        Self::from_catalog(&Catalog::builtin())
    }

    /// Build an ontology from an already-parsed catalog
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, OntologyError> {
        Ok(Self {
            taxonomy: Taxonomy::from_catalog(catalog)?,
        })
    }

    /// Build an ontology from catalog JSON
    pub fn from_json_str(json: &str) -> Result<Self, OntologyError> {
        Self::from_catalog(&Catalog::from_json_str(json)?)
    }

    /// Build an ontology from a catalog JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OntologyError> {
        Self::from_catalog(&Catalog::from_file(path)?)
    }

    /// The underlying taxonomy
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Id of the class with this exact name, erroring when absent
    pub fn class_id(&self, name: &str) -> Result<ClassId, OntologyError> {
        self.taxonomy
            .id(name)
            .ok_or_else(|| OntologyError::NoSuchClass(name.to_string()))
    }

    /// Name of the class behind an id
    pub fn class_name(&self, id: ClassId) -> Option<&str> {
        self.taxonomy.name(id)
    }

    /// Every pizza on the menu, in catalog order
    pub fn named_pizzas(&self) -> Vec<ClassId> {
        self.taxonomy.named_pizzas()
    }

    /// Menu entries in catalog order
    pub fn menu(&self) -> Vec<&str> {
        self.taxonomy
            .named_pizzas()
            .into_iter()
            .filter_map(|id| self.taxonomy.name(id))
            .collect()
    }

    /// Find a pizza by name, ignoring case
    pub fn pizza_by_name(&self, name: &str) -> Option<ClassId> {
        self.taxonomy.pizza_by_name(name)
    }

    /// Resolve a wire identifier back to a pizza.
    ///
    /// The id space is shared with every class in the taxonomy, so an id
    /// that names a topping or a country is rejected rather than described.
    pub fn pizza_by_id(&self, id: ClassId) -> Result<ClassId, OntologyError> {
        if self.taxonomy.pizza_axioms(id).is_some() {
            Ok(id)
        } else {
            Err(OntologyError::NotAPizza(id.0))
        }
    }

    /// Whether a pizza belongs to the named class, asserted or inferred.
    ///
    /// Errors when this catalog never defines the class, rather than
    /// answering a question about a class that does not exist.
    pub fn is_member(&self, pizza: ClassId, class_name: &str) -> Result<bool, OntologyError> {
        let class = self.class_id(class_name)?;
        Ok(reasoner::is_inferred_member(&self.taxonomy, pizza, class))
    }

    /// Every class a pizza belongs to, asserted and inferred
    pub fn inferred_ancestors(&self, pizza: ClassId) -> Vec<ClassId> {
        reasoner::inferred_ancestors(&self.taxonomy, pizza)
    }

    /// The facts a customer gets told about a pizza
    pub fn facts(&self, pizza: ClassId) -> Result<PizzaFacts, OntologyError> {
        let axioms = self
            .taxonomy
            .pizza_axioms(pizza)
            .ok_or(OntologyError::NotAPizza(pizza.0))?;
        let toppings = axioms
            .toppings
            .iter()
            .map(|&topping| {
                self.taxonomy
                    .pref_label(topping)
                    .or_else(|| self.taxonomy.name(topping))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        Ok(PizzaFacts {
            name: self.taxonomy.name(pizza).unwrap_or_default().to_string(),
            toppings,
            vegetarian: self.is_member(pizza, names::VEGETARIAN_PIZZA)?,
            spicy: self.is_member(pizza, names::SPICY_PIZZA)?,
            italian: self.is_member(pizza, names::REAL_ITALIAN_PIZZA)?,
        })
    }

    /// Full classification report: every defined class with its member
    /// pizzas
    pub fn classification(&self) -> Vec<(String, Vec<String>)> {
        reasoner::classification(&self.taxonomy)
    }
}
