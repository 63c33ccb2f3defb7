// Copyright 2025 Cowboy AI, LLC.

//! Interned class taxonomy
//!
//! A [`Taxonomy`] is the resolved form of a catalog: every class gets a
//! [`ClassId`] in interning order, name references become ids, and the
//! is-a graph can be walked in both directions. Walks are breadth-first
//! over the parent (or child) edges, with a seen-set so a malformed
//! hierarchy cannot hang them.

use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeSet, VecDeque};

use super::catalog::{Catalog, ExpressionDef};
use super::model::{names, ClassExpression, ClassId, ClassKind, PizzaAxioms};
use crate::errors::OntologyError;

/// A single interned class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    /// Class name, unique across the taxonomy
    pub name: String,
    /// Human label, when the catalog carries one
    pub pref_label: Option<String>,
    /// How the class participates in the ontology
    pub kind: ClassKind,
    /// Direct parents
    pub parents: Vec<ClassId>,
}

/// The resolved class hierarchy
#[derive(Debug, Clone)]
pub struct Taxonomy {
    classes: IndexMap<String, ClassNode>,
    children: Vec<Vec<ClassId>>,
}

impl Taxonomy {
    /// Intern a catalog into a taxonomy.
    ///
    /// Classes are interned in catalog order (schema, countries, bases,
    /// toppings, pizzas, defined), so ids are deterministic for a given
    /// catalog. Fails on duplicate class names and on references to names
    /// the catalog never defines.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, OntologyError> {
        let mut names_in_order: IndexSet<String> = IndexSet::new();
        let declared = catalog
            .schema
            .iter()
            .map(|s| &s.name)
            .chain(catalog.countries.iter())
            .chain(catalog.bases.iter().map(|b| &b.name))
            .chain(catalog.toppings.iter().map(|t| &t.name))
            .chain(catalog.pizzas.iter().map(|p| &p.name))
            .chain(catalog.defined.iter().map(|d| &d.name));
        for name in declared {
            if !names_in_order.insert(name.clone()) {
                return Err(OntologyError::DuplicateClass(name.clone()));
            }
        }

        let resolve = |name: &str, referrer: &str| -> Result<ClassId, OntologyError> {
            names_in_order
                .get_index_of(name)
                .map(|i| ClassId(i as u32))
                .ok_or_else(|| OntologyError::UnknownClass {
                    referenced: name.to_string(),
                    referrer: referrer.to_string(),
                })
        };

        let mut classes: IndexMap<String, ClassNode> =
            IndexMap::with_capacity(names_in_order.len());

        for def in &catalog.schema {
            let parents = def
                .parents
                .iter()
                .map(|p| resolve(p, &def.name))
                .collect::<Result<Vec<_>, _>>()?;
            classes.insert(
                def.name.clone(),
                ClassNode {
                    name: def.name.clone(),
                    pref_label: None,
                    kind: ClassKind::Plain,
                    parents,
                },
            );
        }

        for country in &catalog.countries {
            classes.insert(
                country.clone(),
                ClassNode {
                    name: country.clone(),
                    pref_label: None,
                    kind: ClassKind::Country,
                    parents: vec![resolve(names::COUNTRY, country)?],
                },
            );
        }

        for base in &catalog.bases {
            classes.insert(
                base.name.clone(),
                ClassNode {
                    name: base.name.clone(),
                    pref_label: base.pref_label.clone(),
                    kind: ClassKind::Base,
                    parents: vec![resolve(names::PIZZA_BASE, &base.name)?],
                },
            );
        }

        for topping in &catalog.toppings {
            let parents = topping
                .parents
                .iter()
                .map(|p| resolve(p, &topping.name))
                .collect::<Result<Vec<_>, _>>()?;
            classes.insert(
                topping.name.clone(),
                ClassNode {
                    name: topping.name.clone(),
                    pref_label: Some(topping.pref_label.clone()),
                    kind: ClassKind::Topping {
                        spiciness: topping.spiciness,
                    },
                    parents,
                },
            );
        }

        for pizza in &catalog.pizzas {
            let toppings = pizza
                .toppings
                .iter()
                .map(|t| resolve(t, &pizza.name))
                .collect::<Result<Vec<_>, _>>()?;
            let base = pizza
                .base
                .as_deref()
                .map(|b| resolve(b, &pizza.name))
                .transpose()?;
            let country = pizza
                .country
                .as_deref()
                .map(|c| resolve(c, &pizza.name))
                .transpose()?;
            classes.insert(
                pizza.name.clone(),
                ClassNode {
                    name: pizza.name.clone(),
                    pref_label: None,
                    kind: ClassKind::Pizza(PizzaAxioms {
                        toppings,
                        closed: pizza.closed,
                        base,
                        country,
                    }),
                    parents: vec![resolve(names::NAMED_PIZZA, &pizza.name)?],
                },
            );
        }

        for defined in &catalog.defined {
            let expression = match &defined.expression {
                ExpressionDef::ToppingSome { classes } => ClassExpression::ToppingSome(
                    classes
                        .iter()
                        .map(|c| resolve(c, &defined.name))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                ExpressionDef::OnlyToppingsFrom { classes } => {
                    ClassExpression::OnlyToppingsFrom(
                        classes
                            .iter()
                            .map(|c| resolve(c, &defined.name))
                            .collect::<Result<Vec<_>, _>>()?,
                    )
                }
                ExpressionDef::SpicinessSome { spiciness } => {
                    ClassExpression::SpicinessSome(*spiciness)
                }
                ExpressionDef::MinToppings { count } => ClassExpression::MinToppings(*count),
                ExpressionDef::BaseOnly { class } => {
                    ClassExpression::BaseOnly(resolve(class, &defined.name)?)
                }
                ExpressionDef::CountryOfOrigin { country } => {
                    ClassExpression::CountryOfOrigin(resolve(country, &defined.name)?)
                }
            };
            classes.insert(
                defined.name.clone(),
                ClassNode {
                    name: defined.name.clone(),
                    pref_label: None,
                    kind: ClassKind::Defined(expression),
                    parents: vec![resolve(names::PIZZA, &defined.name)?],
                },
            );
        }

        let mut children = vec![Vec::new(); classes.len()];
        for (index, node) in classes.values().enumerate() {
            for parent in &node.parents {
                children[parent.index()].push(ClassId(index as u32));
            }
        }

        Ok(Self { classes, children })
    }

    /// Number of classes in the taxonomy
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the taxonomy holds no classes at all
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Id of the class with this exact name
    pub fn id(&self, name: &str) -> Option<ClassId> {
        self.classes.get_index_of(name).map(|i| ClassId(i as u32))
    }

    /// The class behind an id
    pub fn node(&self, id: ClassId) -> Option<&ClassNode> {
        self.classes.get_index(id.index()).map(|(_, node)| node)
    }

    /// Name of the class behind an id
    pub fn name(&self, id: ClassId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    /// Human label of the class, when the catalog carries one
    pub fn pref_label(&self, id: ClassId) -> Option<&str> {
        self.node(id).and_then(|n| n.pref_label.as_deref())
    }

    /// All classes, in interning order
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassNode)> {
        self.classes
            .values()
            .enumerate()
            .map(|(i, node)| (ClassId(i as u32), node))
    }

    /// Direct parents of a class, empty for roots and unknown ids
    pub fn parents(&self, id: ClassId) -> &[ClassId] {
        self.node(id).map(|n| n.parents.as_slice()).unwrap_or(&[])
    }

    /// Direct children of a class, empty for leaves and unknown ids
    pub fn children(&self, id: ClassId) -> &[ClassId] {
        self.children
            .get(id.index())
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Every asserted ancestor of a class, breadth-first, excluding the
    /// class itself
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        self.breadth_first(id, |c| self.parents(c))
    }

    /// Every descendant of a class, breadth-first, excluding the class
    /// itself
    pub fn descendants(&self, id: ClassId) -> Vec<ClassId> {
        self.breadth_first(id, |c| self.children(c))
    }

    /// Whether `id` is `ancestor` or sits anywhere below it
    pub fn is_a(&self, id: ClassId, ancestor: ClassId) -> bool {
        id == ancestor || self.ancestors(id).contains(&ancestor)
    }

    /// Asserted axioms of a pizza, `None` for everything else
    pub fn pizza_axioms(&self, id: ClassId) -> Option<&PizzaAxioms> {
        match self.node(id).map(|n| &n.kind) {
            Some(ClassKind::Pizza(axioms)) => Some(axioms),
            _ => None,
        }
    }

    /// Every pizza on the menu, in catalog order
    pub fn named_pizzas(&self) -> Vec<ClassId> {
        self.classes()
            .filter(|(_, node)| node.kind.is_pizza())
            .map(|(id, _)| id)
            .collect()
    }

    /// Find a pizza by name, ignoring case.
    ///
    /// Only pizzas match; asking for `NamedPizza` or a topping finds
    /// nothing, so an order for one falls through to "we don't have that".
    pub fn pizza_by_name(&self, name: &str) -> Option<ClassId> {
        self.classes()
            .find(|(_, node)| node.kind.is_pizza() && node.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    fn breadth_first<'a, F>(&'a self, start: ClassId, next: F) -> Vec<ClassId>
    where
        F: Fn(ClassId) -> &'a [ClassId],
    {
        // Seeded with the start, so a cycle never lists a class among
        // its own ancestors or descendants
        let mut seen: BTreeSet<ClassId> = BTreeSet::from([start]);
        let mut queue: VecDeque<ClassId> = next(start).iter().copied().collect();
        let mut order = Vec::new();
        while let Some(class) = queue.pop_front() {
            if seen.insert(class) {
                order.push(class);
                queue.extend(next(class).iter().copied());
            }
        }
        order
    }
}
