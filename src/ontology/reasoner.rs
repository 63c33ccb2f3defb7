// Copyright 2025 Cowboy AI, LLC.

//! On-demand subsumption over the pizza taxonomy
//!
//! Defined classes carry a [`ClassExpression`] instead of asserted members.
//! Nothing here is cached: every question is answered from the asserted
//! axioms at the moment it is asked. The taxonomy is small enough that this
//! costs nothing, and it keeps answers current when a custom catalog is
//! loaded.
//!
//! Universal restrictions respect the open-world reading: a pizza whose
//! topping list is not closed can never be proven to stay inside a set of
//! topping classes, no matter what the list contains.

use std::collections::BTreeSet;

use super::model::{ClassExpression, ClassId, ClassKind, Spiciness};
use super::taxonomy::Taxonomy;

/// Whether a pizza satisfies a class expression.
///
/// Always false for ids that do not name a pizza.
pub fn satisfies(taxonomy: &Taxonomy, pizza: ClassId, expression: &ClassExpression) -> bool {
    let Some(axioms) = taxonomy.pizza_axioms(pizza) else {
        return false;
    };
    match expression {
        ClassExpression::ToppingSome(targets) => axioms
            .toppings
            .iter()
            .any(|&topping| under_any(taxonomy, topping, targets)),
        ClassExpression::OnlyToppingsFrom(targets) => {
            axioms.closed
                && axioms
                    .toppings
                    .iter()
                    .all(|&topping| under_any(taxonomy, topping, targets))
        }
        ClassExpression::SpicinessSome(level) => axioms
            .toppings
            .iter()
            .any(|&topping| topping_spiciness(taxonomy, topping) == Some(*level)),
        ClassExpression::MinToppings(count) => axioms.toppings.len() as u32 >= *count,
        ClassExpression::BaseOnly(target) => axioms
            .base
            .map(|base| taxonomy.is_a(base, *target))
            .unwrap_or(false),
        ClassExpression::CountryOfOrigin(country) => axioms.country == Some(*country),
    }
}

/// Whether a pizza belongs to a class, counting both asserted ancestry and
/// defined-class membership
pub fn is_inferred_member(taxonomy: &Taxonomy, pizza: ClassId, class: ClassId) -> bool {
    if taxonomy.is_a(pizza, class) {
        return true;
    }
    match taxonomy.node(class).map(|node| &node.kind) {
        Some(ClassKind::Defined(expression)) => satisfies(taxonomy, pizza, expression),
        _ => false,
    }
}

/// Every class a pizza belongs to: asserted ancestors first, then each
/// satisfied defined class and its ancestors, without duplicates
pub fn inferred_ancestors(taxonomy: &Taxonomy, pizza: ClassId) -> Vec<ClassId> {
    let mut order = taxonomy.ancestors(pizza);
    let mut seen: BTreeSet<ClassId> = order.iter().copied().collect();
    seen.insert(pizza);
    for (id, node) in taxonomy.classes() {
        if let ClassKind::Defined(expression) = &node.kind {
            if satisfies(taxonomy, pizza, expression) {
                for class in std::iter::once(id).chain(taxonomy.ancestors(id)) {
                    if seen.insert(class) {
                        order.push(class);
                    }
                }
            }
        }
    }
    order
}

/// Full classification report: every defined class paired with the menu
/// pizzas that belong to it, both in taxonomy order
pub fn classification(taxonomy: &Taxonomy) -> Vec<(String, Vec<String>)> {
    let pizzas = taxonomy.named_pizzas();
    taxonomy
        .classes()
        .filter_map(|(_, node)| {
            let ClassKind::Defined(expression) = &node.kind else {
                return None;
            };
            let members = pizzas
                .iter()
                .filter(|&&pizza| satisfies(taxonomy, pizza, expression))
                .filter_map(|&pizza| taxonomy.name(pizza).map(str::to_string))
                .collect();
            Some((node.name.clone(), members))
        })
        .collect()
}

fn under_any(taxonomy: &Taxonomy, topping: ClassId, targets: &[ClassId]) -> bool {
    targets.iter().any(|&target| taxonomy.is_a(topping, target))
}

fn topping_spiciness(taxonomy: &Taxonomy, id: ClassId) -> Option<Spiciness> {
    match taxonomy.node(id).map(|node| &node.kind) {
        Some(ClassKind::Topping { spiciness }) => Some(*spiciness),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::catalog::{Catalog, PizzaDef};
    use pretty_assertions::assert_eq;

    fn builtin() -> Taxonomy {
        Taxonomy::from_catalog(&Catalog::builtin()).unwrap()
    }

    fn defined_expression(taxonomy: &Taxonomy, name: &str) -> ClassExpression {
        let id = taxonomy.id(name).unwrap();
        match &taxonomy.node(id).unwrap().kind {
            ClassKind::Defined(expression) => expression.clone(),
            other => panic!("{name} is not a defined class: {other:?}"),
        }
    }

    #[test]
    fn universal_restrictions_need_a_closed_topping_list() {
        let mut catalog = Catalog::builtin();
        catalog
            .pizzas
            .push(PizzaDef::new("PlainOpen", &["TomatoTopping"]).unclosed());
        let taxonomy = Taxonomy::from_catalog(&catalog).unwrap();
        let vegetarian = defined_expression(&taxonomy, "VegetarianPizza");

        let margherita = taxonomy.id("Margherita").unwrap();
        let plain_open = taxonomy.id("PlainOpen").unwrap();
        assert!(satisfies(&taxonomy, margherita, &vegetarian));
        assert!(!satisfies(&taxonomy, plain_open, &vegetarian));
    }

    #[test]
    fn unclosed_pizza_still_gets_existential_answers() {
        let taxonomy = builtin();
        let unclosed = taxonomy.id("UnclosedPizza").unwrap();
        let cheesey = defined_expression(&taxonomy, "CheeseyPizza");
        let non_vegetarian = defined_expression(&taxonomy, "NonVegetarianPizza");
        let vegetarian = defined_expression(&taxonomy, "VegetarianPizza");

        assert!(satisfies(&taxonomy, unclosed, &cheesey));
        assert!(!satisfies(&taxonomy, unclosed, &non_vegetarian));
        assert!(!satisfies(&taxonomy, unclosed, &vegetarian));
    }

    #[test]
    fn spiciness_matches_the_exact_level() {
        let taxonomy = builtin();
        let american = taxonomy.id("American").unwrap();
        assert!(!satisfies(
            &taxonomy,
            american,
            &ClassExpression::SpicinessSome(Spiciness::Hot)
        ));
        assert!(satisfies(
            &taxonomy,
            american,
            &ClassExpression::SpicinessSome(Spiciness::Medium)
        ));
    }

    #[test]
    fn min_toppings_counts_the_asserted_list() {
        let taxonomy = builtin();
        let margherita = taxonomy.id("Margherita").unwrap();
        assert!(satisfies(&taxonomy, margherita, &ClassExpression::MinToppings(2)));
        assert!(!satisfies(&taxonomy, margherita, &ClassExpression::MinToppings(3)));
    }

    #[test]
    fn base_restriction_needs_a_declared_base() {
        let taxonomy = builtin();
        let thin = taxonomy.id("ThinAndCrispyBase").unwrap();
        let margherita = taxonomy.id("Margherita").unwrap();
        let american = taxonomy.id("American").unwrap();
        let unclosed = taxonomy.id("UnclosedPizza").unwrap();

        assert!(satisfies(&taxonomy, margherita, &ClassExpression::BaseOnly(thin)));
        assert!(!satisfies(&taxonomy, american, &ClassExpression::BaseOnly(thin)));
        assert!(!satisfies(&taxonomy, unclosed, &ClassExpression::BaseOnly(thin)));
    }

    #[test]
    fn non_pizzas_satisfy_nothing() {
        let taxonomy = builtin();
        let mozzarella = taxonomy.id("MozzarellaTopping").unwrap();
        assert!(!satisfies(&taxonomy, mozzarella, &ClassExpression::MinToppings(0)));
    }

    #[test]
    fn membership_covers_asserted_and_defined_classes() {
        let taxonomy = builtin();
        let margherita = taxonomy.id("Margherita").unwrap();
        let named_pizza = taxonomy.id("NamedPizza").unwrap();
        let vegetarian = taxonomy.id("VegetarianPizza").unwrap();
        let meaty = taxonomy.id("MeatyPizza").unwrap();

        assert!(is_inferred_member(&taxonomy, margherita, named_pizza));
        assert!(is_inferred_member(&taxonomy, margherita, vegetarian));
        assert!(!is_inferred_member(&taxonomy, margherita, meaty));
    }

    #[test]
    fn inferred_ancestors_add_satisfied_defined_classes() {
        let taxonomy = builtin();
        let american_hot = taxonomy.id("AmericanHot").unwrap();
        let names: Vec<_> = inferred_ancestors(&taxonomy, american_hot)
            .into_iter()
            .filter_map(|id| taxonomy.name(id).map(str::to_string))
            .collect();

        for expected in [
            "NamedPizza",
            "Pizza",
            "Food",
            "CheeseyPizza",
            "InterestingPizza",
            "MeatyPizza",
            "NonVegetarianPizza",
            "SpicyPizza",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!names.contains(&"AmericanHot".to_string()));
        assert!(!names.contains(&"VegetarianPizza".to_string()));
        assert!(!names.contains(&"ThinAndCrispyPizza".to_string()));
    }

    #[test]
    fn classification_reports_every_defined_class() {
        let taxonomy = builtin();
        let report = classification(&taxonomy);
        assert_eq!(report.len(), 8);

        let spicy = report
            .iter()
            .find(|(name, _)| name == "SpicyPizza")
            .map(|(_, members)| members.clone())
            .unwrap();
        assert_eq!(
            spicy,
            vec!["AmericanHot", "Cajun", "PolloAdAstra", "SloppyGiuseppe"]
        );
    }
}
