// Copyright 2025 Cowboy AI, LLC.

//! Rendering pizzas for a customer's terminal
//!
//! The description card is plain text with a fixed paragraph layout: flags
//! that do not apply leave their paragraph blank instead of shifting the
//! rest of the card around. The thought bubble is the balloon part of the
//! classic `cowthink` output, without the animal underneath.

use crate::ontology::PizzaFacts;

/// Wrap width used for thought bubbles
pub const THOUGHT_WIDTH: usize = 40;

const ITALIAN_LINE: &str = "🤌  This is an authentic Italian pizza 🤌";
const VEGETARIAN_LINE: &str = "🌿 It is a vegetarian pizza 🌿";
const SPICY_LINE: &str = "🌶️  I should be cautious. This is a spicy pizza 🌶️";

/// Title-case a name the way the menu prints it.
///
/// Every alphabetic run gets an initial capital and a lowercased tail, so
/// "sliced tomato" becomes "Sliced Tomato" and the camel-cased
/// "AmericanHot" flattens to "Americanhot".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

/// The description card for one pizza.
///
/// The three flag paragraphs keep their place in the layout whether or not
/// they apply, so a plain pizza gets a card with empty paragraphs rather
/// than a shorter card.
pub fn description_card(facts: &PizzaFacts) -> String {
    let ingredients = facts
        .toppings
        .iter()
        .map(|topping| format!("  - {}", title_case(topping)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "\nLook what a nice pizza that I've received!\n\n\
         It's a {} Pizza\n\n{}\n\n{}\n\n{}\n\n\
         Ingredients:\n{}",
        title_case(&facts.name),
        if facts.italian { ITALIAN_LINE } else { "" },
        if facts.vegetarian { VEGETARIAN_LINE } else { "" },
        if facts.spicy { SPICY_LINE } else { "" },
        ingredients,
    )
}

/// Wrap text into a thought bubble.
///
/// Lines longer than `width` are wrapped at word boundaries (words longer
/// than the width are split outright); short lines, including empty ones,
/// are kept as they are. Every row is padded to the widest row.
pub fn thought_bubble(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut rows: Vec<String> = Vec::new();
    for line in text.lines() {
        rows.extend(wrap_line(line.trim_end(), width));
    }

    let widest = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let mut out = String::with_capacity((widest + 4) * (rows.len() + 2));
    out.push(' ');
    out.push_str(&"_".repeat(widest + 2));
    out.push('\n');
    for row in &rows {
        let pad = widest - row.chars().count();
        out.push_str("( ");
        out.push_str(row);
        out.push_str(&" ".repeat(pad));
        out.push_str(" )\n");
    }
    out.push(' ');
    out.push_str(&"-".repeat(widest + 2));
    out
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }
    let mut rows = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        if !current.is_empty() && current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }
        if word_len <= width {
            current.push_str(word);
        } else {
            current = split_long_word(word, width, &mut rows);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn split_long_word(word: &str, width: usize, rows: &mut Vec<String>) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut chunks: Vec<String> = chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect();
    let last = chunks.pop().unwrap_or_default();
    rows.extend(chunks);
    last
}
