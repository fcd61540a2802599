//! Human-readable rendering of node values.
//!
//! Levels 1-3 carry percentages of their parent, level 4 carries a currency
//! amount. Everything here is derived on demand from `(name, value, depth)`;
//! nothing is stored back into the tree.

use regex::Regex;

use crate::domain::{DomainError, MAX_DEPTH};

/// Default currency prefix for level-4 amounts.
pub const DEFAULT_CURRENCY: &str = "¥";

/// Formats and parses node values for display and input.
#[derive(Debug, Clone)]
pub struct Presenter {
    currency: String,
    amount_noise: Regex,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl Presenter {
    pub fn new(currency: &str) -> Self {
        // an empty alternative would match first and shadow the separators
        let pattern = if currency.is_empty() {
            r"[\s,]".to_string()
        } else {
            format!(r"{}|[\s,]", regex::escape(currency))
        };
        Self {
            currency: currency.to_string(),
            amount_noise: Regex::new(&pattern).expect("escaped currency is a valid pattern"),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Tree label: `Stocks - 60%` or `Cash fund - ¥12,000`.
    pub fn label(&self, name: &str, value: f64, depth: usize) -> String {
        if depth == MAX_DEPTH {
            format!("{} - {}{}", name, self.currency, amount(value))
        } else {
            format!("{} - {}%", name, percent(value))
        }
    }

    /// Label of a ring segment in the chart, always a percentage.
    pub fn ring_label(&self, name: &str, value: f64) -> String {
        format!("{} {}%", name, percent(value))
    }

    /// Whole-unit currency amount, e.g. for summary lines.
    pub fn money(&self, value: f64) -> String {
        format!("{}{}", self.currency, group_thousands(&format!("{:.0}", value)))
    }

    /// Text shown in an input field for a node's value.
    pub fn format_input(&self, value: f64, depth: usize) -> String {
        if depth == MAX_DEPTH {
            format!("{} {}", self.currency, group_thousands(&value.to_string()))
        } else {
            format!("{}%", value)
        }
    }

    /// Inverse of [`Presenter::format_input`]; also accepts bare numbers.
    pub fn parse_input(&self, input: &str, depth: usize) -> Result<f64, DomainError> {
        let cleaned = if depth == MAX_DEPTH {
            self.amount_noise.replace_all(input, "").into_owned()
        } else {
            input.replace('%', "").trim().to_string()
        };
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DomainError::InvalidValue {
                input: input.to_string(),
                depth,
            })
    }
}

/// Percentage with up to two decimals, integer when whole.
fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Currency amount with thousands separators, two decimals when fractional.
fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        group_thousands(&format!("{:.0}", value))
    } else {
        group_thousands(&format!("{:.2}", value))
    }
}

/// Insert `,` every three digits in the integer part of a plain number.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
