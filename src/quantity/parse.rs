//! Quantity grammar
//!
//! `[prefix] amount [suffix]`, where the amount is the first numeral of the
//! text: a mixed number (`1 1/2`), a fraction (`3/4`) or a decimal (`2`, `2.5`,
//! `.5`). Text without a usable numeral has no amount.

use serde::{Deserialize, Serialize};

/// Numeric part of a display quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Possibly improper fraction; mixed numbers are folded in
    Fraction { numerator: u64, denominator: u64 },
    Decimal(f64),
}

impl Amount {
    pub fn value(&self) -> f64 {
        match *self {
            Amount::Fraction { numerator, denominator } => numerator as f64 / denominator as f64,
            Amount::Decimal(value) => value,
        }
    }
}

/// A display quantity split around its amount
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Quantity {
    raw: String,
    prefix: String,
    amount: Option<Amount>,
    suffix: String,
}

impl Quantity {
    pub fn parse(text: &str) -> Self {
        let bytes = text.as_bytes();

        let Some(start) = numeral_start(bytes) else {
            return Self::unparsed(text);
        };
        let int_end = digits_end(bytes, start);

        // N/D
        if int_end > start && bytes.get(int_end) == Some(&b'/') {
            let den_end = digits_end(bytes, int_end + 1);
            if den_end > int_end + 1 {
                return match (
                    text[start..int_end].parse::<u64>(),
                    text[int_end + 1..den_end].parse::<u64>(),
                ) {
                    (Ok(numerator), Ok(denominator)) if denominator > 0 => Self::with_amount(
                        text,
                        start,
                        den_end,
                        Amount::Fraction { numerator, denominator },
                    ),
                    _ => Self::unparsed(text),
                };
            }
        }

        // W N/D
        if int_end > start {
            let spaced = spaces_end(bytes, int_end);
            if spaced > int_end {
                let num_end = digits_end(bytes, spaced);
                if num_end > spaced && bytes.get(num_end) == Some(&b'/') {
                    let den_end = digits_end(bytes, num_end + 1);
                    if den_end > num_end + 1 {
                        let whole = text[start..int_end].parse::<u64>();
                        let numerator = text[spaced..num_end].parse::<u64>();
                        let denominator = text[num_end + 1..den_end].parse::<u64>();
                        if let (Ok(whole), Ok(numerator), Ok(denominator)) =
                            (whole, numerator, denominator)
                        {
                            if denominator == 0 {
                                return Self::unparsed(text);
                            }
                            let folded = whole
                                .checked_mul(denominator)
                                .and_then(|w| w.checked_add(numerator));
                            if let Some(numerator) = folded {
                                return Self::with_amount(
                                    text,
                                    start,
                                    den_end,
                                    Amount::Fraction { numerator, denominator },
                                );
                            }
                        }
                    }
                }
            }
        }

        // Decimal or integer
        let mut end = int_end;
        if bytes.get(int_end) == Some(&b'.') {
            let frac_end = digits_end(bytes, int_end + 1);
            if frac_end > int_end + 1 {
                end = frac_end;
            }
        }
        match text[start..end].parse::<f64>() {
            Ok(value) if value.is_finite() => {
                Self::with_amount(text, start, end, Amount::Decimal(value))
            }
            _ => Self::unparsed(text),
        }
    }

    fn unparsed(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            prefix: String::new(),
            amount: None,
            suffix: String::new(),
        }
    }

    fn with_amount(text: &str, start: usize, end: usize, amount: Amount) -> Self {
        Self {
            raw: text.to_string(),
            prefix: text[..start].to_string(),
            amount: Some(amount),
            suffix: text[end..].to_string(),
        }
    }

    /// The text as it appeared in the catalog
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    /// Text before the amount
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Text after the amount, usually the unit label with its leading space
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl From<String> for Quantity {
    fn from(text: String) -> Self {
        Quantity::parse(&text)
    }
}

impl From<&str> for Quantity {
    fn from(text: &str) -> Self {
        Quantity::parse(text)
    }
}

impl From<Quantity> for String {
    fn from(quantity: Quantity) -> Self {
        quantity.raw
    }
}

fn numeral_start(bytes: &[u8]) -> Option<usize> {
    (0..bytes.len()).find(|&i| {
        bytes[i].is_ascii_digit()
            || (bytes[i] == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })
}

fn digits_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn spaces_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    i
}
