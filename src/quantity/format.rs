//! Scaled rendering of display quantities

use crate::models::PortionMultiplier;
use super::{Amount, Quantity};

pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Round to 2 decimals; whole numbers render without a decimal point
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}

fn format_fraction(numerator: u64, denominator: u64) -> String {
    let whole = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder == 0 {
        return whole.to_string();
    }

    let divisor = gcd(remainder, denominator);
    let (num, den) = (remainder / divisor, denominator / divisor);
    if whole == 0 {
        format!("{}/{}", num, den)
    } else {
        format!("{} {}/{}", whole, num, den)
    }
}

impl Quantity {
    /// Render the quantity multiplied by `portions`, keeping the surrounding text
    pub fn scaled(&self, portions: PortionMultiplier) -> String {
        let factor = portions.get();
        let amount = match self.amount() {
            Some(Amount::Fraction { numerator, denominator }) => {
                match numerator.checked_mul(u64::from(factor)) {
                    Some(scaled) => format_fraction(scaled, denominator),
                    None => return self.as_str().to_string(),
                }
            }
            Some(Amount::Decimal(value)) => format_number(value * portions.as_f64()),
            None => return self.as_str().to_string(),
        };
        format!("{}{}{}", self.prefix(), amount, self.suffix())
    }
}

/// Parse and scale in one step
pub fn format_scaled(text: &str, portions: PortionMultiplier) -> String {
    Quantity::parse(text).scaled(portions)
}
