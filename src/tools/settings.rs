//! Settings MCP Tools
//!
//! Currency symbol (persisted) and portion multiplier (session only).

use serde::Serialize;

use crate::db::Database;
use crate::models::{PortionMultiplier, Settings};

/// Response for currency tools
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub currency: String,
}

/// Response for portion tools
#[derive(Debug, Serialize)]
pub struct PortionsResponse {
    pub portions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u32>,
}

pub fn get_currency(db: &Database) -> Result<CurrencyResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let currency = Settings::currency(&conn).map_err(|e| format!("Failed to read currency: {}", e))?;
    Ok(CurrencyResponse { currency })
}

/// Persist a new currency symbol
pub fn set_currency(db: &Database, symbol: &str) -> Result<CurrencyResponse, String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err("Currency symbol cannot be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Settings::set_currency(&conn, symbol).map_err(|e| format!("Failed to save currency: {}", e))?;
    tracing::info!(currency = %symbol, "Currency saved");

    Ok(CurrencyResponse {
        currency: symbol.to_string(),
    })
}

pub fn get_portions(current: PortionMultiplier) -> PortionsResponse {
    PortionsResponse {
        portions: current.get(),
        previous: None,
    }
}

/// Replace the session multiplier; rejects anything below 1
pub fn set_portions(current: &mut PortionMultiplier, value: i64) -> Result<PortionsResponse, String> {
    let next = PortionMultiplier::new(value).map_err(|e| e.to_string())?;
    let previous = std::mem::replace(current, next);
    tracing::info!(portions = next.get(), "Portion multiplier changed");

    Ok(PortionsResponse {
        portions: next.get(),
        previous: Some(previous.get()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CURRENCY;

    #[test]
    fn test_currency_round_trip() {
        let db = Database::in_memory().unwrap();
        assert_eq!(get_currency(&db).unwrap().currency, DEFAULT_CURRENCY);
        assert!(set_currency(&db, "  ").is_err());
        assert_eq!(set_currency(&db, " $ ").unwrap().currency, "$");
        assert_eq!(get_currency(&db).unwrap().currency, "$");
    }

    #[test]
    fn test_set_portions() {
        let mut portions = PortionMultiplier::ONE;
        let response = set_portions(&mut portions, 3).unwrap();
        assert_eq!(response.portions, 3);
        assert_eq!(response.previous, Some(1));
        assert_eq!(portions.get(), 3);

        assert!(set_portions(&mut portions, 0).is_err());
        assert_eq!(get_portions(portions).portions, 3);
    }
}
