//! Supported currency codes.
//!
//! The feed serves a fixed set of currencies negotiated at connection time;
//! the remote protocol does not support adding channels afterwards. The set
//! is therefore declared statically, with `Currency::ALL` fixing the
//! subscription order at compile time.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported currency code.
///
/// `FromStr` doubles as the membership test for the feed boundary: codes
/// outside this set fail to parse and are ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Btc,
    Usd,
    Aud,
    Cad,
    Chf,
    Cny,
    Dkk,
    Eur,
    Gbp,
    Hkd,
    Nzd,
    Pln,
    Rub,
    Sgd,
    Thb,
    Nok,
    Czk,
    Jpy,
    Sek,
}

impl Currency {
    /// All supported currencies, in subscription order.
    pub const ALL: [Currency; 19] = [
        Self::Btc,
        Self::Usd,
        Self::Aud,
        Self::Cad,
        Self::Chf,
        Self::Cny,
        Self::Dkk,
        Self::Eur,
        Self::Gbp,
        Self::Hkd,
        Self::Nzd,
        Self::Pln,
        Self::Rub,
        Self::Sgd,
        Self::Thb,
        Self::Nok,
        Self::Czk,
        Self::Jpy,
        Self::Sek,
    ];

    /// ISO-4217-like code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Usd => "USD",
            Self::Aud => "AUD",
            Self::Cad => "CAD",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
            Self::Dkk => "DKK",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Hkd => "HKD",
            Self::Nzd => "NZD",
            Self::Pln => "PLN",
            Self::Rub => "RUB",
            Self::Sgd => "SGD",
            Self::Thb => "THB",
            Self::Nok => "NOK",
            Self::Czk => "CZK",
            Self::Jpy => "JPY",
            Self::Sek => "SEK",
        }
    }

    /// Comma-joined code list for the multiplexed subscription URL.
    pub fn subscription_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == s)
            .ok_or_else(|| CoreError::UnsupportedCurrency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_codes() {
        for currency in Currency::ALL {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(parsed, currency);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("XXX".parse::<Currency>().is_err());
        assert!("usd".parse::<Currency>().is_err()); // Case sensitive
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn test_subscription_list_order() {
        let list = Currency::subscription_list();
        assert!(list.starts_with("BTC,USD,AUD"));
        assert!(list.ends_with("JPY,SEK"));
        assert_eq!(list.split(',').count(), Currency::ALL.len());
    }
}
