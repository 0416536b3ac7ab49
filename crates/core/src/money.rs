//! Monetary amounts.
//!
//! Amounts are integers in the currency's smallest unit, so arithmetic is exact.
//! Rendering (`$15`, `€9.50`) is a presentation concern and lives outside this crate.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO-4217 currency code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Minor units per major unit (all supported currencies use cents).
    pub fn minor_per_major(self) -> u64 {
        100
    }

    /// Resolve a display symbol back to its currency.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        [Currency::Usd, Currency::Eur, Currency::Gbp]
            .into_iter()
            .find(|c| c.symbol() == symbol)
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(DomainError::validation(format!(
                "unsupported currency code: {other}"
            ))),
        }
    }
}

/// An amount of money in a single currency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor_units: u64,
    currency: Currency,
}

impl ValueObject for Money {}

impl Money {
    pub fn new(minor_units: u64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Whole major units (`from_major(15, Usd)` is fifteen dollars).
    pub fn from_major(major: u64, currency: Currency) -> Self {
        Self::new(major.saturating_mul(currency.minor_per_major()), currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn minor_units(&self) -> u64 {
        self.minor_units
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn major_part(&self) -> u64 {
        self.minor_units / self.currency.minor_per_major()
    }

    pub fn minor_part(&self) -> u64 {
        self.minor_units % self.currency.minor_per_major()
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Unit price times a count. Saturates at `u64::MAX` minor units.
    pub fn times(&self, count: u32) -> Self {
        Self::new(self.minor_units.saturating_mul(u64::from(count)), self.currency)
    }

    /// Add two amounts of the same currency.
    pub fn checked_add(&self, other: &Money) -> DomainResult<Self> {
        if self.currency != other.currency {
            return Err(DomainError::validation(format!(
                "currency mismatch: {} vs {}",
                self.currency, other.currency
            )));
        }
        let minor_units = self
            .minor_units
            .checked_add(other.minor_units)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))?;
        Ok(Self::new(minor_units, self.currency))
    }
}
