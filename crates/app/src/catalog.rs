//! Product catalog, loaded from JSON.
//!
//! Catalog files carry display prices (`"$15"`, `"$9.50"`). They are parsed into
//! `Money` here, at load time, so nothing downstream ever handles price text.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use shopcart_cart::{ItemName, LineItem, Quantity};
use shopcart_core::{Currency, Money};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub name: ItemName,
    pub image: String,
    pub description: String,
    pub cost: Money,
}

impl Product {
    /// A line item for one unit of this product (the default add amount).
    pub fn to_line_item(&self) -> LineItem {
        LineItem::new(self.name.clone(), self.image.clone(), self.cost, Quantity::ONE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    category: String,
    plants: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    name: ItemName,
    image: String,
    #[serde(default)]
    description: String,
    cost: String,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(EMBEDDED_CATALOG).context("embedded catalog is invalid")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog at {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid catalog at {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let raw: RawCatalog = serde_json::from_str(json).context("malformed catalog JSON")?;

        let mut categories = Vec::with_capacity(raw.categories.len());
        let mut seen: Vec<ItemName> = Vec::new();
        for category in raw.categories {
            let mut products = Vec::with_capacity(category.plants.len());
            for plant in category.plants {
                if seen
                    .iter()
                    .any(|s| s.as_str().eq_ignore_ascii_case(plant.name.as_str()))
                {
                    bail!("duplicate product name: {}", plant.name);
                }
                let cost = parse_price_label(&plant.cost)
                    .with_context(|| format!("bad cost for {}", plant.name))?;
                seen.push(plant.name.clone());
                products.push(Product {
                    name: plant.name,
                    image: plant.image,
                    description: plant.description,
                    cost,
                });
            }
            categories.push(Category {
                name: category.category,
                products,
            });
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories.iter().flat_map(|c| c.products.iter())
    }

    /// Case-insensitive lookup by product name.
    pub fn find(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products()
            .find(|p| p.name.as_str().eq_ignore_ascii_case(name))
    }
}

/// Parse a display price such as `$15` or `€9.50` into `Money`.
pub fn parse_price_label(label: &str) -> anyhow::Result<Money> {
    let label = label.trim();
    let mut chars = label.chars();
    let Some(symbol) = chars.next() else {
        bail!("empty price label");
    };
    let currency = Currency::from_symbol(symbol.encode_utf8(&mut [0; 4]))
        .with_context(|| format!("unknown currency symbol in {label:?}"))?;

    let amount = chars.as_str();
    let (major, minor) = amount.split_once('.').unwrap_or((amount, ""));
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if major.is_empty() || !is_digits(major) || !is_digits(minor) || minor.len() > 2 {
        bail!("malformed amount in price label {label:?}");
    }

    let major: u64 = major
        .parse()
        .with_context(|| format!("amount out of range in {label:?}"))?;
    let minor: u64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<u64>()? * 10,
        _ => minor.parse::<u64>()?,
    };
    let minor_units = major
        .checked_mul(currency.minor_per_major())
        .and_then(|m| m.checked_add(minor))
        .with_context(|| format!("amount out of range in {label:?}"))?;

    Ok(Money::new(minor_units, currency))
}
