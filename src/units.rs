//! Units database: canonical unit names, their aliases and dimensional tags.
//!
//! The table format has three line classes:
//!
//! ```text
//! // a comment
//! -- length (m)
//! meter, m; m
//! kilometer, km; m; 1000.0
//! ```
//!
//! A header (`-- <quantity> (<dimension>)`) opens a quantity block; every data row that follows
//! is `canonical[, alias...][; dimension][; ratio]`. A dimension of `null` means the quantity is
//! dimensionless. Every alias and the canonical name itself resolve to the same [`UnitRecord`].
//! Lookups are exact: no case folding or normalization is applied.
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    fs::read_to_string,
    path::Path,
    sync::Arc,
};

use crate::error::{HaystackError, Result};

/// The units table shipped with the crate.
pub const BUILTIN_UNITS: &str = include_str!("../assets/units.txt");

/// Process-wide units database, built from [`BUILTIN_UNITS`] on first use.
pub static UNITS: Lazy<Arc<UnitDb>> = Lazy::new(|| {
    Arc::new(UnitDb::parse(BUILTIN_UNITS).expect("The embedded units table is well-formed"))
});

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-- (.+) \((.+)\)").expect("Static regex is valid"));

/// A single row of the units table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRecord {
    pub canonical: String,
    /// Alternate spellings, in table order. When a row lists no alias this holds the canonical
    /// name alone.
    pub aliases: Vec<String>,
    /// Quantity name from the enclosing header, e.g. `length`.
    pub quantity: Option<String>,
    /// Dimension tag from the enclosing header, e.g. `m` or `kg1*m-3`.
    pub dimension: Option<String>,
    /// Scale factor against the dimension's base unit.
    pub ratio: Option<f64>,
}

impl UnitRecord {
    /// Symbol used when printing a value in this unit: the last alias, or the canonical name.
    pub fn print(&self) -> &str {
        self.aliases
            .last()
            .map(String::as_str)
            .unwrap_or(self.canonical.as_str())
    }
}

/// A resolved unit: the record it maps to plus the spelling that was used to find it.
#[derive(Debug, Clone)]
pub struct Unit {
    symbol: String,
    record: Arc<UnitRecord>,
}

impl Unit {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn canonical(&self) -> &str {
        &self.record.canonical
    }

    pub fn print(&self) -> &str {
        self.record.print()
    }

    pub fn aliases(&self) -> &[String] {
        &self.record.aliases
    }

    pub fn dimension(&self) -> Option<&str> {
        self.record.dimension.as_deref()
    }

    pub fn quantity(&self) -> Option<&str> {
        self.record.quantity.as_deref()
    }

    pub fn ratio(&self) -> Option<f64> {
        self.record.ratio
    }

    pub fn record(&self) -> &UnitRecord {
        &self.record
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.record.canonical == other.record.canonical
    }
}

impl PartialEq<str> for Unit {
    fn eq(&self, other: &str) -> bool {
        self.symbol == other
            || self.record.canonical == other
            || self.record.aliases.iter().any(|alias| alias == other)
    }
}

impl PartialEq<&str> for Unit {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dimension : {} ; Original Symbol : {} ; Canonical: {}",
            self.dimension().unwrap_or("None"),
            self.symbol,
            self.canonical()
        )
    }
}

/// Read-only units lookup table.
#[derive(Debug, Default)]
pub struct UnitDb {
    records: HashMap<String, Arc<UnitRecord>>,
    symbols: HashMap<String, String>,
}

impl UnitDb {
    /// Build a table from text in the units file format.
    pub fn parse(text: &str) -> Result<UnitDb> {
        let mut db = UnitDb::default();
        let mut quantity: Option<String> = None;
        let mut dimension: Option<String> = None;

        for (idx, row) in text.lines().enumerate() {
            if row.starts_with("//") || row.trim().is_empty() {
                continue;
            }
            if row.starts_with("-- ") {
                let caps = HEADER.captures(row).ok_or_else(|| {
                    HaystackError::format("units header", format!("line {}: {row}", idx + 1))
                })?;
                quantity = Some(caps[1].to_string());
                dimension = match &caps[2] {
                    "null" => None,
                    dim => Some(dim.to_string()),
                };
                continue;
            }

            let mut fields = row.trim().split(';').map(str::trim);
            let names = fields
                .next()
                .unwrap_or_default()
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect::<Vec<String>>();
            let Some(canonical) = names.first().cloned() else {
                return Err(HaystackError::format(
                    "units row",
                    format!("line {}: {row}", idx + 1),
                ));
            };
            let aliases = if names.len() > 1 {
                names[1..].to_vec()
            } else {
                names.clone()
            };
            let row_dim = fields.next().filter(|dim| !dim.is_empty());
            let ratio = match fields.next().filter(|ratio| !ratio.is_empty()) {
                Some(ratio) => Some(ratio.parse::<f64>().map_err(|_| {
                    HaystackError::format("unit ratio", format!("line {}: {ratio}", idx + 1))
                })?),
                None => None,
            };

            let record = Arc::new(UnitRecord {
                canonical: canonical.clone(),
                aliases: aliases.clone(),
                quantity: quantity.clone(),
                dimension: dimension.clone(),
                ratio,
            });

            let mut symbols = vec![canonical.clone()];
            symbols.extend(aliases);
            // The base unit of a quantity is also addressable by the dimension tag itself.
            if ratio.is_none() && row_dim.is_some() && row_dim == dimension.as_deref() {
                if let Some(dim) = &dimension {
                    symbols.push(dim.clone());
                }
            }
            db.insert(record, symbols);
        }

        tracing::debug!(
            "[UnitDb::parse] loaded {} units ({} symbols)",
            db.records.len(),
            db.symbols.len()
        );
        Ok(db)
    }

    /// Build a table from a units file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<UnitDb> {
        tracing::debug!("[UnitDb::load] Reading units table from {:?}", path.as_ref());
        let text = read_to_string(path)?;
        UnitDb::parse(&text)
    }

    fn insert(&mut self, record: Arc<UnitRecord>, symbols: Vec<String>) {
        if self.records.contains_key(&record.canonical) {
            tracing::warn!(
                "[UnitDb::parse] Duplicate canonical unit '{}', keeping the first definition",
                record.canonical
            );
            return;
        }
        for symbol in symbols {
            match self.symbols.get(&symbol) {
                Some(existing) if existing != &record.canonical => {
                    tracing::warn!(
                        "[UnitDb::parse] Symbol '{}' of '{}' already maps to '{}', ignoring",
                        symbol,
                        record.canonical,
                        existing
                    );
                }
                Some(_) => {}
                None => {
                    self.symbols.insert(symbol, record.canonical.clone());
                }
            }
        }
        self.records.insert(record.canonical.clone(), record);
    }

    /// Resolve any accepted spelling to its canonical record.
    pub fn resolve(&self, symbol: &str) -> Result<Arc<UnitRecord>> {
        self.symbols
            .get(symbol)
            .and_then(|canonical| self.records.get(canonical))
            .cloned()
            .ok_or_else(|| HaystackError::UnitNotFound(symbol.to_string()))
    }

    /// Resolve a spelling into a [`Unit`] that remembers the spelling.
    pub fn unit(&self, symbol: &str) -> Result<Unit> {
        Ok(Unit {
            symbol: symbol.to_string(),
            record: self.resolve(symbol)?,
        })
    }

    pub fn canonical(&self, symbol: &str) -> Result<String> {
        Ok(self.resolve(symbol)?.canonical.clone())
    }

    /// The full table row for a spelling: the canonical name followed by its aliases.
    pub fn symbols(&self, symbol: &str) -> Result<Vec<String>> {
        let record = self.resolve(symbol)?;
        let mut row = vec![record.canonical.clone()];
        if record.aliases != [record.canonical.clone()] {
            row.extend(record.aliases.iter().cloned());
        }
        Ok(row)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Number of canonical units in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
