//! Reading and writing Trio documents.
//!
//! Parsing runs in two layers:
//!
//! 1. **Lexical**: [`grammar::TrioGrammar`] classifies the text into `(Rule, &str)` tokens:
//!    entity blocks, tag lines, multiline blocks, comments, and the literal forms of each
//!    [`Kind`](crate::kinds::Kind).
//! 2. **Semantic**: [`TrioCodec`] folds the tokens into an [`Ontology`](crate::ontology::Ontology),
//!    resolving unit symbols and timezone names through a [`Resolver`].
//!
//! The structured (JSON) form is decoded by the functions in [`json`].
//!
//! ```rust
//! use trio_core::{codec::TrioCodec, kinds::Ref};
//!
//! let codec = TrioCodec::default();
//! let ontology = codec.parse("id: @ahu1\nahu\ndis: \"AHU 1\"\n").unwrap();
//! assert_eq!(ontology.len(), 1);
//! let ahu = ontology.entity(&Ref::new("ahu1").unwrap()).unwrap();
//! assert_eq!(ahu.kind("dis").unwrap(), "AHU 1");
//! ```
use chrono_tz::Tz;
use std::sync::Arc;

use crate::{
    error::Result,
    timezone::{TimeZoneDb, TIMEZONES},
    units::{Unit, UnitDb, UNITS},
};

pub mod grammar;
pub mod json;
mod literal;
mod trio;

pub use trio::TrioCodec;

/// Unit and timezone lookup shared by the Trio and JSON decoders.
///
/// The default resolver reads the process-wide [`UNITS`] and [`TIMEZONES`] tables.
#[derive(Debug, Clone)]
pub struct Resolver {
    units: Arc<UnitDb>,
    zones: Arc<TimeZoneDb>,
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver {
            units: UNITS.clone(),
            zones: TIMEZONES.clone(),
        }
    }
}

impl Resolver {
    pub fn new(units: Arc<UnitDb>, zones: Arc<TimeZoneDb>) -> Self {
        Resolver { units, zones }
    }

    pub fn units(&self) -> &UnitDb {
        &self.units
    }

    pub fn zones(&self) -> &TimeZoneDb {
        &self.zones
    }

    pub fn unit(&self, symbol: &str) -> Result<Unit> {
        self.units.unit(symbol)
    }

    pub fn zone(&self, short: &str) -> Result<Tz> {
        self.zones.resolve(short)
    }
}
