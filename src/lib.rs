//! # trio-core
//!
//! A Rust library for reading and writing [Project Haystack](https://project-haystack.org)
//! tag data in the Trio text format, with Zinc and Haystack-JSON output.
//!
//! ## Overview
//!
//! A Trio document is a sequence of **entities** separated by `---` lines. Each entity is a list
//! of **tags**: a name and a typed value (a [`Kind`](kinds::Kind)). trio-core parses documents
//! into an [`Ontology`](ontology::Ontology), lets you edit it while keeping ids and tag names
//! unique, and renders it back out:
//!
//! - **Trio / Zinc text**: [`Ontology::to_zinc`](ontology::Ontology::to_zinc) re-parses to an
//!   equal ontology
//! - **Zinc grid**: [`Ontology::grid`](ontology::Ontology::grid) aligns every entity onto the
//!   union of all tag names
//! - **Haystack JSON**: [`Ontology::to_json`](ontology::Ontology::to_json), decoded again by
//!   [`codec::json`]
//!
//! ## Architecture
//!
//! - **[`kinds`]**: the closed `Kind` sum type and its scalar payloads (`Number`, `Ref`, ...)
//! - **[`ontology`]**: `Tag`, `Entity`, `Ontology` and `Grid`
//! - **[`codec`]**: the pest grammar, the semantic Trio parser and the JSON decoder
//! - **[`units`]**: the units database used to validate number suffixes
//! - **[`timezone`]**: short timezone name lookup over the IANA catalogue
//! - **[`config`]**: TOML configuration for substitute units tables and timezone overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use trio_core::{codec::TrioCodec, kinds::Kind};
//!
//! let text = "\
//! id: @site \"Main Site\"
//! site
//! area: 1200m²
//! tz: \"Paris\"
//! ---
//! id: @ahu
//! ahu
//! siteRef: @site
//! ";
//!
//! let codec = TrioCodec::default();
//! let ontology = codec.parse(text)?;
//! assert_eq!(ontology.len(), 2);
//!
//! let site = ontology.get(0).unwrap();
//! let area = site.kind("area")?.as_number().unwrap();
//! assert_eq!(area.value(), 1200.0);
//! assert_eq!(area.unit().unwrap().canonical(), "square_meter");
//!
//! // Written text parses back to the same ontology.
//! assert_eq!(codec.parse(&ontology.to_zinc())?, ontology);
//!
//! // Single literals parse on their own.
//! assert_eq!(codec.parse_value("[1, \"two\", M]")?, Kind::List(vec![
//!     Kind::from(1.0),
//!     Kind::from("two"),
//!     Kind::Marker,
//! ]));
//! # Ok::<(), trio_core::HaystackError>(())
//! ```
//!
//! ## Configuration
//!
//! Unit and timezone lookups go through a [`codec::Resolver`]. The default resolver uses the
//! embedded units table and the IANA catalogue compiled into `chrono-tz`; a
//! [`config::CodecConfig`] builds one with a different units table or explicit timezone
//! mappings:
//!
//! ```rust
//! use trio_core::{codec::TrioCodec, config::CodecConfig};
//!
//! let config = CodecConfig::from_toml_str("[timezone_overrides]\nEastern = \"US/Eastern\"\n")?;
//! let codec = TrioCodec::new(config.resolver()?);
//! let ontology = codec.parse("id: @a\nts: 2024-01-05T08:00:00-05:00 Eastern\n")?;
//! let ts = ontology.get(0).unwrap().kind("ts")?.as_datetime().unwrap();
//! assert_eq!(ts.zone().map(|tz| tz.name()), Some("US/Eastern"));
//! # Ok::<(), trio_core::HaystackError>(())
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`] with a [`HaystackError`]; use
//! [`HaystackError::class`] to tell malformed input from failed lookups and integrity
//! violations.

pub mod codec;
pub mod config;
pub mod error;
pub mod kinds;
pub mod ontology;
#[cfg(test)]
mod tests;
pub mod timezone;
pub mod units;

pub use error::*;
