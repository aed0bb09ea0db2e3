//! Haystack timezone names.
//!
//! Haystack identifies zones by their "city", the last path segment of the IANA id
//! (`Europe/Paris` is written `Paris`). [`TimeZoneDb`] indexes a zone catalogue by that segment.
//!
//! Several IANA ids can share a last segment (`Canada/Eastern`, `US/Eastern`). The index is
//! deterministic: an id that *is* the short name wins, otherwise the lexicographically first id
//! wins. Explicit overrides (see [`TimeZoneDb::with_overrides`]) take precedence over both.
use chrono_tz::{Tz, TZ_VARIANTS};
use once_cell::sync::Lazy;
use std::{
    collections::{BTreeMap, HashMap},
    str::FromStr,
    sync::Arc,
};

use crate::error::{HaystackError, Result};

/// Process-wide index over the compiled IANA catalogue.
pub static TIMEZONES: Lazy<Arc<TimeZoneDb>> = Lazy::new(|| Arc::new(TimeZoneDb::system()));

/// Haystack short name of a zone: the last segment of its IANA id.
pub fn city(tz: &Tz) -> &'static str {
    let name = tz.name();
    name.rsplit('/').next().unwrap_or(name)
}

#[derive(Debug, Clone, Default)]
pub struct TimeZoneDb {
    zones: HashMap<String, Tz>,
}

impl TimeZoneDb {
    /// Index every zone of the IANA catalogue compiled into `chrono-tz`.
    pub fn system() -> Self {
        let db = TimeZoneDb::from_zones(TZ_VARIANTS.iter().copied());
        tracing::debug!(
            "[TimeZoneDb::system] indexed {} short names from {} zones",
            db.zones.len(),
            TZ_VARIANTS.len()
        );
        db
    }

    /// Index an explicit list of IANA ids. Unknown ids are rejected.
    pub fn from_zone_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let zones = ids
            .into_iter()
            .map(|id| parse_zone(id.as_ref()))
            .collect::<Result<Vec<Tz>>>()?;
        Ok(TimeZoneDb::from_zones(zones))
    }

    fn from_zones<I: IntoIterator<Item = Tz>>(zones: I) -> Self {
        let mut catalogue = zones.into_iter().collect::<Vec<Tz>>();
        catalogue.sort_by_key(|tz| tz.name());
        catalogue.dedup();

        let mut index: BTreeMap<&'static str, Tz> = BTreeMap::new();
        for tz in catalogue {
            let short = city(&tz);
            match index.get(short) {
                None => {
                    index.insert(short, tz);
                }
                Some(existing) => {
                    // An id equal to the short name always wins over a longer path.
                    if tz.name() == short && existing.name() != short {
                        tracing::debug!(
                            "[TimeZoneDb] '{}' resolves to '{}' instead of '{}'",
                            short,
                            tz.name(),
                            existing.name()
                        );
                        index.insert(short, tz);
                    } else {
                        tracing::debug!(
                            "[TimeZoneDb] '{}' resolves to '{}', ignoring '{}'",
                            short,
                            existing.name(),
                            tz.name()
                        );
                    }
                }
            }
        }

        TimeZoneDb {
            zones: index
                .into_iter()
                .map(|(short, tz)| (short.to_string(), tz))
                .collect(),
        }
    }

    /// Layer explicit short-name to IANA id mappings over the index.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        for (short, id) in overrides {
            let short = short.into();
            let tz = parse_zone(id.as_ref())?;
            if let Some(previous) = self.zones.insert(short.clone(), tz) {
                if previous != tz {
                    tracing::info!(
                        "[TimeZoneDb::with_overrides] '{}' now resolves to '{}' (was '{}')",
                        short,
                        tz.name(),
                        previous.name()
                    );
                }
            }
        }
        Ok(self)
    }

    /// Resolve a Haystack short zone name to its IANA zone.
    pub fn resolve(&self, short: &str) -> Result<Tz> {
        self.zones
            .get(short)
            .copied()
            .ok_or_else(|| HaystackError::TimeZoneNotFound(short.to_string()))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn parse_zone(id: &str) -> Result<Tz> {
    Tz::from_str(id).map_err(|_| HaystackError::TimeZoneNotFound(id.to_string()))
}
