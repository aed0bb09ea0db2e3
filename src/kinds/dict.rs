use super::{scalar::check_dict_key, Kind};
use crate::error::Result;

/// Name to [`Kind`] map that remembers insertion order for encoding. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(String, Kind)>,
}

impl Dict {
    pub fn new() -> Self {
        Dict::default()
    }

    pub fn from_entries<I, K>(entries: I) -> Result<Dict>
    where
        I: IntoIterator<Item = (K, Kind)>,
        K: Into<String>,
    {
        let mut dict = Dict::new();
        for (key, kind) in entries {
            dict.insert(key, kind)?;
        }
        Ok(dict)
    }

    /// Insert or replace a value, returning the one it displaced. Replacing keeps the key's
    /// original position.
    pub fn insert<K: Into<String>>(&mut self, key: K, kind: Kind) -> Result<Option<Kind>> {
        let key = key.into();
        check_dict_key(&key)?;
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Ok(Some(std::mem::replace(slot, kind))),
            None => {
                self.entries.push((key, kind));
                Ok(None)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Kind> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, kind)| kind)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Kind> {
        let idx = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Kind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_zinc(&self) -> String {
        let body = self
            .entries
            .iter()
            .map(|(name, kind)| format!("{name}:{}", kind.to_zinc()))
            .collect::<Vec<String>>()
            .join(", ");
        format!("{{{body}}}")
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(name, kind)| other.get(name) == Some(kind))
    }
}

impl<'a> IntoIterator for &'a Dict {
    type Item = (&'a str, &'a Kind);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Kind)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
