//! Shared test utilities for crate-internal tests

use crate::{
    kinds::{Kind, Ref},
    ontology::{Entity, Tag},
};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Build an entity from `(name, value)` pairs.
pub fn entity(id: &str, tags: &[(&str, Kind)]) -> Entity {
    let tags = tags
        .iter()
        .map(|(name, kind)| Tag::new(*name, kind.clone()).unwrap())
        .collect::<Vec<Tag>>();
    Entity::with_tags(Ref::new(id).unwrap(), tags).unwrap()
}
