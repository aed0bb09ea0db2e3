//! The tag graph: [`Tag`], [`Entity`], [`Ontology`] and the tabular [`Grid`] projection.
//!
//! Uniqueness is checked on every insert or replace:
//!
//! - tag names are unique within an entity, and a tag slot cannot be renamed in place;
//! - entity ids are unique within an ontology.
//!
//! ```rust
//! use trio_core::{kinds::{Kind, Ref}, ontology::{Entity, Ontology, Tag}};
//!
//! let mut site = Entity::new(Ref::new("@site").unwrap());
//! site.push(Tag::marker("site").unwrap()).unwrap();
//! site.push(Tag::new("area", Kind::from(120.0)).unwrap()).unwrap();
//!
//! let ontology = Ontology::from_entities([site]).unwrap();
//! assert_eq!(ontology.to_zinc(), "id:@site\nsite:M\narea:120.0\n");
//! ```

mod base;
mod entity;
mod grid;
mod tag;

#[cfg(test)]
mod tests;

pub use base::{Ontology, ENTITY_SEPARATOR};
pub use entity::{Entity, ID_TAG};
pub use grid::{Grid, ZINC_VERSION};
pub use tag::Tag;
