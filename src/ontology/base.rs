use serde_json::Value;
use std::ops::Range;

use super::{Entity, Grid};
use crate::{
    error::{HaystackError, Result},
    kinds::Ref,
};

/// Trio entity separator line.
pub const ENTITY_SEPARATOR: &str = "---";

/// An ordered collection of entities, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ontology {
    entities: Vec<Entity>,
}

impl Ontology {
    pub fn new() -> Self {
        Ontology::default()
    }

    pub fn from_entities<I: IntoIterator<Item = Entity>>(entities: I) -> Result<Self> {
        let mut ontology = Ontology::new();
        for entity in entities {
            ontology.push(entity)?;
        }
        Ok(ontology)
    }

    pub fn push(&mut self, entity: Entity) -> Result<()> {
        if self.contains(entity.id()) {
            return Err(HaystackError::DuplicateEntity(entity.id().id().to_string()));
        }
        tracing::trace!("[Ontology::push] {}", entity.id());
        self.entities.push(entity);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    pub fn position(&self, id: &Ref) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }

    pub fn contains(&self, id: &Ref) -> bool {
        self.position(id).is_some()
    }

    pub fn entity(&self, id: &Ref) -> Result<&Entity> {
        self.position(id)
            .map(|idx| &self.entities[idx])
            .ok_or_else(|| HaystackError::EntityNotFound(id.id().to_string()))
    }

    /// Mutable access to an entity's tags. Ids change only through [`Ontology::set`] and
    /// [`Ontology::replace`].
    pub fn entity_mut(&mut self, id: &Ref) -> Result<&mut Entity> {
        match self.position(id) {
            Some(idx) => Ok(&mut self.entities[idx]),
            None => Err(HaystackError::EntityNotFound(id.id().to_string())),
        }
    }

    /// A new ontology holding clones of the entities in `range`.
    pub fn slice(&self, range: Range<usize>) -> Result<Ontology> {
        let len = self.entities.len();
        match self.entities.get(range.clone()) {
            Some(entities) => Ok(Ontology {
                entities: entities.to_vec(),
            }),
            None => Err(HaystackError::IndexOutOfBounds {
                index: range.end.max(range.start),
                len,
            }),
        }
    }

    /// Overwrite the entity at `index`.
    pub fn set(&mut self, index: usize, entity: Entity) -> Result<Entity> {
        let len = self.entities.len();
        if index >= len {
            return Err(HaystackError::IndexOutOfBounds { index, len });
        }
        self.check_replacement(index, &entity)?;
        Ok(std::mem::replace(&mut self.entities[index], entity))
    }

    /// Overwrite the entity identified by `id`.
    pub fn replace(&mut self, id: &Ref, entity: Entity) -> Result<Entity> {
        let index = self
            .position(id)
            .ok_or_else(|| HaystackError::EntityNotFound(id.id().to_string()))?;
        self.check_replacement(index, &entity)?;
        Ok(std::mem::replace(&mut self.entities[index], entity))
    }

    pub fn remove(&mut self, id: &Ref) -> Result<Entity> {
        let index = self
            .position(id)
            .ok_or_else(|| HaystackError::EntityNotFound(id.id().to_string()))?;
        Ok(self.entities.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Entity> {
        let len = self.entities.len();
        if index >= len {
            return Err(HaystackError::IndexOutOfBounds { index, len });
        }
        Ok(self.entities.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn to_zinc(&self) -> String {
        self.entities
            .iter()
            .map(Entity::to_zinc)
            .collect::<Vec<String>>()
            .join(&format!("{ENTITY_SEPARATOR}\n"))
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.entities.iter().map(Entity::to_json).collect())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self)
    }

    fn check_replacement(&self, index: usize, entity: &Entity) -> Result<()> {
        match self.position(entity.id()) {
            Some(existing) if existing != index => {
                Err(HaystackError::DuplicateEntity(entity.id().id().to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl IntoIterator for Ontology {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}
