use serde_json::{Map, Value};

use super::Tag;
use crate::{
    error::{HaystackError, Result},
    kinds::{Kind, Ref},
};

/// Name of the identity field; never stored as an ordinary tag.
pub const ID_TAG: &str = "id";

/// An identity plus an ordered set of uniquely named tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: Ref,
    tags: Vec<Tag>,
}

impl Default for Entity {
    /// An empty entity with a random `@<uuid>` identity.
    fn default() -> Self {
        Entity::new(Ref::generate())
    }
}

impl Entity {
    pub fn new(id: Ref) -> Self {
        Entity {
            id,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I: IntoIterator<Item = Tag>>(id: Ref, tags: I) -> Result<Self> {
        let mut entity = Entity::new(id);
        for tag in tags {
            entity.push(tag)?;
        }
        Ok(entity)
    }

    pub fn id(&self) -> &Ref {
        &self.id
    }

    /// Append a tag. Names must be unique within the entity and `id` is reserved.
    pub fn push(&mut self, tag: Tag) -> Result<()> {
        if tag.name() == ID_TAG {
            return Err(HaystackError::ReservedTag(ID_TAG.to_string()));
        }
        if self.contains(tag.name()) {
            return Err(HaystackError::DuplicateTag {
                tag: tag.name().to_string(),
                entity: self.id.id().to_string(),
            });
        }
        self.tags.push(tag);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|tag| tag.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn tag(&self, name: &str) -> Result<&Tag> {
        self.position(name)
            .map(|idx| &self.tags[idx])
            .ok_or_else(|| self.missing(name))
    }

    pub fn kind(&self, name: &str) -> Result<&Kind> {
        self.tag(name).map(Tag::kind)
    }

    /// Swap the tag at `index` for one with the same name.
    pub fn replace(&mut self, index: usize, tag: Tag) -> Result<Tag> {
        let len = self.tags.len();
        let slot = self
            .tags
            .get_mut(index)
            .ok_or(HaystackError::IndexOutOfBounds { index, len })?;
        if slot.name() != tag.name() {
            return Err(HaystackError::TagRename {
                from: slot.name().to_string(),
                to: tag.name().to_string(),
            });
        }
        Ok(std::mem::replace(slot, tag))
    }

    pub fn replace_by_name(&mut self, name: &str, tag: Tag) -> Result<Tag> {
        let index = self.position(name).ok_or_else(|| self.missing(name))?;
        self.replace(index, tag)
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        if index >= self.tags.len() {
            return Err(HaystackError::IndexOutOfBounds {
                index,
                len: self.tags.len(),
            });
        }
        Ok(self.tags.remove(index))
    }

    pub fn remove_by_name(&mut self, name: &str) -> Result<Tag> {
        let index = self.position(name).ok_or_else(|| self.missing(name))?;
        Ok(self.tags.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Trio block: the `id` line, then one line per tag.
    pub fn to_zinc(&self) -> String {
        let mut trio = format!("{ID_TAG}:{}\n", self.id.to_zinc());
        for tag in &self.tags {
            trio.push_str(&tag.to_zinc());
            trio.push('\n');
        }
        trio
    }

    /// Structured form: a map of `id` and every tag.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(ID_TAG.to_string(), Kind::Ref(self.id.clone()).to_json());
        for tag in &self.tags {
            map.insert(tag.name().to_string(), tag.kind().to_json());
        }
        Value::Object(map)
    }

    fn missing(&self, name: &str) -> HaystackError {
        HaystackError::TagNotFound {
            tag: name.to_string(),
            entity: self.id.id().to_string(),
        }
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
