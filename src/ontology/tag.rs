use std::fmt::{self, Display, Formatter};

use crate::{
    error::Result,
    kinds::{check_tag_name, Kind},
};

/// A named value. The name is fixed once the tag exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    name: String,
    kind: Kind,
}

impl Tag {
    pub fn new<S: Into<String>>(name: S, kind: Kind) -> Result<Tag> {
        let name = name.into();
        check_tag_name(&name)?;
        Ok(Tag { name, kind })
    }

    pub fn marker<S: Into<String>>(name: S) -> Result<Tag> {
        Tag::new(name, Kind::Marker)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn into_kind(self) -> Kind {
        self.kind
    }

    /// A tag with the same name holding another value.
    pub fn with_kind(&self, kind: Kind) -> Tag {
        Tag {
            name: self.name.clone(),
            kind,
        }
    }

    /// Trio line, without the trailing newline.
    pub fn to_zinc(&self) -> String {
        format!("{}:{}", self.name, self.kind.to_zinc())
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_zinc())
    }
}
