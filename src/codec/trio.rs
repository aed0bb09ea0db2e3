use pest::{iterators::Pair, Parser};

use super::{
    grammar::{Rule, TrioGrammar},
    literal::{kind, multiline_text, unexpected},
    Resolver,
};
use crate::{
    error::{HaystackError, Result},
    kinds::{Kind, Ref},
    ontology::{Entity, Ontology, Tag, ID_TAG},
};

/// Trio reader and writer bound to a set of lookup services.
#[derive(Debug, Clone, Default)]
pub struct TrioCodec {
    resolver: Resolver,
}

impl TrioCodec {
    pub fn new(resolver: Resolver) -> Self {
        TrioCodec { resolver }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Parse a whole document. The first error aborts the parse.
    #[tracing::instrument(skip_all, fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Result<Ontology> {
        let trio = TrioGrammar::parse(Rule::trio, text)?
            .next()
            .ok_or_else(|| HaystackError::Syntax {
                line: 1,
                column: 1,
                message: "empty parse tree".to_string(),
            })?;

        let mut ontology = Ontology::new();
        for pair in trio.into_inner() {
            match pair.as_rule() {
                Rule::entity => {
                    if let Some(entity) = self.entity(pair)? {
                        ontology.push(entity)?;
                    }
                }
                Rule::separator | Rule::EOI => {}
                _ => return Err(unexpected(&pair)),
            }
        }
        tracing::debug!("[TrioCodec::parse] {} entities", ontology.len());
        Ok(ontology)
    }

    /// Parse a single literal, list or dict.
    pub fn parse_value(&self, text: &str) -> Result<Kind> {
        let root = TrioGrammar::parse(Rule::value_root, text)?
            .next()
            .ok_or_else(|| HaystackError::format("value", text))?;
        let value = root
            .into_inner()
            .next()
            .ok_or_else(|| HaystackError::format("value", text))?;
        kind(value, &self.resolver)
    }

    pub fn to_zinc(&self, ontology: &Ontology) -> String {
        ontology.to_zinc()
    }

    /// Build one entity block; `None` when the block holds no tag.
    fn entity(&self, block: Pair<'_, Rule>) -> Result<Option<Entity>> {
        let mut id: Option<Ref> = None;
        let mut tags: Vec<Tag> = Vec::new();

        for line in block.into_inner() {
            match line.as_rule() {
                Rule::tag => {
                    let mut inner = line.clone().into_inner();
                    let (Some(name), Some(value)) = (inner.next(), inner.next()) else {
                        return Err(unexpected(&line));
                    };
                    if name.as_str() == ID_TAG {
                        let (line_no, column) = value.line_col();
                        let found = value.as_str().trim().to_string();
                        match kind(value, &self.resolver)? {
                            Kind::Ref(href) => {
                                if let Some(existing) = id.replace(href) {
                                    return Err(HaystackError::DuplicateTag {
                                        tag: ID_TAG.to_string(),
                                        entity: existing.id().to_string(),
                                    });
                                }
                            }
                            _ => {
                                return Err(HaystackError::IdNotRef {
                                    line: line_no,
                                    column,
                                    found,
                                })
                            }
                        }
                    } else {
                        tags.push(Tag::new(name.as_str(), kind(value, &self.resolver)?)?);
                    }
                }
                Rule::marker => {
                    if line.as_str() == ID_TAG {
                        let (line_no, column) = line.line_col();
                        return Err(HaystackError::IdNotRef {
                            line: line_no,
                            column,
                            found: "M".to_string(),
                        });
                    }
                    tags.push(Tag::marker(line.as_str())?);
                }
                Rule::multiline => {
                    let mut inner = line.clone().into_inner();
                    let name = inner.next().ok_or_else(|| unexpected(&line))?;
                    let mut raw = Vec::new();
                    for ml_line in inner {
                        let mut parts = ml_line.into_inner();
                        let indent = parts.next().map(|p| p.as_str()).unwrap_or_default();
                        let text = parts.next().map(|p| p.as_str()).unwrap_or_default();
                        raw.push((indent, text));
                    }
                    if name.as_str() == ID_TAG {
                        let (line_no, column) = name.line_col();
                        return Err(HaystackError::IdNotRef {
                            line: line_no,
                            column,
                            found: multiline_text(&raw).trim_end().to_string(),
                        });
                    }
                    tags.push(Tag::new(name.as_str(), Kind::Str(multiline_text(&raw)))?);
                }
                Rule::comment_line => {}
                _ => return Err(unexpected(&line)),
            }
        }

        if id.is_none() && tags.is_empty() {
            return Ok(None);
        }
        let entity = Entity::with_tags(id.unwrap_or_else(Ref::generate), tags)?;
        tracing::trace!(
            "[TrioCodec::entity] {} with {} tags",
            entity.id(),
            entity.len()
        );
        Ok(Some(entity))
    }
}
