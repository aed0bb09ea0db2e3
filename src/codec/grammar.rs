//! Lexical layer: the pest grammar for Trio documents and single values.
//!
//! The grammar only classifies text. Each token the semantic layer sees is a `(Rule, &str)`
//! pair; every conversion to a [`Kind`](crate::kinds::Kind) happens in [`super::literal`].
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "codec/trio.pest"]
pub struct TrioGrammar;
