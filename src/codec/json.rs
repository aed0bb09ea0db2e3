//! Decoder for the structured (Haystack JSON) form produced by [`Kind::to_json`],
//! [`Entity::to_json`], [`Ontology::to_json`] and [`Grid::to_json`](crate::ontology::Grid::to_json).
use serde_json::{Map, Value};

use super::Resolver;
use crate::{
    error::{HaystackError, Result},
    kinds::{
        parse_date, parse_time, Coord, Dict, Kind, Number, Ref, Symbol, XStr,
        ZonedDateTime, JSON_KIND,
    },
    ontology::{Entity, Ontology, Tag, ID_TAG},
};

fn field<'a>(map: &'a Map<String, Value>, name: &str, kind: &str) -> Result<&'a Value> {
    map.get(name)
        .ok_or_else(|| HaystackError::format(format!("{kind} JSON"), format!("missing '{name}'")))
}

fn text_field<'a>(map: &'a Map<String, Value>, name: &str, kind: &str) -> Result<&'a str> {
    field(map, name, kind)?
        .as_str()
        .ok_or_else(|| HaystackError::format(format!("{kind} JSON"), format!("'{name}' is not text")))
}

fn float_field(map: &Map<String, Value>, name: &str, kind: &str) -> Result<f64> {
    field(map, name, kind)?
        .as_f64()
        .ok_or_else(|| HaystackError::format(format!("{kind} JSON"), format!("'{name}' is not a number")))
}

/// Decode one structured value.
///
/// Arrays decode to `List`, maps without `_kind` to `Dict`. Plain JSON strings, numbers and
/// booleans are accepted as `Str`, `Number` and `Bool`.
pub fn decode_kind(value: &Value, resolver: &Resolver) -> Result<Kind> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| decode_kind(item, resolver))
            .collect::<Result<Vec<Kind>>>()
            .map(Kind::List),
        Value::Object(map) => match map.get(JSON_KIND) {
            Some(Value::Bool(flag)) => Ok(Kind::Bool(*flag)),
            Some(Value::String(tag)) => decode_tagged(tag, map, resolver),
            Some(other) => Err(HaystackError::format(JSON_KIND, other.to_string())),
            None => {
                let mut dict = Dict::new();
                for (key, item) in map {
                    dict.insert(key.as_str(), decode_kind(item, resolver)?)?;
                }
                Ok(Kind::Dict(dict))
            }
        },
        Value::String(text) => Ok(Kind::Str(text.clone())),
        Value::Bool(flag) => Ok(Kind::Bool(*flag)),
        Value::Number(number) => number
            .as_f64()
            .map(Kind::from)
            .ok_or_else(|| HaystackError::format("Number", number.to_string())),
        Value::Null => Err(HaystackError::format("structured value", "null")),
    }
}

fn decode_tagged(tag: &str, map: &Map<String, Value>, resolver: &Resolver) -> Result<Kind> {
    match tag {
        "marker" => Ok(Kind::Marker),
        "na" => Ok(Kind::NA),
        "remove" => Ok(Kind::Remove),
        "number" => {
            let value = match field(map, "val", tag)? {
                Value::String(special) => match special.as_str() {
                    "NaN" => f64::NAN,
                    "INF" => f64::INFINITY,
                    "-INF" => f64::NEG_INFINITY,
                    other => return Err(HaystackError::format("Number", other)),
                },
                other => other
                    .as_f64()
                    .ok_or_else(|| HaystackError::format("Number", other.to_string()))?,
            };
            match map.get("unit").and_then(Value::as_str) {
                Some(unit) => Ok(Kind::Number(Number::with_unit(value, resolver.unit(unit)?))),
                None => Ok(Kind::Number(Number::new(value))),
            }
        }
        "str" => Ok(Kind::Str(text_field(map, "val", tag)?.to_string())),
        "uri" => Ok(Kind::Uri(text_field(map, "val", tag)?.to_string())),
        "ref" => {
            let id = text_field(map, "val", tag)?;
            match map.get("dis").and_then(Value::as_str) {
                Some(dis) => Ok(Kind::Ref(Ref::with_dis(id, dis)?)),
                None => Ok(Kind::Ref(Ref::new(id)?)),
            }
        }
        "symbol" => Ok(Kind::Symbol(Symbol::new(text_field(map, "val", tag)?)?)),
        "date" => Ok(Kind::Date(parse_date(text_field(map, "val", tag)?)?)),
        "time" => Ok(Kind::Time(parse_time(text_field(map, "val", tag)?)?)),
        "dateTime" => {
            let zone = match map.get("tz").and_then(Value::as_str) {
                Some(name) => Some(resolver.zone(name)?),
                None => None,
            };
            Ok(Kind::DateTime(ZonedDateTime::parse(
                text_field(map, "val", tag)?,
                zone,
            )?))
        }
        "coord" => Ok(Kind::Coord(Coord::new(
            float_field(map, "lat", tag)?,
            float_field(map, "lng", tag)?,
        ))),
        "xstr" => Ok(Kind::XStr(XStr::new(
            text_field(map, "type", tag)?,
            text_field(map, "value", tag)?,
        )?)),
        other => Err(HaystackError::format(JSON_KIND, other)),
    }
}

/// Decode an entity map: `id` must hold a ref, every other key becomes a tag.
pub fn decode_entity(value: &Value, resolver: &Resolver) -> Result<Entity> {
    let map = value
        .as_object()
        .ok_or_else(|| HaystackError::format("entity JSON", value.to_string()))?;
    let id = match map.get(ID_TAG) {
        Some(id) => match decode_kind(id, resolver)? {
            Kind::Ref(href) => href,
            other => return Err(HaystackError::format("entity id", other.to_zinc())),
        },
        None => Ref::generate(),
    };
    let mut entity = Entity::new(id);
    for (name, item) in map.iter().filter(|(name, _)| name.as_str() != ID_TAG) {
        entity.push(Tag::new(name.as_str(), decode_kind(item, resolver)?)?)?;
    }
    Ok(entity)
}

/// Decode either an array of entity maps or a grid (`_kind: "grid"` with `rows`).
pub fn decode_ontology(value: &Value, resolver: &Resolver) -> Result<Ontology> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(map) if map.get(JSON_KIND).and_then(Value::as_str) == Some("grid") => {
            field(map, "rows", "grid")?
                .as_array()
                .ok_or_else(|| HaystackError::format("grid JSON", "'rows' is not an array"))?
        }
        other => return Err(HaystackError::format("ontology JSON", other.to_string())),
    };
    let mut ontology = Ontology::new();
    for row in rows {
        ontology.push(decode_entity(row, resolver)?)?;
    }
    tracing::debug!("[json::decode_ontology] {} entities", ontology.len());
    Ok(ontology)
}
