//! Token to [`Kind`] resolution.
use pest::iterators::{Pair, Pairs};

use super::{grammar::Rule, Resolver};
use crate::{
    error::{HaystackError, Result},
    kinds::{
        parse_date, parse_time, unescape_str, Coord, Dict, Kind, Number, Ref, Symbol, XStr,
        ZonedDateTime,
    },
};

/// Error for a token the semantic layer has no action for.
pub(crate) fn unexpected(pair: &Pair<'_, Rule>) -> HaystackError {
    let (line, column) = pair.line_col();
    HaystackError::Rule {
        rule: format!("{:?}", pair.as_rule()),
        line,
        column,
    }
}

fn next_inner<'i>(
    inner: &mut Pairs<'i, Rule>,
    parent: &Pair<'i, Rule>,
) -> Result<Pair<'i, Rule>> {
    inner.next().ok_or_else(|| unexpected(parent))
}

fn parse_f64(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| HaystackError::format("Number", text))
}

/// Resolve a value token (scalar, list, dict or bare text).
pub(crate) fn kind(pair: Pair<'_, Rule>, resolver: &Resolver) -> Result<Kind> {
    match pair.as_rule() {
        Rule::marker_kw => Ok(Kind::Marker),
        Rule::na_kw => Ok(Kind::NA),
        Rule::remove_kw => Ok(Kind::Remove),
        Rule::true_kw => Ok(Kind::Bool(true)),
        Rule::false_kw => Ok(Kind::Bool(false)),
        Rule::special_number => match pair.as_str() {
            "NaN" => Ok(Kind::from(f64::NAN)),
            "INF" => Ok(Kind::from(f64::INFINITY)),
            "-INF" => Ok(Kind::from(f64::NEG_INFINITY)),
            other => Err(HaystackError::format("Number", other)),
        },
        Rule::number => {
            let mut inner = pair.clone().into_inner();
            let value = parse_f64(next_inner(&mut inner, &pair)?.as_str())?;
            match inner.next() {
                Some(unit) => Ok(Kind::Number(Number::with_unit(
                    value,
                    resolver.unit(unit.as_str())?,
                ))),
                None => Ok(Kind::Number(Number::new(value))),
            }
        }
        Rule::string => string(pair).map(Kind::Str),
        Rule::uri => {
            let body = pair.into_inner().next().map(|body| body.as_str()).unwrap_or_default();
            Ok(Kind::Uri(unescape_uri(body)))
        }
        Rule::ref_val => {
            let mut inner = pair.clone().into_inner();
            let id = next_inner(&mut inner, &pair)?.as_str();
            match inner.next() {
                Some(dis) => Ok(Kind::Ref(Ref::with_dis(id, string(dis)?)?)),
                None => Ok(Kind::Ref(Ref::new(id)?)),
            }
        }
        Rule::symbol => Ok(Kind::Symbol(Symbol::new(pair.as_str())?)),
        Rule::date => Ok(Kind::Date(parse_date(pair.as_str())?)),
        Rule::time => Ok(Kind::Time(parse_time(pair.as_str())?)),
        Rule::datetime => {
            let mut inner = pair.clone().into_inner();
            let stamp = next_inner(&mut inner, &pair)?.as_str();
            let zone = match inner.next() {
                Some(name) => Some(resolver.zone(name.as_str())?),
                None => None,
            };
            Ok(Kind::DateTime(ZonedDateTime::parse(stamp, zone)?))
        }
        Rule::coord => {
            let mut inner = pair.clone().into_inner();
            let lat = parse_f64(next_inner(&mut inner, &pair)?.as_str())?;
            let lng = parse_f64(next_inner(&mut inner, &pair)?.as_str())?;
            Ok(Kind::Coord(Coord::new(lat, lng)))
        }
        Rule::xstr => {
            let mut inner = pair.clone().into_inner();
            let type_name = next_inner(&mut inner, &pair)?.as_str();
            let value = string(next_inner(&mut inner, &pair)?)?;
            Ok(Kind::XStr(XStr::new(type_name, value)?))
        }
        Rule::list => pair
            .into_inner()
            .map(|item| kind(item, resolver))
            .collect::<Result<Vec<Kind>>>()
            .map(Kind::List),
        Rule::dict => {
            let mut dict = Dict::new();
            for entry in pair.into_inner() {
                let mut inner = entry.clone().into_inner();
                let key = next_inner(&mut inner, &entry)?.as_str();
                if dict.contains_key(key) {
                    return Err(HaystackError::DuplicateKey(key.to_string()));
                }
                let value = match inner.next() {
                    Some(value) => kind(value, resolver)?,
                    None => Kind::Marker,
                };
                dict.insert(key, value)?;
            }
            Ok(Kind::Dict(dict))
        }
        Rule::bare => Ok(Kind::Str(pair.as_str().trim().to_string())),
        _ => Err(unexpected(&pair)),
    }
}

/// Body of a quoted string token, unescaped.
fn string(pair: Pair<'_, Rule>) -> Result<String> {
    match pair.into_inner().next() {
        Some(body) => unescape_str(body.as_str()),
        None => Ok(String::new()),
    }
}

/// Uri body with `` \` `` and `\\` unescaped. Other backslashes are kept as written.
fn unescape_uri(body: &str) -> String {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if next == '`' || next == '\\' => {
                value.push(next);
                chars.next();
            }
            _ => value.push(c),
        }
    }
    value
}

/// Join the raw lines of a multiline block, dropping the indent the lines share.
pub(crate) fn multiline_text(lines: &[(&str, &str)]) -> String {
    let indent = lines
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(indent, _)| indent.chars().count())
        .min()
        .unwrap_or(0);
    let mut joined = String::new();
    for (line_indent, text) in lines {
        if !text.trim().is_empty() {
            joined.extend(line_indent.chars().skip(indent));
            joined.push_str(text.trim_end());
        }
        joined.push('\n');
    }
    joined
}
