//! The Haystack value types ("kinds").
//!
//! [`Kind`] is the closed set of values a tag can hold. Every variant has two encodings:
//!
//! - the compact text form used by Trio and Zinc ([`Kind::to_zinc`], also `Display`), and
//! - the structured JSON form, a map carrying a `_kind` discriminator ([`Kind::to_json`], also
//!   `serde::Serialize`).
//!
//! Payloads with naming rules (refs, symbols, xstr type names, dict keys) validate on construction,
//! so a `Kind` that exists is always encodable.
//!
//! ```rust
//! use trio_core::kinds::{Kind, Ref};
//!
//! let id = Kind::from(Ref::with_dis("@site", "Main site").unwrap());
//! assert_eq!(id.to_zinc(), "@site \"Main site\"");
//! assert_eq!(id.to_json()["val"], "site");
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

mod dict;
mod scalar;

pub use dict::Dict;
pub use scalar::{
    check_dict_key, check_tag_name, escape_str, format_float, format_time, parse_date,
    parse_time, unescape_str, Coord, Dms, Number, Ref, Symbol, XStr, ZonedDateTime, REF_SIGIL,
    SYMBOL_SIGIL,
};

/// Discriminator field of the structured form.
pub const JSON_KIND: &str = "_kind";

#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Marker,
    NA,
    Remove,
    Bool(bool),
    Number(Number),
    Str(String),
    Uri(String),
    Ref(Ref),
    Symbol(Symbol),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(ZonedDateTime),
    Coord(Coord),
    XStr(XStr),
    List(Vec<Kind>),
    Dict(Dict),
}

impl Kind {
    /// Lower-case variant name, matching the structured form's `_kind` where it has one.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Kind::Marker => "marker",
            Kind::NA => "na",
            Kind::Remove => "remove",
            Kind::Bool(_) => "bool",
            Kind::Number(_) => "number",
            Kind::Str(_) => "str",
            Kind::Uri(_) => "uri",
            Kind::Ref(_) => "ref",
            Kind::Symbol(_) => "symbol",
            Kind::Date(_) => "date",
            Kind::Time(_) => "time",
            Kind::DateTime(_) => "dateTime",
            Kind::Coord(_) => "coord",
            Kind::XStr(_) => "xstr",
            Kind::List(_) => "list",
            Kind::Dict(_) => "dict",
        }
    }

    pub fn to_zinc(&self) -> String {
        match self {
            Kind::Marker => "M".to_string(),
            Kind::NA => "NA".to_string(),
            Kind::Remove => "R".to_string(),
            Kind::Bool(true) => "T".to_string(),
            Kind::Bool(false) => "F".to_string(),
            Kind::Number(number) => number.to_zinc(),
            Kind::Str(value) => format!("\"{}\"", escape_str(value)),
            Kind::Uri(value) => {
                format!("`{}`", value.replace('\\', "\\\\").replace('`', "\\`"))
            }
            Kind::Ref(href) => href.to_zinc(),
            Kind::Symbol(symbol) => symbol.value().to_string(),
            Kind::Date(date) => date.format("%Y-%m-%d").to_string(),
            Kind::Time(time) => format_time(time),
            Kind::DateTime(stamp) => stamp.to_zinc(),
            Kind::Coord(coord) => coord.to_zinc(),
            Kind::XStr(xstr) => xstr.to_zinc(),
            Kind::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(Kind::to_zinc)
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Kind::Dict(dict) => dict.to_zinc(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Kind::Marker | Kind::NA | Kind::Remove => json!({ "_kind": self.kind_name() }),
            Kind::Bool(value) => json!({ "_kind": value }),
            Kind::Number(number) => {
                let value = number.value();
                let val = if value.is_nan() {
                    json!("NaN")
                } else if value.is_infinite() {
                    json!(if value > 0.0 { "INF" } else { "-INF" })
                } else {
                    json!(value)
                };
                match number.unit() {
                    Some(unit) => json!({ "_kind": "number", "val": val, "unit": unit.print() }),
                    None => json!({ "_kind": "number", "val": val }),
                }
            }
            Kind::Str(value) => json!({ "_kind": "str", "val": value }),
            Kind::Uri(value) => json!({ "_kind": "uri", "val": value }),
            Kind::Ref(href) => match href.dis() {
                Some(dis) => json!({ "_kind": "ref", "val": href.val(), "dis": dis }),
                None => json!({ "_kind": "ref", "val": href.val() }),
            },
            Kind::Symbol(symbol) => json!({ "_kind": "symbol", "val": symbol.val() }),
            Kind::Date(date) => {
                json!({ "_kind": "date", "val": date.format("%Y-%m-%d").to_string() })
            }
            Kind::Time(time) => json!({ "_kind": "time", "val": format_time(time) }),
            Kind::DateTime(stamp) => match stamp.city() {
                Some(city) => json!({ "_kind": "dateTime", "val": stamp.to_iso(), "tz": city }),
                None => json!({ "_kind": "dateTime", "val": stamp.to_iso() }),
            },
            Kind::Coord(coord) => json!({ "_kind": "coord", "lat": coord.lat, "lng": coord.lng }),
            Kind::XStr(xstr) => {
                json!({ "_kind": "xstr", "type": xstr.type_name(), "value": xstr.value() })
            }
            Kind::List(items) => Value::Array(items.iter().map(Kind::to_json).collect()),
            Kind::Dict(dict) => Value::Object(
                dict.iter()
                    .map(|(name, kind)| (name.to_string(), kind.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Kind::Marker)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Kind::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Kind::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::value)
    }

    /// Text of a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Kind::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Kind::Uri(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Ref> {
        match self {
            Kind::Ref(href) => Some(href),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Kind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Kind::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&NaiveTime> {
        match self {
            Kind::Time(time) => Some(time),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&ZonedDateTime> {
        match self {
            Kind::DateTime(stamp) => Some(stamp),
            _ => None,
        }
    }

    pub fn as_coord(&self) -> Option<&Coord> {
        match self {
            Kind::Coord(coord) => Some(coord),
            _ => None,
        }
    }

    pub fn as_xstr(&self) -> Option<&XStr> {
        match self {
            Kind::XStr(xstr) => Some(xstr),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Kind]> {
        match self {
            Kind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Kind::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_zinc())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl PartialEq<f64> for Kind {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<i32> for Kind {
    fn eq(&self, other: &i32) -> bool {
        self == &f64::from(*other)
    }
}

impl PartialEq<i64> for Kind {
    fn eq(&self, other: &i64) -> bool {
        self == &(*other as f64)
    }
}

impl PartialEq<bool> for Kind {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

/// Textual kinds compare against their natural text: `Str` and `Uri` by value, `Ref` and
/// `Symbol` with or without sigil, `Date`/`Time` by their ISO reading.
impl PartialEq<str> for Kind {
    fn eq(&self, other: &str) -> bool {
        match self {
            Kind::Str(value) | Kind::Uri(value) => value == other,
            Kind::Ref(href) => href == other,
            Kind::Symbol(symbol) => symbol == other,
            Kind::Date(date) => NaiveDate::from_str(other).is_ok_and(|parsed| parsed == *date),
            Kind::Time(time) => parse_time(other).is_ok_and(|parsed| parsed == *time),
            _ => false,
        }
    }
}

impl PartialEq<&str> for Kind {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl From<bool> for Kind {
    fn from(value: bool) -> Self {
        Kind::Bool(value)
    }
}

impl From<f64> for Kind {
    fn from(value: f64) -> Self {
        Kind::Number(Number::new(value))
    }
}

impl From<i32> for Kind {
    fn from(value: i32) -> Self {
        Kind::Number(Number::new(f64::from(value)))
    }
}

impl From<Number> for Kind {
    fn from(value: Number) -> Self {
        Kind::Number(value)
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        Kind::Str(value.to_string())
    }
}

impl From<String> for Kind {
    fn from(value: String) -> Self {
        Kind::Str(value)
    }
}

impl From<Ref> for Kind {
    fn from(value: Ref) -> Self {
        Kind::Ref(value)
    }
}

impl From<Symbol> for Kind {
    fn from(value: Symbol) -> Self {
        Kind::Symbol(value)
    }
}

impl From<NaiveDate> for Kind {
    fn from(value: NaiveDate) -> Self {
        Kind::Date(value)
    }
}

impl From<NaiveTime> for Kind {
    fn from(value: NaiveTime) -> Self {
        Kind::Time(value)
    }
}

impl From<ZonedDateTime> for Kind {
    fn from(value: ZonedDateTime) -> Self {
        Kind::DateTime(value)
    }
}

impl From<Coord> for Kind {
    fn from(value: Coord) -> Self {
        Kind::Coord(value)
    }
}

impl From<XStr> for Kind {
    fn from(value: XStr) -> Self {
        Kind::XStr(value)
    }
}

impl From<Vec<Kind>> for Kind {
    fn from(value: Vec<Kind>) -> Self {
        Kind::List(value)
    }
}

impl From<Dict> for Kind {
    fn from(value: Dict) -> Self {
        Kind::Dict(value)
    }
}
