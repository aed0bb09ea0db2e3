use chrono::{
    FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike,
};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};
use uuid::Uuid;

use crate::{
    error::{HaystackError, Result},
    timezone::city,
    units::Unit,
};

pub const REF_SIGIL: char = '@';
pub const SYMBOL_SIGIL: char = '^';

static ID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_:\-.~]+$").expect("Static regex is valid"));
static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][A-Za-z0-9_]*$").expect("Static regex is valid"));
static DICT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][A-Za-z0-9_]+$").expect("Static regex is valid"));
static XSTR_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]+$").expect("Static regex is valid"));
static ISO_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[T ](\d{2}:\d{2}:\d{2}(?:\.\d+)?)([Zz]|[+-]\d{2}:\d{2})?$")
        .expect("Static regex is valid")
});

pub fn check_tag_name(name: &str) -> Result<()> {
    if TAG_NAME.is_match(name) {
        Ok(())
    } else {
        Err(HaystackError::format("tag name", name))
    }
}

pub fn check_dict_key(key: &str) -> Result<()> {
    if DICT_KEY.is_match(key) {
        Ok(())
    } else {
        Err(HaystackError::format("dict key", key))
    }
}

/// Shortest text that reads back as the same `f64`; integral values keep a trailing `.0`.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

/// `hh:mm:ss`, with microseconds when the time has a fractional part and nanoseconds when
/// microseconds would drop digits.
pub fn format_time(time: &NaiveTime) -> String {
    match time.nanosecond() {
        0 => time.format("%H:%M:%S").to_string(),
        nanos if nanos % 1_000 == 0 => time.format("%H:%M:%S%.6f").to_string(),
        _ => time.format("%H:%M:%S%.9f").to_string(),
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| HaystackError::format("Date", text))
}

pub fn parse_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f").map_err(|_| HaystackError::format("Time", text))
}

/// Numeric payload with an optional unit.
#[derive(Debug, Clone)]
pub struct Number {
    value: f64,
    unit: Option<Unit>,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Number { value, unit: None }
    }

    pub fn with_unit(value: f64, unit: Unit) -> Self {
        Number {
            value,
            unit: Some(unit),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    pub fn to_zinc(&self) -> String {
        if self.value.is_nan() {
            return "NaN".to_string();
        }
        if self.value.is_infinite() {
            return if self.value > 0.0 { "INF" } else { "-INF" }.to_string();
        }
        match &self.unit {
            Some(unit) => format!("{}{}", format_float(self.value), unit.print()),
            None => format_float(self.value),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        let same_value =
            self.value == other.value || (self.value.is_nan() && other.value.is_nan());
        same_value && self.unit == other.unit
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::new(value)
    }
}

/// Entity identifier. The stored id carries its `@` sigil; the display name takes no part in
/// equality.
#[derive(Debug, Clone)]
pub struct Ref {
    id: String,
    dis: Option<String>,
}

impl Ref {
    /// Accepts `@abc` or `abc`.
    pub fn new<S: AsRef<str>>(id: S) -> Result<Ref> {
        let raw = id.as_ref();
        let bare = raw.strip_prefix(REF_SIGIL).unwrap_or(raw);
        if !ID_CHARS.is_match(bare) {
            return Err(HaystackError::format("Ref", raw));
        }
        Ok(Ref {
            id: format!("{REF_SIGIL}{bare}"),
            dis: None,
        })
    }

    pub fn with_dis<S: AsRef<str>, D: Into<String>>(id: S, dis: D) -> Result<Ref> {
        let mut href = Ref::new(id)?;
        href.dis = Some(dis.into());
        Ok(href)
    }

    /// A fresh random identifier.
    pub fn generate() -> Ref {
        Ref {
            id: format!("{REF_SIGIL}{}", Uuid::new_v4()),
            dis: None,
        }
    }

    /// Identifier including the `@` sigil.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier without the sigil.
    pub fn val(&self) -> &str {
        &self.id[REF_SIGIL.len_utf8()..]
    }

    pub fn dis(&self) -> Option<&str> {
        self.dis.as_deref()
    }

    pub fn to_zinc(&self) -> String {
        match &self.dis {
            Some(dis) => format!("{} \"{}\"", self.id, escape_str(dis)),
            None => self.id.clone(),
        }
    }
}

impl PartialEq for Ref {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ref {}

impl Hash for Ref {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq<str> for Ref {
    fn eq(&self, other: &str) -> bool {
        self.id == other || self.val() == other
    }
}

impl PartialEq<&str> for Ref {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Def identifier, written `^name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Accepts `^abc` or `abc`.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Symbol> {
        let raw = value.as_ref();
        let bare = raw.strip_prefix(SYMBOL_SIGIL).unwrap_or(raw);
        if !ID_CHARS.is_match(bare) {
            return Err(HaystackError::format("Symbol", raw));
        }
        Ok(Symbol(format!("{SYMBOL_SIGIL}{bare}")))
    }

    /// Symbol including the `^` sigil.
    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn val(&self) -> &str {
        &self.0[SYMBOL_SIGIL.len_utf8()..]
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other || self.val() == other
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vendor specific value: a type name and its string encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XStr {
    type_name: String,
    value: String,
}

impl XStr {
    pub fn new<T: Into<String>, V: Into<String>>(type_name: T, value: V) -> Result<XStr> {
        let type_name = type_name.into();
        if !XSTR_TYPE.is_match(&type_name) {
            return Err(HaystackError::format("XStr type name", type_name));
        }
        Ok(XStr {
            type_name,
            value: value.into(),
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn to_zinc(&self) -> String {
        format!("{}(\"{}\")", self.type_name, escape_str(&self.value))
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

/// One axis of a coordinate in degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: char,
}

impl Dms {
    fn from_decimal(value: f64, positive: char, negative: char) -> Dms {
        let hemisphere = if value < 0.0 { negative } else { positive };
        let value = value.abs();
        let degrees = value.trunc();
        let minutes = ((value - degrees) * 60.0).trunc();
        let seconds = (value - degrees - minutes / 60.0) * 3600.0;
        Dms {
            degrees: degrees as u32,
            minutes: minutes as u32,
            seconds,
            hemisphere,
        }
    }
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {}' {:.4}\"{}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

impl Coord {
    pub fn new(lat: f64, lng: f64) -> Coord {
        Coord { lat, lng }
    }

    pub fn to_dms(&self) -> (Dms, Dms) {
        (
            Dms::from_decimal(self.lat, 'N', 'S'),
            Dms::from_decimal(self.lng, 'E', 'W'),
        )
    }

    pub fn to_zinc(&self) -> String {
        format!("C({},{})", format_float(self.lat), format_float(self.lng))
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (lat, lng) = self.to_dms();
        write!(f, "Latitude: {lat}, Longitude: {lng}")
    }
}

/// Wall-clock timestamp with an optional UTC offset and an optional named zone.
///
/// When a zone is attached, the offset is always the one the zone prescribes for the wall clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonedDateTime {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
    zone: Option<Tz>,
}

impl ZonedDateTime {
    pub fn naive(local: NaiveDateTime) -> Self {
        ZonedDateTime {
            local,
            offset: None,
            zone: None,
        }
    }

    pub fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> Self {
        ZonedDateTime {
            local,
            offset: Some(offset),
            zone: None,
        }
    }

    /// Anchor a wall clock in a named zone. Ambiguous wall clocks take the earlier instant;
    /// wall clocks skipped by a transition take the offset in force at that UTC instant.
    pub fn in_zone(local: NaiveDateTime, zone: Tz) -> Self {
        let offset = match zone.from_local_datetime(&local).earliest() {
            Some(anchored) => anchored.offset().fix(),
            None => zone.offset_from_utc_datetime(&local).fix(),
        };
        ZonedDateTime {
            local,
            offset: Some(offset),
            zone: Some(zone),
        }
    }

    /// Parse an ISO-8601 stamp (`T` or space separated, optional `Z`/`±hh:mm`). A zone, when
    /// given, replaces whatever offset the stamp carries.
    pub fn parse(stamp: &str, zone: Option<Tz>) -> Result<Self> {
        let caps = ISO_STAMP
            .captures(stamp.trim())
            .ok_or_else(|| HaystackError::format("DateTime", stamp))?;
        let local = NaiveDateTime::new(parse_date(&caps[1])?, parse_time(&caps[2])?);
        if let Some(zone) = zone {
            return Ok(ZonedDateTime::in_zone(local, zone));
        }
        match caps.get(3).map(|m| m.as_str()) {
            None => Ok(ZonedDateTime::naive(local)),
            Some("Z") | Some("z") => Ok(ZonedDateTime::with_offset(
                local,
                FixedOffset::east_opt(0).ok_or_else(|| HaystackError::format("offset", "Z"))?,
            )),
            Some(offset) => {
                let sign = if offset.starts_with('-') { -1 } else { 1 };
                let hours: i32 = offset[1..3]
                    .parse()
                    .map_err(|_| HaystackError::format("offset", offset))?;
                let minutes: i32 = offset[4..6]
                    .parse()
                    .map_err(|_| HaystackError::format("offset", offset))?;
                let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
                    .ok_or_else(|| HaystackError::format("offset", offset))?;
                Ok(ZonedDateTime::with_offset(local, offset))
            }
        }
    }

    pub fn local(&self) -> &NaiveDateTime {
        &self.local
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    pub fn zone(&self) -> Option<Tz> {
        self.zone
    }

    /// Haystack zone name, e.g. `New_York`.
    pub fn city(&self) -> Option<&'static str> {
        self.zone.as_ref().map(city)
    }

    /// `YYYY-MM-DDThh:mm:ss[.ffffff][±hh:mm]`
    pub fn to_iso(&self) -> String {
        let mut iso = format!(
            "{}T{}",
            self.local.date().format("%Y-%m-%d"),
            format_time(&self.local.time())
        );
        if let Some(offset) = self.offset {
            let secs = offset.local_minus_utc();
            let sign = if secs < 0 { '-' } else { '+' };
            let secs = secs.abs();
            iso.push_str(&format!("{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60));
        }
        iso
    }

    pub fn to_zinc(&self) -> String {
        match self.city() {
            Some(city) => format!("{} {}", self.to_iso(), city),
            None => self.to_iso(),
        }
    }
}

/// Escape a string body for the compact text form.
pub fn escape_str(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Reverse of [`escape_str`], also accepting `\uXXXX`.
pub fn unescape_str(body: &str) -> Result<String> {
    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('$') => value.push('$'),
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('u') => {
                let hex = chars.by_ref().take(4).collect::<String>();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| HaystackError::format("unicode escape", format!("\\u{hex}")))?;
                value.push(code);
            }
            other => {
                return Err(HaystackError::format(
                    "escape sequence",
                    format!("\\{}", other.map(String::from).unwrap_or_default()),
                ))
            }
        }
    }
    Ok(value)
}
