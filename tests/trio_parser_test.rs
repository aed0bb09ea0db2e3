//! Trio documents parsed end to end through the public API.

mod common;

use chrono::{FixedOffset, NaiveDate};
use serde_json::json;
use test_log::test;
use trio_core::{
    codec::{json::decode_ontology, Resolver, TrioCodec},
    kinds::{Kind, Ref},
    ontology::{Entity, Ontology},
    HaystackError,
};

fn parse(text: &str) -> Ontology {
    TrioCodec::default().parse(text).unwrap()
}

fn test_entity(ontology: &Ontology) -> &Entity {
    ontology.entity(&Ref::new("@test").unwrap()).unwrap()
}

/// Value of the `test` tag in a one-entity document.
fn test_value(value: &str) -> Kind {
    common::init_logging();
    let ontology = parse(&format!("\nid: @test \"test\"\ntest: {value}\n"));
    assert_eq!(ontology.get(0).unwrap().id(), "@test");
    test_entity(&ontology).kind("test").unwrap().clone()
}

#[test]
fn test_parse_ref() {
    let ontology = parse("\nid: @test \"test\"\ntest: @essais\n");
    let entity = ontology.get(0).unwrap();
    assert_eq!(entity.id(), &Ref::new("@test").unwrap());
    assert_eq!(entity.id().dis(), Some("test"));
    assert_eq!(test_entity(&ontology).kind("test").unwrap(), "@essais");
}

#[test]
fn test_parse_singletons() {
    assert_eq!(test_value("M"), Kind::Marker);
    assert_eq!(test_value("NA"), Kind::NA);
    assert_eq!(test_value("R"), Kind::Remove);
    assert_eq!(test_value("T"), true);
    assert_eq!(test_value("F"), false);
}

#[test]
fn test_parse_numbers() {
    assert_eq!(test_value("23"), 23);
    assert_eq!(test_value("23"), 23.0);
    assert_eq!(test_value("23.1"), 23.1);
    assert_eq!(test_value("-1.5e3"), -1500.0);

    let length = test_value("23.1m");
    assert_eq!(length, 23.1);
    let unit = length.as_number().unwrap().unit().unwrap();
    assert!(unit == "m");
    assert_eq!(unit.canonical(), "meter");
}

#[test]
fn test_parse_special_numbers() {
    assert_eq!(test_value("INF").as_f64(), Some(f64::INFINITY));
    assert_eq!(test_value("-INF").as_f64(), Some(f64::NEG_INFINITY));
    assert!(test_value("NaN").as_f64().unwrap().is_nan());
}

#[test]
fn test_parse_unknown_unit() {
    let err = TrioCodec::default()
        .parse("id: @test\ntest: 23.1mxyz\n")
        .unwrap_err();
    assert_eq!(err, HaystackError::UnitNotFound("mxyz".to_string()));
}

#[test]
fn test_parse_text_kinds() {
    assert_eq!(test_value("\"A long string \""), "A long string ");
    assert_eq!(
        test_value("`http://project-haystack.org/`"),
        Kind::Uri("http://project-haystack.org/".to_string())
    );
    assert_eq!(test_value("^elec-meter"), "^elec-meter");
    assert_eq!(test_value("2020-07-17"), "2020-07-17");
    assert_eq!(test_value("14:30:00"), "14:30:00");
}

#[test]
fn test_parse_datetime() {
    let value = test_value("2020-07-17T16:55:42.977-04:00 New_York ");
    let datetime = value.as_datetime().unwrap();
    assert_eq!(datetime.city(), Some("New_York"));
    assert_eq!(datetime.zone().unwrap().name(), "America/New_York");
    assert_eq!(
        datetime.local(),
        &NaiveDate::from_ymd_opt(2020, 7, 17)
            .unwrap()
            .and_hms_milli_opt(16, 55, 42, 977)
            .unwrap()
    );
    assert_eq!(datetime.offset(), FixedOffset::west_opt(4 * 3600));
    assert_eq!(
        value.to_zinc(),
        "2020-07-17T16:55:42.977000-04:00 New_York"
    );
}

#[test]
fn test_parse_datetime_unknown_zone() {
    let err = TrioCodec::default()
        .parse("id: @test\ntest: 2020-07-17T16:55:42-04:00 Atlantis\n")
        .unwrap_err();
    assert_eq!(err, HaystackError::TimeZoneNotFound("Atlantis".to_string()));
}

#[test]
fn test_parse_coord_and_xstr() {
    let coord = test_value("C(37.5458266,-77.4491888) ");
    let coord = coord.as_coord().unwrap();
    assert_eq!(coord.lat, 37.5458266);
    assert_eq!(coord.lng, -77.4491888);

    let color = test_value("Color(\"red\")");
    let color = color.as_xstr().unwrap();
    assert_eq!(color.type_name(), "Color");
    assert_eq!(color.value(), "red");
}

#[test]
fn test_parse_unquoted_str() {
    let ontology = parse("\nid: @test \"test\"\ntest2:  A long string \n");
    assert_eq!(
        test_entity(&ontology).kind("test2").unwrap(),
        "A long string"
    );
}

#[test]
fn test_parse_marker_without_colon() {
    let ontology = parse("\nid: @test \"test\"\ntest2\n");
    assert!(test_entity(&ontology).kind("test2").unwrap().is_marker());
}

#[test]
fn test_parse_multiline() {
    let ontology = parse(
        "\nid: @test \"test\"\ntest2:\n    bonjour le monde\n    comment allez vous\ntest\n",
    );
    let entity = test_entity(&ontology);
    assert!(entity.kind("test").unwrap().is_marker());
    assert_eq!(
        entity.kind("test2").unwrap(),
        "bonjour le monde\ncomment allez vous\n"
    );
}

#[test]
fn test_parse_entities() {
    let ontology = parse(
        "\nid: @test \"test\"\ntest2:  A long string \n---\nid: @test2 \"test deux\"\nmark\n",
    );
    assert_eq!(ontology.len(), 2);
    assert_eq!(
        test_entity(&ontology).kind("test2").unwrap(),
        "A long string"
    );
    let second = ontology.entity(&Ref::new("@test2").unwrap()).unwrap();
    assert_eq!(second.id().dis(), Some("test deux"));
    assert!(second.kind("mark").unwrap().is_marker());
}

#[test]
fn test_parse_list() {
    let ontology = parse("\nid: @test \"test\"\ntest2: [\"aze\",2,3]\n\n");
    let list = test_entity(&ontology).kind("test2").unwrap().as_list().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0], "aze");
    assert_eq!(list[1], 2);
    assert_eq!(list[2], 3);
}

#[test]
fn test_parse_dict() {
    let ontology = parse("\nid: @test \"test\"\ntest2:{test:\"test\", num:2.3 }\n\n");
    assert_eq!(
        test_entity(&ontology).kind("test2").unwrap().to_json(),
        json!({
            "test": {"_kind": "str", "val": "test"},
            "num": {"_kind": "number", "val": 2.3}
        })
    );
}

#[test]
fn test_id_must_be_ref() {
    let err = TrioCodec::default()
        .parse("site\nid: 42\n")
        .unwrap_err();
    assert_eq!(
        err,
        HaystackError::IdNotRef {
            line: 2,
            column: 5,
            found: "42".to_string(),
        }
    );
}

const ALL_KINDS: &str = r#"id: @site "Main Site"
site
na: NA
rm: R
on: T
off: F
area: 1200m²
temp: 21.5°C
big: 1e20
nan: NaN
inf: INF
ninf: -INF
dis: "Quoted \"text\" with \$ and \\"
uri: `http://example.com/a`
sym: ^elec-meter
date: 2024-02-29
time: 08:15:00.25
ts: 2022-08-03T14:30:00+11:00 Noumea
utc: 2022-08-03T14:30:00Z
geo: C(37.5458266,-77.4491888)
color: Color("red")
tags: ["aze", 2, M, [1, 2], {nested}]
meta: {num: 2.3, label: "x", flag}
notes:
  first line
  second line
---
id: @ahu
ahu
siteRef: @site
---
kwh: 12kWh
"#;

#[test]
fn test_written_text_reparses_to_equal_ontology() {
    common::init_logging();
    let codec = TrioCodec::default();
    let ontology = codec.parse(ALL_KINDS).unwrap();
    assert_eq!(ontology.len(), 3);

    let written = codec.to_zinc(&ontology);
    let reparsed = codec.parse(&written).unwrap();
    assert_eq!(reparsed, ontology);
    assert_eq!(codec.to_zinc(&reparsed), written);
}

#[test]
fn test_structured_form_decodes_to_equal_ontology() {
    let ontology = TrioCodec::default().parse(ALL_KINDS).unwrap();
    let resolver = Resolver::default();

    let decoded = decode_ontology(&ontology.to_json(), &resolver).unwrap();
    assert_eq!(decoded, ontology);

    let from_grid = decode_ontology(&ontology.grid().to_json(), &resolver).unwrap();
    assert_eq!(from_grid, ontology);
}
