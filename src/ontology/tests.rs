//! Tests for the tag graph and its projections

use super::*;
use crate::{
    kinds::{Dict, Kind, Number, Ref},
    HaystackError,
};
use serde_json::json;
use test_log::test;

fn href(id: &str) -> Ref {
    Ref::new(id).unwrap()
}

fn aze_ontology() -> Ontology {
    Ontology::from_entities(
        ["@aze", "@aze2", "@aze3", "@aze4"]
            .into_iter()
            .map(|id| Entity::new(href(id))),
    )
    .unwrap()
}

fn tagged(id: &str, dis: &str, tags: Vec<(&str, Kind)>) -> Entity {
    Entity::with_tags(
        Ref::with_dis(id, dis).unwrap(),
        tags.into_iter()
            .map(|(name, kind)| Tag::new(name, kind).unwrap()),
    )
    .unwrap()
}

#[test]
fn test_tag_name_validation() {
    let tag = Tag::new("test", Kind::NA).unwrap();
    assert_eq!(tag.name(), "test");
    assert_eq!(
        Tag::new("Test", Kind::NA).unwrap_err(),
        HaystackError::format("tag name", "Test")
    );
    let number = Tag::new("test", Kind::from(34.3)).unwrap();
    assert!(*number.kind() == 34.3);
}

#[test]
fn test_entity_rejects_duplicate_tag() {
    let mut entity = Entity::new(Ref::with_dis("@ret", "Test").unwrap());
    entity.push(Tag::new("test", Kind::NA).unwrap()).unwrap();
    let err = entity.push(Tag::new("test", Kind::Marker).unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "Tag with name test already in entity @ret");
    assert_eq!(err.class(), crate::ErrorClass::Integrity);
    assert_eq!(entity.len(), 1);
}

#[test]
fn test_entity_id_is_reserved() {
    let mut entity = Entity::new(href("@ret"));
    let err = entity
        .push(Tag::new("id", Kind::Ref(href("@other"))).unwrap())
        .unwrap_err();
    assert_eq!(err, HaystackError::ReservedTag("id".to_string()));
}

#[test]
fn test_entity_default_id_is_random() {
    let a = Entity::default();
    let b = Entity::default();
    assert_ne!(a.id(), b.id());
    assert!(a.id().id().starts_with('@'));
}

#[test]
fn test_entity_lookup_by_name() {
    let entity = Entity::with_tags(
        href("@ret"),
        [
            Tag::new("test", Kind::NA).unwrap(),
            Tag::marker("test2").unwrap(),
        ],
    )
    .unwrap();
    assert_eq!(entity.tag("test2").unwrap(), &Tag::marker("test2").unwrap());
    assert_eq!(entity.kind("test").unwrap(), &Kind::NA);
    assert_eq!(entity.position("test2"), Some(1));
    assert_eq!(
        entity.tag("missing").unwrap_err(),
        HaystackError::TagNotFound {
            tag: "missing".to_string(),
            entity: "@ret".to_string()
        }
    );
}

#[test]
fn test_entity_replace_keeps_name() {
    let mut entity = Entity::with_tags(href("@ret"), [Tag::new("test", Kind::NA).unwrap()]).unwrap();

    let previous = entity.replace(0, Tag::marker("test").unwrap()).unwrap();
    assert_eq!(previous.kind(), &Kind::NA);
    assert!(entity.get(0).unwrap().kind().is_marker());

    let err = entity.replace(0, Tag::marker("test1").unwrap()).unwrap_err();
    assert!(matches!(err, HaystackError::TagRename { .. }));

    let err = entity
        .replace_by_name("test", Tag::new("test1", Kind::NA).unwrap())
        .unwrap_err();
    assert!(matches!(err, HaystackError::TagRename { .. }));

    entity
        .replace_by_name("test", Tag::new("test", Kind::from(1.0)).unwrap())
        .unwrap();
    assert!(*entity.kind("test").unwrap() == 1.0);

    assert!(matches!(
        entity.replace(4, Tag::marker("test").unwrap()),
        Err(HaystackError::IndexOutOfBounds { index: 4, len: 1 })
    ));
}

#[test]
fn test_entity_remove() {
    let mut entity = Entity::with_tags(
        href("@ret"),
        [
            Tag::new("test", Kind::NA).unwrap(),
            Tag::marker("test1").unwrap(),
            Tag::marker("test2").unwrap(),
        ],
    )
    .unwrap();
    entity.remove_by_name("test1").unwrap();
    assert!(entity.tag("test1").is_err());

    let removed = entity.remove(1).unwrap();
    assert_eq!(removed.name(), "test2");
    assert_eq!(entity.len(), 1);
    assert!(entity.remove(3).is_err());
}

#[test]
fn test_ontology_lookup_by_ref() {
    let ontology = aze_ontology();
    assert_eq!(ontology.len(), 4);
    assert_eq!(ontology.entity(&href("@aze2")).unwrap().id(), "@aze2");
    assert_eq!(ontology.get(0).unwrap().id(), "@aze");
    assert_eq!(
        ontology.entity(&href("@missing")).unwrap_err(),
        HaystackError::EntityNotFound("@missing".to_string())
    );
}

#[test]
fn test_ontology_rejects_duplicate_id() {
    let mut ontology = aze_ontology();
    let err = ontology.push(Entity::new(href("@aze3"))).unwrap_err();
    assert_eq!(err.to_string(), "Entity with ref @aze3 already in ontology");

    let entities = ["@aze", "@aze3", "@aze3"]
        .into_iter()
        .map(|id| Entity::new(href(id)));
    assert_eq!(
        Ontology::from_entities(entities).unwrap_err(),
        HaystackError::DuplicateEntity("@aze3".to_string())
    );
}

#[test]
fn test_ontology_slice() {
    let ontology = aze_ontology();
    let sliced = ontology.slice(2..4).unwrap();
    assert_eq!(sliced.len(), 2);
    assert_eq!(sliced.get(0).unwrap().id(), "@aze3");
    assert!(matches!(
        sliced.entity(&href("@aze")),
        Err(HaystackError::EntityNotFound(_))
    ));
    assert!(ontology.slice(3..9).is_err());
}

#[test]
fn test_ontology_replace_and_remove() {
    let mut ontology = aze_ontology();
    let replacement =
        Entity::with_tags(href("@aze4"), [Tag::marker("site").unwrap()]).unwrap();
    ontology.replace(&href("@aze4"), replacement.clone()).unwrap();
    assert_eq!(ontology.entity(&href("@aze4")).unwrap(), &replacement);

    let err = ontology
        .replace(&href("@aze4"), Entity::new(href("@aze")))
        .unwrap_err();
    assert_eq!(err, HaystackError::DuplicateEntity("@aze".to_string()));
    assert!(ontology.set(0, Entity::new(href("@aze2"))).is_err());
    ontology.set(0, Entity::new(href("@fresh"))).unwrap();
    assert!(ontology.contains(&href("@fresh")));

    ontology.remove(&href("@aze2")).unwrap();
    assert!(ontology.entity(&href("@aze2")).is_err());
    assert!(ontology.remove(&href("@aze2")).is_err());
    ontology.remove_at(0).unwrap();
    assert_eq!(ontology.len(), 2);
}

#[test]
fn test_entity_mut_edits_in_place() {
    let mut ontology = aze_ontology();
    ontology
        .entity_mut(&href("@aze"))
        .unwrap()
        .push(Tag::marker("equip").unwrap())
        .unwrap();
    assert!(ontology.entity(&href("@aze")).unwrap().contains("equip"));
    ontology.get_mut(1).unwrap().push(Tag::marker("point").unwrap()).unwrap();
    assert!(ontology.get(1).unwrap().contains("point"));
}

#[test]
fn test_ids_stay_unique_after_edits() {
    let mut ontology = aze_ontology();
    let taken = Entity::with_tags(href("@aze"), [Tag::marker("site").unwrap()]).unwrap();
    assert_eq!(
        ontology.replace(&href("@aze2"), taken.clone()).unwrap_err(),
        HaystackError::DuplicateEntity("@aze".to_string())
    );
    assert!(ontology.set(1, taken).is_err());
    ontology
        .entity_mut(&href("@aze2"))
        .unwrap()
        .push(Tag::marker("site").unwrap())
        .unwrap();
    ontology.replace(&href("@aze3"), Entity::new(href("@aze5"))).unwrap();

    let codec = crate::codec::TrioCodec::default();
    let reparsed = codec.parse(&ontology.to_zinc()).unwrap();
    assert_eq!(reparsed, ontology);
}

#[test]
fn test_trio_dump_one_entity() {
    let entity = tagged(
        "@entity1",
        "Entity  name",
        vec![("number1", Kind::from(43.0)), ("str1", Kind::from("String 1"))],
    );
    let ontology = Ontology::from_entities([entity]).unwrap();
    assert_eq!(
        ontology.to_zinc(),
        "id:@entity1 \"Entity  name\"\nnumber1:43.0\nstr1:\"String 1\"\n"
    );
}

#[test]
fn test_trio_dump_separates_entities() {
    let ontology = Ontology::from_entities([
        tagged(
            "@entity1",
            "Entity1  name",
            vec![("number1", Kind::from(1.0)), ("str1", Kind::from("String$ 1"))],
        ),
        tagged(
            "@entity2",
            "Entity2  name",
            vec![("marker3", Kind::Marker), ("na3", Kind::NA)],
        ),
    ])
    .unwrap();
    assert_eq!(
        ontology.to_zinc(),
        "id:@entity1 \"Entity1  name\"\nnumber1:1.0\nstr1:\"String\\$ 1\"\n---\nid:@entity2 \"Entity2  name\"\nmarker3:M\nna3:NA\n"
    );
}

#[test]
fn test_entity_json() {
    let entity = tagged("@e", "E", vec![("site", Kind::Marker), ("area", Kind::from(2.5))]);
    assert_eq!(
        entity.to_json(),
        json!({
            "id": {"_kind": "ref", "val": "e", "dis": "E"},
            "site": {"_kind": "marker"},
            "area": {"_kind": "number", "val": 2.5},
        })
    );
}

fn grid_ontology() -> Ontology {
    let dict = Dict::from_entries([("xs", Kind::from(1.0)), ("ys", Kind::from("4.0"))]).unwrap();
    Ontology::from_entities([
        tagged(
            "@entity1",
            "Entity1  name",
            vec![("number1", Kind::from(1.0)), ("str1", Kind::from("String$ 1"))],
        ),
        tagged(
            "@entity2",
            "Entity2  name",
            vec![
                ("number2", Kind::from(2.0)),
                ("str2", Kind::from("String$ 2")),
                (
                    "list3",
                    Kind::from(vec![Kind::from(1.0), Kind::from("two"), Kind::from(3.0)]),
                ),
                ("dict3", Kind::from(dict)),
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_grid_columns_and_cells() {
    let grid = grid_ontology().grid();
    assert_eq!(
        grid.columns(),
        ["id", "number1", "str1", "number2", "str2", "list3", "dict3"]
    );
    assert_eq!(grid.rows().len(), 2);
    assert!(grid.rows().iter().all(|row| row.len() == 7));
    assert_eq!(grid.cell(0, "str2"), None);
    assert!(*grid.cell(1, "number2").unwrap() == 2.0);
    assert!(*grid.cell(0, "id").unwrap() == "@entity1");
    assert_eq!(grid.cell(5, "id"), None);
}

#[test]
fn test_grid_zinc() {
    let grid = grid_ontology().grid();
    assert_eq!(
        grid.to_zinc(),
        "ver:\"3.0\"\n\
         id, number1, str1, number2, str2, list3, dict3\n\
         @entity1 \"Entity1  name\", 1.0, \"String\\$ 1\"\n\
         @entity2 \"Entity2  name\", , , 2.0, \"String\\$ 2\", [1.0, \"two\", 3.0], {xs:1.0, ys:\"4.0\"}\n"
    );
}

#[test]
fn test_grid_json() {
    let ontology = Ontology::from_entities([
        tagged("@a", "A", vec![("site", Kind::Marker)]),
        tagged("@b", "B", vec![("area", Kind::from(Number::new(3.0)))]),
    ])
    .unwrap();
    assert_eq!(
        ontology.grid().to_json(),
        json!({
            "_kind": "grid",
            "meta": {"ver": "3.0"},
            "cols": [{"name": "id"}, {"name": "site"}, {"name": "area"}],
            "rows": [
                {"id": {"_kind": "ref", "val": "a", "dis": "A"}, "site": {"_kind": "marker"}},
                {"id": {"_kind": "ref", "val": "b", "dis": "B"}, "area": {"_kind": "number", "val": 3.0}},
            ],
        })
    );
}
