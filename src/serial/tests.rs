// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use crate::model::fixtures::{nid, node, rid, two_nodes};
use crate::model::{
    HeatConfig, LinkEnd, NodeReference, NodeStyle, Point, RelationModeType, Size,
};
use crate::registry::Diagram;

use super::{from_json, graph_schema, to_json, SerialError, SerializableGraph};

fn sample() -> Diagram {
    let (mut diagram, a, b) = two_nodes();
    let copy = diagram.add_node(node("a1", 0.0, 300.0));
    diagram
        .node_mut(a)
        .expect("node")
        .set_style(NodeStyle {
            shape: "ellipse".to_owned(),
            color: Some("#00ff00".to_owned()),
        });
    diagram.node_mut(b).expect("node").set_size(Size::new(120.0, 60.0));

    let normal = diagram
        .add_relation(a, b, Some(rid("r1")), "KNOWS", RelationModeType::Normal)
        .expect("normal");
    diagram
        .relation_mut(normal)
        .expect("relation")
        .info_mut()
        .set_vertices(vec![Point::new(100.0, 50.0)]);
    diagram
        .add_relation(copy, b, None, "LIKES", RelationModeType::Visual)
        .expect("visual");
    diagram
        .add_relation(b, a, Some(rid("r2")), "KNOWS", RelationModeType::Faint)
        .expect("faint");
    diagram.set_heat_config(HeatConfig::Linear {
        label: "Person".to_owned(),
        attribute: "age".to_owned(),
        min: 0.0,
        max: 100.0,
    });
    diagram
}

#[test]
fn round_trip_keeps_nodes_and_savable_relations() {
    let diagram = sample();
    let json = to_json(&diagram).expect("serialize");
    let loaded = from_json(&json).expect("deserialize");

    assert_eq!(loaded.nodes().len(), 3);
    let original_nodes = diagram.nodes().iter().map(|(_, n)| n.clone()).collect::<Vec<_>>();
    let loaded_nodes = loaded.nodes().iter().map(|(_, n)| n.clone()).collect::<Vec<_>>();
    assert_eq!(loaded_nodes, original_nodes);

    // faint suggestions are not saved, the visual relation comes back as normal
    assert_eq!(loaded.relations().len(), 2);
    assert_eq!(loaded.relations().normal_relations().len(), 2);

    let r1 = loaded
        .relations()
        .iter()
        .find(|(_, relation)| relation.uuid() == Some(&rid("r1")))
        .map(|(_, relation)| relation.clone())
        .expect("r1");
    assert_eq!(r1.info().vertices(), &[Point::new(100.0, 50.0)]);
    assert_eq!(r1.info().from(), &NodeReference::new(nid("a1"), 0));

    let likes = loaded
        .relations()
        .iter()
        .find(|(_, relation)| relation.uuid().is_none())
        .map(|(_, relation)| relation.clone())
        .expect("visual relation");
    assert_eq!(likes.info().from(), &NodeReference::new(nid("a1"), 1));
    assert_eq!(likes.info().label(), "LIKES");

    assert_eq!(loaded.heat_configs(), diagram.heat_configs());
    assert!(loaded.broken_relations().is_empty());
}

#[test]
fn serialized_shape_uses_ref_and_camel_case_keys() {
    let diagram = sample();
    let value: serde_json::Value =
        serde_json::from_str(&to_json(&diagram).expect("serialize")).expect("json");

    assert_eq!(value["nodes"][0]["ref"], json!({"uuid": "a1", "index": 0}));
    assert_eq!(value["nodes"][0]["shape"], "ellipse");
    assert_eq!(value["nodes"][0]["color"], "#00ff00");
    assert!(value["relations"][0].get("anchors").is_none());
    assert_eq!(value["heatConfigs"]["Person-age"]["type"], "linear");
}

#[rstest]
#[case::empty("")]
#[case::blank("  \n")]
#[case::empty_object("{}")]
#[case::empty_lists(r#"{"nodes": [], "relations": []}"#)]
fn empty_input_is_an_empty_diagram(#[case] input: &str) {
    let diagram = from_json(input).expect("empty diagram");
    assert!(diagram.is_empty());
}

#[test]
fn missing_size_loads_as_unset() {
    let input = json!({
        "nodes": [{"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A", "x": 5, "y": 7}],
        "relations": []
    })
    .to_string();
    let diagram = from_json(&input).expect("diagram");
    let (_, info) = diagram.nodes().iter().next().expect("node");

    assert_eq!(info.size(), Size::UNSET);
    assert_eq!(info.shape(), "rectangle");
    assert_eq!(info.position(), Point::new(5.0, 7.0));
}

#[test]
fn missing_z_stacks_on_top_in_load_order() {
    let input = json!({
        "nodes": [
            {"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A"},
            {"label": "Person", "ref": {"uuid": "b1", "index": 0}, "name": "B", "z": 10},
            {"label": "Person", "ref": {"uuid": "c1", "index": 0}, "name": "C"}
        ],
        "relations": [
            {"uuid": "r1", "label": "KNOWS", "from": {"uuid": "a1", "index": 0}, "to": {"uuid": "c1", "index": 0}}
        ]
    })
    .to_string();
    let diagram = from_json(&input).expect("diagram");
    let z_of = |uuid: &str| {
        let handle = diagram.nodes().get_by_uuid(&nid(uuid))[0];
        diagram.node(handle).expect("node").z()
    };

    assert_eq!(z_of("a1"), 1);
    assert_eq!(z_of("b1"), 10);
    assert_eq!(z_of("c1"), 11);
    let (_, relation) = diagram.relations().iter().next().expect("relation");
    assert_eq!(relation.z(), 12);
}

#[test]
fn relation_with_missing_endpoint_is_dropped() {
    let input = json!({
        "nodes": [
            {"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A"},
            {"label": "Person", "ref": {"uuid": "b1", "index": 3}, "name": "B"}
        ],
        "relations": [
            {"uuid": "r1", "label": "KNOWS", "from": {"uuid": "a1", "index": 0}, "to": {"uuid": "b1", "index": 3}},
            {"uuid": "r2", "label": "KNOWS", "from": {"uuid": "a1", "index": 0}, "to": {"uuid": "zz", "index": 0}}
        ]
    })
    .to_string();
    let diagram = from_json(&input).expect("diagram");

    assert_eq!(diagram.relations().len(), 1);
    let (_, relation) = diagram.relations().iter().next().expect("relation");
    assert_eq!(relation.info().to(), &NodeReference::new(nid("b1"), 3));
    assert!(diagram.broken_relations().is_empty());
}

#[test]
fn relation_label_accepts_name_alias() {
    let input = json!({
        "nodes": [{"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A"}],
        "relations": [{"name": "SELF", "from": {"uuid": "a1", "index": 0}, "to": {"uuid": "a1", "index": 0}}]
    })
    .to_string();
    let diagram = from_json(&input).expect("diagram");
    let (_, relation) = diagram.relations().iter().next().expect("relation");

    assert_eq!(relation.info().label(), "SELF");
    assert_eq!(relation.end(LinkEnd::Source), relation.end(LinkEnd::Target));
}

#[test]
fn duplicate_references_get_fresh_indices() {
    let input = json!({
        "nodes": [
            {"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A"},
            {"label": "Person", "ref": {"uuid": "a1", "index": 0}, "name": "A"}
        ]
    })
    .to_string();
    let diagram = from_json(&input).expect("diagram");
    let mut indices = diagram
        .nodes()
        .iter()
        .map(|(_, info)| info.reference().index())
        .collect::<Vec<_>>();
    indices.sort_unstable();

    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn malformed_json_is_an_error() {
    let err = from_json("{\"nodes\": 3}").expect_err("malformed");
    assert!(matches!(err, SerialError::Json { .. }));
}

#[test]
fn invalid_node_uuid_is_an_error() {
    let input = json!({
        "nodes": [{"label": "Person", "ref": {"uuid": "a/1", "index": 0}, "name": "A"}]
    })
    .to_string();
    let err = from_json(&input).expect_err("invalid id");
    assert!(matches!(err, SerialError::InvalidId { value, .. } if value == "a/1"));
}

#[test]
fn enum_heat_config_survives_reload() {
    let mut diagram = Diagram::new();
    let config = HeatConfig::Enum {
        label: "Person".to_owned(),
        attribute: "team".to_owned(),
        values: vec!["red".to_owned(), "blue".to_owned()],
    };
    diagram.set_heat_config(config.clone());

    let loaded = from_json(&to_json(&diagram).expect("serialize")).expect("deserialize");
    assert_eq!(loaded.heat_configs().get("Person-team"), Some(&config));
}

#[test]
fn schema_describes_the_graph() {
    let schema = graph_schema();
    assert!(schema["properties"].get("heatConfigs").is_some());
    assert!(serde_json::from_value::<SerializableGraph>(json!({})).is_ok());
}
