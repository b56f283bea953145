// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use crate::model::fixtures::{nid, node, rid, two_nodes};
use crate::model::{NodeReference, RelationModeType};

use super::Diagram;

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn repeated_uuid_gets_monotonic_distinct_indices(#[case] copies: u32) {
    let mut diagram = Diagram::new();
    let handles = (0..copies)
        .map(|i| diagram.add_node(node("x", f64::from(i) * 10.0, 0.0)))
        .collect::<Vec<_>>();

    let indices = handles
        .iter()
        .map(|handle| diagram.node(*handle).expect("node").reference().index())
        .collect::<Vec<_>>();
    assert_eq!(indices, (0..copies).collect::<Vec<_>>());
    assert_eq!(diagram.nodes().get_by_uuid(&nid("x")).as_slice(), handles.as_slice());
}

#[test]
fn index_continues_after_highest_even_when_lower_copy_removed() {
    let mut diagram = Diagram::new();
    let first = diagram.add_node(node("x", 0.0, 0.0));
    let second = diagram.add_node(node("x", 10.0, 0.0));
    diagram.remove_node(first).expect("remove");

    let third = diagram.add_node(node("x", 20.0, 0.0));
    assert_eq!(diagram.node(second).expect("second").reference().index(), 1);
    assert_eq!(diagram.node(third).expect("third").reference().index(), 2);
}

#[test]
fn get_by_reference_finds_the_exact_copy() {
    let mut diagram = Diagram::new();
    let first = diagram.add_node(node("x", 0.0, 0.0));
    let second = diagram.add_node(node("x", 10.0, 0.0));

    assert_eq!(diagram.nodes().get_by_reference(&nid("x"), 0), Some(first));
    assert_eq!(diagram.nodes().get_by_reference(&nid("x"), 1), Some(second));
    assert_eq!(diagram.nodes().get_by_reference(&nid("x"), 2), None);
    assert_eq!(diagram.nodes().get_by_reference(&nid("y"), 0), None);
}

#[test]
fn removing_a_node_cascades_to_every_incident_relation() {
    let (mut diagram, a, b) = two_nodes();
    let c = diagram.add_node(node("c1", 0.0, 200.0));
    let ab = diagram
        .add_relation(a, b, Some(rid("r-ab")), "KNOWS", RelationModeType::Normal)
        .expect("ab");
    let ba = diagram
        .add_relation(b, a, None, "LIKES", RelationModeType::Visual)
        .expect("ba");
    let bc = diagram
        .add_relation(b, c, Some(rid("r-bc")), "KNOWS", RelationModeType::Faint)
        .expect("bc");
    let aa = diagram
        .add_relation(a, a, None, "SELF", RelationModeType::Normal)
        .expect("aa");

    let removed = diagram.remove_node(a).expect("remove a");

    assert_eq!(removed.handle, a);
    let mut cascaded = removed.relations.iter().map(|(h, _)| *h).collect::<Vec<_>>();
    cascaded.sort();
    assert_eq!(cascaded, vec![ab, ba, aa]);
    assert!(!diagram.relations().contains(ab));
    assert!(!diagram.relations().contains(ba));
    assert!(!diagram.relations().contains(aa));
    assert!(diagram.relations().contains(bc));
    assert!(diagram.broken_relations().is_empty());
}

#[test]
fn removing_one_copy_leaves_the_other_copy_and_its_relations() {
    let mut diagram = Diagram::new();
    let x0 = diagram.add_node(node("x", 0.0, 0.0));
    let x1 = diagram.add_node(node("x", 100.0, 0.0));
    let y = diagram.add_node(node("y", 0.0, 100.0));
    let from_x0 = diagram
        .add_relation(x0, y, None, "A", RelationModeType::Normal)
        .expect("x0 -> y");
    let from_x1 = diagram
        .add_relation(x1, y, None, "A", RelationModeType::Normal)
        .expect("x1 -> y");

    diagram.remove_node(x0).expect("remove x0");

    let remaining = diagram.node(x1).expect("x1 remains");
    assert_eq!(remaining.reference(), &NodeReference::new(nid("x"), 1));
    assert!(!diagram.relations().contains(from_x0));
    assert!(diagram.relations().contains(from_x1));
}

#[test]
fn restore_node_brings_back_node_and_relations_under_same_handles() {
    let (mut diagram, a, b) = two_nodes();
    let ab = diagram
        .add_relation(a, b, Some(rid("r1")), "KNOWS", RelationModeType::Normal)
        .expect("ab");
    let before_node = diagram.node(a).cloned();
    let before_relation = diagram.relation(ab).cloned();

    let removed = diagram.remove_node(a).expect("remove");
    assert!(diagram.restore_node(removed));

    assert_eq!(diagram.node(a).cloned(), before_node);
    assert_eq!(diagram.relation(ab).cloned(), before_relation);
}

#[test]
fn restore_refuses_a_reference_that_was_taken_meanwhile() {
    let mut diagram = Diagram::new();
    let x0 = diagram.add_node(node("x", 0.0, 0.0));
    let removed = diagram.remove_node(x0).expect("remove");

    let replacement = diagram.add_node(node("x", 5.0, 5.0));
    assert_eq!(diagram.node(replacement).expect("node").reference().index(), 0);

    assert!(!diagram.restore_node(removed));
    assert_eq!(diagram.nodes().len(), 1);
}

#[test]
fn add_relation_requires_both_nodes() {
    let (mut diagram, a, b) = two_nodes();
    diagram.remove_node(b).expect("remove b");
    assert!(diagram
        .add_relation(a, b, None, "KNOWS", RelationModeType::Normal)
        .is_none());
    assert!(diagram.relations().is_empty());
}

#[test]
fn mode_filters_and_savable_relations() {
    let (mut diagram, a, b) = two_nodes();
    let normal = diagram
        .add_relation(a, b, Some(rid("n")), "N", RelationModeType::Normal)
        .expect("normal");
    let faint = diagram
        .add_relation(a, b, Some(rid("f")), "F", RelationModeType::Faint)
        .expect("faint");
    let visual = diagram
        .add_relation(b, a, None, "V", RelationModeType::Visual)
        .expect("visual");

    assert_eq!(diagram.relations().normal_relations(), vec![normal]);
    assert_eq!(diagram.relations().faint_relations(), vec![faint]);
    assert_eq!(diagram.relations().visual_relations(), vec![visual]);

    let savable = diagram
        .relations()
        .savable_relations()
        .map(|(handle, _)| handle)
        .collect::<Vec<_>>();
    assert_eq!(savable, vec![normal, visual]);
}

#[test]
fn new_shapes_stack_on_top() {
    let (mut diagram, a, b) = two_nodes();
    let relation = diagram
        .add_relation(a, b, None, "KNOWS", RelationModeType::Normal)
        .expect("relation");
    let za = diagram.node(a).expect("a").z();
    let zb = diagram.node(b).expect("b").z();
    let zr = diagram.relation(relation).expect("relation").z();
    assert!(za < zb && zb < zr);
}
