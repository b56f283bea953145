// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::registry::Diagram;

use super::api::ApiRelation;
use super::handle::NodeHandle;
use super::ids::{NodeUuid, RelationUuid};
use super::node::{NodeInfo, Point};

pub(crate) fn nid(value: &str) -> NodeUuid {
    NodeUuid::new(value).expect("node uuid")
}

pub(crate) fn rid(value: &str) -> RelationUuid {
    RelationUuid::new(value).expect("relation uuid")
}

pub(crate) fn node(uuid: &str, x: f64, y: f64) -> NodeInfo {
    NodeInfo::new(nid(uuid), "Person", uuid.to_uppercase(), Point::new(x, y))
}

pub(crate) fn api_relation(id: &str, relation_type: &str, from: &str, to: &str) -> ApiRelation {
    ApiRelation::new(rid(id), relation_type, nid(from), nid(to))
}

/// Two placed nodes `a1` and `b1`, no relations.
pub(crate) fn two_nodes() -> (Diagram, NodeHandle, NodeHandle) {
    let mut diagram = Diagram::new();
    let a = diagram.add_node(node("a1", 0.0, 0.0));
    let b = diagram.add_node(node("b1", 200.0, 0.0));
    (diagram, a, b)
}
