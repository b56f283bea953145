// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic diagram fixtures (no RNG).

use relgraph::model::{
    ApiRelation, NodeHandle, NodeInfo, NodeUuid, Point, RelationModeType, RelationUuid,
};
use relgraph::registry::Diagram;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }

    fn node_count(self) -> usize {
        match self {
            Self::Small => 60,
            Self::Medium => 600,
        }
    }
}

pub fn node_uuid(i: usize) -> NodeUuid {
    NodeUuid::new(format!("n{i}")).expect("node uuid")
}

pub fn relation_uuid(i: usize) -> RelationUuid {
    RelationUuid::new(format!("r{i}")).expect("relation uuid")
}

pub fn node_info(i: usize) -> NodeInfo {
    let x = (i % 20) as f64 * 180.0;
    let y = (i / 20) as f64 * 120.0;
    NodeInfo::new(node_uuid(i), "Entity", format!("Node {i}"), Point::new(x, y))
}

/// Backend relations: a ring plus a chord every seventh node.
pub fn backend_relations(case: Case) -> Vec<ApiRelation> {
    let n = case.node_count();
    let mut relations = Vec::with_capacity(n * 2);
    for i in 0..n {
        relations.push(ApiRelation::new(
            relation_uuid(i),
            "NEXT",
            node_uuid(i),
            node_uuid((i + 1) % n),
        ));
        if i % 7 == 0 {
            relations.push(ApiRelation::new(
                relation_uuid(n + i),
                "CHORD",
                node_uuid(i),
                node_uuid((i + n / 2) % n),
            ));
        }
    }
    relations
}

/// Every node placed once, every tenth node twice, and half of the ring drawn.
pub fn diagram(case: Case) -> Diagram {
    let n = case.node_count();
    let mut diagram = Diagram::new();
    let mut handles: Vec<NodeHandle> = Vec::with_capacity(n);
    for i in 0..n {
        handles.push(diagram.add_node(node_info(i)));
        if i % 10 == 0 {
            diagram.add_node(node_info(i));
        }
    }
    for i in (0..n).step_by(2) {
        diagram.add_relation(
            handles[i],
            handles[(i + 1) % n],
            Some(relation_uuid(i)),
            "NEXT",
            RelationModeType::Normal,
        );
    }
    diagram
}
