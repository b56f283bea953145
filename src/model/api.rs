// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend records as the repository collaborator hands them to the core.

use super::ids::{NodeUuid, RelationUuid};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiNode {
    pub node_id: NodeUuid,
    pub name: String,
    pub label: String,
}

impl ApiNode {
    pub fn new(node_id: NodeUuid, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_id,
            name: name.into(),
            label: label.into(),
        }
    }
}

/// A directed relation `from -> to` as stored in the graph database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRelation {
    pub relation_id: RelationUuid,
    pub relation_type: String,
    pub from: NodeUuid,
    pub to: NodeUuid,
}

impl ApiRelation {
    pub fn new(
        relation_id: RelationUuid,
        relation_type: impl Into<String>,
        from: NodeUuid,
        to: NodeUuid,
    ) -> Self {
        Self {
            relation_id,
            relation_type: relation_type.into(),
            from,
            to,
        }
    }

    pub fn touches(&self, uuid: &NodeUuid) -> bool {
        &self.from == uuid || &self.to == uuid
    }
}
