// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::Mutex;

use super::{GraphRepository, RepositoryError};
use crate::model::{ApiNode, ApiRelation, DiagramId, NodeUuid};

#[derive(Debug, Default)]
struct Persisted {
    diagrams: BTreeMap<DiagramId, String>,
    writes: usize,
}

/// Backend held in memory, with switches to make individual lookups fail.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    nodes: BTreeMap<NodeUuid, ApiNode>,
    relations: Vec<ApiRelation>,
    failing_relations: BTreeSet<NodeUuid>,
    fail_persist: bool,
    persisted: Mutex<Persisted>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: ApiNode) -> Self {
        self.nodes.insert(node.node_id.clone(), node);
        self
    }

    pub fn with_relation(mut self, relation: ApiRelation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Make `fetch_relations_of_node(uuid)` fail.
    pub fn fail_relations_of(mut self, uuid: NodeUuid) -> Self {
        self.failing_relations.insert(uuid);
        self
    }

    pub fn fail_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    pub async fn persisted(&self, diagram_id: &DiagramId) -> Option<String> {
        self.persisted.lock().await.diagrams.get(diagram_id).cloned()
    }

    pub async fn persist_count(&self) -> usize {
        self.persisted.lock().await.writes
    }
}

impl GraphRepository for InMemoryRepository {
    async fn fetch_node(&self, uuid: &NodeUuid) -> Result<Option<ApiNode>, RepositoryError> {
        Ok(self.nodes.get(uuid).cloned())
    }

    async fn fetch_relations_of_node(
        &self,
        uuid: &NodeUuid,
    ) -> Result<Vec<ApiRelation>, RepositoryError> {
        if self.failing_relations.contains(uuid) {
            return Err(RepositoryError::RelationsUnavailable {
                uuid: uuid.clone(),
                reason: "injected failure".to_owned(),
            });
        }
        Ok(self
            .relations
            .iter()
            .filter(|relation| relation.touches(uuid))
            .cloned()
            .collect())
    }

    async fn persist_diagram(
        &self,
        diagram_id: &DiagramId,
        json: String,
    ) -> Result<(), RepositoryError> {
        if self.fail_persist {
            return Err(RepositoryError::Unavailable("persist disabled".to_owned()));
        }
        let mut persisted = self.persisted.lock().await;
        persisted.diagrams.insert(diagram_id.clone(), json);
        persisted.writes += 1;
        Ok(())
    }
}
