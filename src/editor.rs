// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session for one stored diagram.
//!
//! Every applied command is followed by a save through the repository. Save failures at that
//! point are logged and do not undo the edit; [`Editor::persist`] reports them instead.

use crate::commands::{Command, CreateNode, EnableDbRelation};
use crate::graph::{EventOutcome, GraphHandler, InputEvent};
use crate::model::{DiagramId, HeatConfig, NodeHandle, NodeInfo, NodeUuid, Point};
use crate::relation_mode::{DisableReport, ReconcileReport};
use crate::repository::{fetch_all_settled, GraphRepository, RepositoryError};
use crate::serial::SerialError;
use crate::store::{DiagramFolder, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("node {0} is not known to the backend")]
    NodeNotFound(NodeUuid),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Serial(#[from] SerialError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct Editor<R> {
    repository: R,
    diagram_id: DiagramId,
    graph: GraphHandler,
}

impl Editor<DiagramFolder> {
    /// Open a diagram stored in `folder`; a diagram never saved before starts empty.
    pub fn open(folder: DiagramFolder, diagram_id: DiagramId) -> Result<Self, EditorError> {
        let json = folder.load_diagram(&diagram_id)?;
        let graph = GraphHandler::from_json(&json)?;
        tracing::debug!(
            diagram = %diagram_id,
            nodes = graph.diagram().nodes().len(),
            relations = graph.diagram().relations().len(),
            "diagram opened"
        );
        Ok(Self::new(folder, diagram_id, graph))
    }
}

impl<R: GraphRepository> Editor<R> {
    pub fn new(repository: R, diagram_id: DiagramId, graph: GraphHandler) -> Self {
        Self {
            repository,
            diagram_id,
            graph,
        }
    }

    pub fn diagram_id(&self) -> &DiagramId {
        &self.diagram_id
    }

    pub fn graph(&self) -> &GraphHandler {
        &self.graph
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn dispatch_command(&mut self, command: impl Into<Command>) -> &'static str {
        let name = self.graph.add_command(command);
        self.persist_quietly().await;
        name
    }

    pub async fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let outcome = self.graph.dispatch(event);
        if outcome.is_applied() {
            self.persist_quietly().await;
        }
        outcome
    }

    pub async fn undo(&mut self) -> bool {
        let undone = self.graph.undo();
        if undone {
            self.persist_quietly().await;
        }
        undone
    }

    pub async fn redo(&mut self) -> bool {
        let redone = self.graph.redo();
        if redone {
            self.persist_quietly().await;
        }
        redone
    }

    /// Place a backend node at `position`, wired to every placed node it has relations with.
    /// Heat configs are not part of the edit history; each change is saved right away.
    pub async fn set_heat_config(&mut self, config: HeatConfig) -> Option<HeatConfig> {
        let previous = self.graph.set_heat_config(config);
        self.persist_quietly().await;
        previous
    }

    pub async fn remove_heat_config(&mut self, key: &str) -> Option<HeatConfig> {
        let removed = self.graph.remove_heat_config(key)?;
        self.persist_quietly().await;
        Some(removed)
    }

    pub async fn add_node(
        &mut self,
        uuid: &NodeUuid,
        position: Point,
    ) -> Result<NodeHandle, EditorError> {
        let node = self
            .repository
            .fetch_node(uuid)
            .await?
            .ok_or_else(|| EditorError::NodeNotFound(uuid.clone()))?;
        let relations = self.repository.fetch_relations_of_node(uuid).await?;

        let info = NodeInfo::new(node.node_id, node.label, node.name, position);
        let handle = self
            .graph
            .place_node(CreateNode::with_relations(info, relations));
        self.persist_quietly().await;
        handle.ok_or_else(|| EditorError::NodeNotFound(uuid.clone()))
    }

    /// Enter relation mode, reconciling against the relations of every placed node.
    ///
    /// `None` if the mode was left or re-entered while the fetch was running.
    pub async fn enable_relation_mode(&mut self) -> Option<ReconcileReport> {
        let request = self.graph.begin_enable_relation_mode();
        let fetched = fetch_all_settled(&self.repository, request.node_uuids()).await;
        self.graph.complete_enable_relation_mode(&request, fetched)
    }

    pub fn disable_relation_mode(&mut self) -> DisableReport {
        self.graph.disable_relation_mode()
    }

    /// Enable every faint suggestion, one undoable command each. Returns how many were enabled.
    pub async fn accept_faint_relations(&mut self) -> usize {
        let faint = self.graph.diagram().relations().faint_relations();
        for relation in &faint {
            self.graph.add_command(EnableDbRelation::new(*relation));
        }
        if !faint.is_empty() {
            self.persist_quietly().await;
        }
        faint.len()
    }

    pub async fn persist(&self) -> Result<(), EditorError> {
        let json = self.graph.to_json()?;
        self.repository
            .persist_diagram(&self.diagram_id, json)
            .await?;
        Ok(())
    }

    async fn persist_quietly(&self) {
        if let Err(err) = self.persist().await {
            tracing::warn!(diagram = %self.diagram_id, error = %err, "saving diagram failed");
        }
    }
}
