// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{
    HeatConfig, NodeHandle, NodeInfo, Relation, RelationHandle, RelationInfo, RelationModeType,
    RelationUuid,
};

use super::nodes::NodeRegistry;
use super::relations::RelationRegistry;

/// A node taken out of the diagram together with the relations the removal cascaded to.
///
/// Holding on to this is enough to put everything back under the same handles.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    pub handle: NodeHandle,
    pub info: NodeInfo,
    pub relations: Vec<(RelationHandle, Relation)>,
}

impl RemovedNode {
    /// Forget faint relations and fold the rest to `Normal`, as leaving relation mode does for
    /// the live diagram.
    pub(crate) fn fold_relation_modes(&mut self) {
        self.relations
            .retain(|(_, relation)| relation.mode() != RelationModeType::Faint);
        for (_, relation) in &mut self.relations {
            relation.fold_to_normal();
        }
    }
}

/// The in-memory state of one open diagram.
///
/// Owns both registries so that the relation invariant holds after every call: each relation's
/// recorded source and target are registered nodes, and removing a node removes every relation
/// touching it in the same call.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    nodes: NodeRegistry,
    relations: RelationRegistry,
    heat_configs: BTreeMap<String, HeatConfig>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    pub fn relations(&self) -> &RelationRegistry {
        &self.relations
    }

    pub fn node(&self, handle: NodeHandle) -> Option<&NodeInfo> {
        self.nodes.get(handle)
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut NodeInfo> {
        self.nodes.get_mut(handle)
    }

    pub fn relation(&self, handle: RelationHandle) -> Option<&Relation> {
        self.relations.get(handle)
    }

    pub fn relation_mut(&mut self, handle: RelationHandle) -> Option<&mut Relation> {
        self.relations.get_mut(handle)
    }

    pub fn heat_configs(&self) -> &BTreeMap<String, HeatConfig> {
        &self.heat_configs
    }

    /// Insert or replace the config stored under `config.key()`.
    pub fn set_heat_config(&mut self, config: HeatConfig) -> Option<HeatConfig> {
        self.heat_configs.insert(config.key(), config)
    }

    pub fn remove_heat_config(&mut self, key: &str) -> Option<HeatConfig> {
        self.heat_configs.remove(key)
    }

    pub(crate) fn insert_heat_config(&mut self, key: String, config: HeatConfig) {
        self.heat_configs.insert(key, config);
    }

    /// Place a new node on top of everything else.
    pub fn add_node(&mut self, mut info: NodeInfo) -> NodeHandle {
        info.set_z(self.next_z());
        self.nodes.insert(info)
    }

    /// Place a node read from a saved diagram, keeping its reference and z when possible.
    pub(crate) fn add_loaded_node(&mut self, info: NodeInfo) -> NodeHandle {
        self.nodes.insert_preserving(info)
    }

    /// Remove a node and every relation touching it.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Option<RemovedNode> {
        let info = self.nodes.remove(handle)?;
        let relations = self
            .relations
            .incident_to(handle)
            .into_iter()
            .filter_map(|relation| {
                self.relations
                    .remove(relation)
                    .map(|removed| (relation, removed))
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            node = handle.raw(),
            relations = relations.len(),
            "removed node with incident relations"
        );
        Some(RemovedNode {
            handle,
            info,
            relations,
        })
    }

    /// Undo a [`Diagram::remove_node`]. Relations whose other endpoint is gone by now are not
    /// brought back.
    pub fn restore_node(&mut self, removed: RemovedNode) -> bool {
        if !self.nodes.restore(removed.handle, removed.info) {
            return false;
        }
        for (handle, relation) in removed.relations {
            self.restore_relation(handle, relation);
        }
        true
    }

    /// Connect two placed nodes. `None` if either node is not registered.
    pub fn add_relation(
        &mut self,
        source: NodeHandle,
        target: NodeHandle,
        uuid: Option<RelationUuid>,
        label: impl Into<String>,
        mode: RelationModeType,
    ) -> Option<RelationHandle> {
        let from = self.nodes.reference_of(source)?.clone();
        let to = self.nodes.reference_of(target)?.clone();
        let z = self.next_z();
        let mut relation = Relation::new(
            RelationInfo::new(uuid, label, from, to),
            source,
            target,
            mode,
        );
        relation.set_z(z);
        Some(self.relations.insert(relation))
    }

    pub fn remove_relation(&mut self, handle: RelationHandle) -> Option<Relation> {
        self.relations.remove(handle)
    }

    /// Put a relation back under its old handle if both recorded endpoints still exist.
    pub fn restore_relation(&mut self, handle: RelationHandle, relation: Relation) -> bool {
        if !self.nodes.contains(relation.source_node())
            || !self.nodes.contains(relation.target_node())
        {
            return false;
        }
        self.relations.restore(handle, relation)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relations.is_empty() && self.heat_configs.is_empty()
    }

    pub(crate) fn next_z(&self) -> i64 {
        self.nodes
            .max_z()
            .into_iter()
            .chain(self.relations.max_z())
            .max()
            .map_or(1, |z| z.saturating_add(1))
    }

    /// Relations whose recorded endpoints are missing or disagree with the node references.
    #[cfg(test)]
    pub(crate) fn broken_relations(&self) -> Vec<RelationHandle> {
        self.relations
            .iter()
            .filter(|(_, relation)| {
                let from = self.nodes.reference_of(relation.source_node());
                let to = self.nodes.reference_of(relation.target_node());
                from != Some(relation.info().from()) || to != Some(relation.info().to())
            })
            .map(|(handle, _)| handle)
            .collect()
    }
}
