// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{NodeHandle, Relation, RelationHandle, RelationModeType};

/// Placed relations, keyed by stable handle.
///
/// Endpoint validity is enforced one level up by [`super::Diagram`], which owns both
/// registries.
#[derive(Debug, Clone, Default)]
pub struct RelationRegistry {
    relations: BTreeMap<RelationHandle, Relation>,
    next_handle: u64,
}

impl RelationRegistry {
    pub(crate) fn insert(&mut self, relation: Relation) -> RelationHandle {
        let handle = RelationHandle::from_raw(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        self.relations.insert(handle, relation);
        handle
    }

    pub(crate) fn restore(&mut self, handle: RelationHandle, relation: Relation) -> bool {
        if self.relations.contains_key(&handle) {
            return false;
        }
        self.next_handle = self.next_handle.max(handle.raw().saturating_add(1));
        self.relations.insert(handle, relation);
        true
    }

    pub(crate) fn remove(&mut self, handle: RelationHandle) -> Option<Relation> {
        self.relations.remove(&handle)
    }

    pub fn get(&self, handle: RelationHandle) -> Option<&Relation> {
        self.relations.get(&handle)
    }

    pub fn get_mut(&mut self, handle: RelationHandle) -> Option<&mut Relation> {
        self.relations.get_mut(&handle)
    }

    pub fn contains(&self, handle: RelationHandle) -> bool {
        self.relations.contains_key(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RelationHandle, &Relation)> {
        self.relations.iter().map(|(handle, relation)| (*handle, relation))
    }

    pub fn handles(&self) -> Vec<RelationHandle> {
        self.relations.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn with_mode(&self, mode: RelationModeType) -> Vec<RelationHandle> {
        self.relations
            .iter()
            .filter(|(_, relation)| relation.mode() == mode)
            .map(|(handle, _)| *handle)
            .collect()
    }

    pub fn normal_relations(&self) -> Vec<RelationHandle> {
        self.with_mode(RelationModeType::Normal)
    }

    pub fn faint_relations(&self) -> Vec<RelationHandle> {
        self.with_mode(RelationModeType::Faint)
    }

    pub fn visual_relations(&self) -> Vec<RelationHandle> {
        self.with_mode(RelationModeType::Visual)
    }

    /// Relations that belong in the saved diagram (everything but faint suggestions).
    pub fn savable_relations(&self) -> impl Iterator<Item = (RelationHandle, &Relation)> {
        self.iter().filter(|(_, relation)| relation.is_savable())
    }

    pub fn incident_to(&self, node: NodeHandle) -> Vec<RelationHandle> {
        self.relations
            .iter()
            .filter(|(_, relation)| relation.touches(node))
            .map(|(handle, _)| *handle)
            .collect()
    }

    pub(crate) fn max_z(&self) -> Option<i64> {
        self.relations.values().map(Relation::z).max()
    }
}
