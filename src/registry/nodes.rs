// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::model::{NodeHandle, NodeInfo, NodeReference, NodeUuid};

/// Placed nodes, keyed by stable handle.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeHandle, NodeInfo>,
    next_handle: u64,
}

impl NodeRegistry {
    /// Place a new node. A uuid that is already placed gets the next unused index
    /// (max existing index + 1); a fresh uuid starts at index 0.
    pub fn insert(&mut self, mut info: NodeInfo) -> NodeHandle {
        let index = self.next_index(info.uuid()).unwrap_or(0);
        info.reference_mut().set_index(index);
        self.insert_raw(info)
    }

    /// Place a node while keeping its stored reference, unless that reference is already
    /// taken; then it is renumbered like [`NodeRegistry::insert`].
    pub(crate) fn insert_preserving(&mut self, mut info: NodeInfo) -> NodeHandle {
        if self
            .get_by_reference(info.uuid(), info.reference().index())
            .is_some()
        {
            let index = self.next_index(info.uuid()).unwrap_or(0);
            info.reference_mut().set_index(index);
        }
        self.insert_raw(info)
    }

    /// Put a previously removed node back under its old handle.
    ///
    /// Returns `false` (and leaves the registry unchanged) if the handle is live or its
    /// reference has been taken in the meantime.
    pub(crate) fn restore(&mut self, handle: NodeHandle, info: NodeInfo) -> bool {
        if self.nodes.contains_key(&handle)
            || self
                .get_by_reference(info.uuid(), info.reference().index())
                .is_some()
        {
            return false;
        }
        self.next_handle = self.next_handle.max(handle.raw().saturating_add(1));
        self.nodes.insert(handle, info);
        true
    }

    pub(crate) fn remove(&mut self, handle: NodeHandle) -> Option<NodeInfo> {
        self.nodes.remove(&handle)
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&NodeInfo> {
        self.nodes.get(&handle)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut NodeInfo> {
        self.nodes.get_mut(&handle)
    }

    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(&handle)
    }

    /// All placed copies of a logical node, ordered by index.
    pub fn get_by_uuid(&self, uuid: &NodeUuid) -> SmallVec<[NodeHandle; 2]> {
        let mut found = self
            .nodes
            .iter()
            .filter(|(_, info)| info.uuid() == uuid)
            .map(|(handle, info)| (info.reference().index(), *handle))
            .collect::<SmallVec<[(u32, NodeHandle); 2]>>();
        found.sort_unstable_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, handle)| handle).collect()
    }

    pub fn get_by_reference(&self, uuid: &NodeUuid, index: u32) -> Option<NodeHandle> {
        self.nodes.iter().find_map(|(handle, info)| {
            (info.uuid() == uuid && info.reference().index() == index).then_some(*handle)
        })
    }

    pub fn reference_of(&self, handle: NodeHandle) -> Option<&NodeReference> {
        self.nodes.get(&handle).map(NodeInfo::reference)
    }

    pub fn unique_uuids(&self) -> BTreeSet<NodeUuid> {
        self.nodes.values().map(|info| info.uuid().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &NodeInfo)> {
        self.nodes.iter().map(|(handle, info)| (*handle, info))
    }

    pub fn handles(&self) -> Vec<NodeHandle> {
        self.nodes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn max_z(&self) -> Option<i64> {
        self.nodes.values().map(NodeInfo::z).max()
    }

    fn next_index(&self, uuid: &NodeUuid) -> Option<u32> {
        self.nodes
            .values()
            .filter(|info| info.uuid() == uuid)
            .map(|info| info.reference().index())
            .max()
            .map(|index| index.saturating_add(1))
    }

    fn insert_raw(&mut self, info: NodeInfo) -> NodeHandle {
        let handle = NodeHandle::from_raw(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        self.nodes.insert(handle, info);
        handle
    }
}
