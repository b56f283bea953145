// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Relation review mode.
//!
//! While active, every placed relation is reconciled against the relations the backend knows
//! for the placed nodes: matching ones are confirmed, diverging ones become `Visual`, and
//! backend relations not drawn yet appear as `Faint` suggestions. Leaving the mode discards the
//! suggestions and folds visual relations back into normal ones.
//!
//! Enabling is split in two so the fetch can happen without holding the diagram:
//! [`RelationModeControls::begin_enable`] hands out an [`EnableRequest`] carrying a generation
//! token, and [`RelationModeControls::complete_enable`] applies the fetched relations only if no
//! other enable/disable happened in between.

pub mod visual;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::commands::{Command, DisableDbRelation, EnableDbRelation};
use crate::model::{
    ApiRelation, Endpoint, LinkEnd, NodeHandle, NodeReference, NodeUuid, Point, RelationHandle,
    RelationModeType, RelationUuid,
};
use crate::registry::Diagram;

pub use visual::{ProvisionalRelation, VisualRelationControls};

/// Cosmetic re-layout requested after faint siblings were added around a node.
///
/// Implementations should leave relations with manual vertices alone.
pub trait LayoutHook {
    fn rearrange_overlapping_relations(&mut self, diagram: &Diagram, node: NodeHandle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl LayoutHook for NoLayout {
    fn rearrange_overlapping_relations(&mut self, _diagram: &Diagram, _node: NodeHandle) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationModeState {
    #[default]
    Inactive,
    Active,
}

/// Work order for the backend fetch of one enable transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnableRequest {
    generation: u64,
    node_uuids: Vec<NodeUuid>,
}

impl EnableRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Unique uuids of all placed nodes, sorted.
    pub fn node_uuids(&self) -> &[NodeUuid] {
        &self.node_uuids
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Backend relations after de-duplication by relation id.
    pub backend_relations: usize,
    pub confirmed: usize,
    pub visual: usize,
    pub faint_added: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisableReport {
    pub faint_removed: usize,
    pub visual_restored: usize,
    pub snapped: usize,
}

type PresentKey = (RelationUuid, NodeReference, NodeReference);

#[derive(Debug, Clone, Default)]
pub struct RelationModeControls {
    state: RelationModeState,
    generation: u64,
    visual: VisualRelationControls,
}

impl RelationModeControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RelationModeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RelationModeState::Active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn visual(&self) -> &VisualRelationControls {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut VisualRelationControls {
        &mut self.visual
    }

    /// Switch to `Active` and describe which nodes need their backend relations fetched.
    pub fn begin_enable(&mut self, diagram: &Diagram) -> EnableRequest {
        self.state = RelationModeState::Active;
        self.generation = self.generation.wrapping_add(1);
        let node_uuids = diagram.nodes().unique_uuids().into_iter().collect::<Vec<_>>();
        tracing::debug!(
            generation = self.generation,
            nodes = node_uuids.len(),
            "relation mode enabling"
        );
        EnableRequest {
            generation: self.generation,
            node_uuids,
        }
    }

    /// Reconcile the diagram against `fetched`.
    ///
    /// Returns `None` without touching the diagram when `request` is stale, i.e. the mode was
    /// disabled or enabled again after it was issued.
    pub fn complete_enable(
        &mut self,
        diagram: &mut Diagram,
        layout: &mut dyn LayoutHook,
        request: &EnableRequest,
        fetched: Vec<ApiRelation>,
    ) -> Option<ReconcileReport> {
        if !self.is_active() || request.generation != self.generation {
            tracing::debug!(
                request = request.generation,
                current = self.generation,
                "discarding stale relation fetch"
            );
            return None;
        }
        let report = reconcile(diagram, layout, fetched);
        tracing::debug!(?report, "relation mode enabled");
        Some(report)
    }

    /// Leave relation mode: drop faint suggestions, fold visual relations back to normal and
    /// reset confirmation styling.
    pub fn disable(&mut self, diagram: &mut Diagram) -> DisableReport {
        self.state = RelationModeState::Inactive;
        self.generation = self.generation.wrapping_add(1);
        self.visual.cancel_drawing();

        let mut report = DisableReport::default();
        for handle in diagram.relations().faint_relations() {
            if diagram.remove_relation(handle).is_some() {
                report.faint_removed += 1;
            }
        }

        for handle in diagram.relations().visual_relations() {
            let Some(relation) = diagram.relation_mut(handle) else {
                continue;
            };
            if relation.has_dangling_end() {
                relation.snap_to_recorded_nodes();
                report.snapped += 1;
            }
            relation.set_mode(RelationModeType::Normal);
            report.visual_restored += 1;
        }

        for handle in diagram.relations().normal_relations() {
            if let Some(relation) = diagram.relation_mut(handle) {
                relation.set_confirmed(false);
            }
        }

        tracing::debug!(?report, "relation mode disabled");
        report
    }

    /// Command for a click on a relation while the mode is active: normal relations get
    /// disabled, faint ones enabled, visual ones are left alone.
    pub fn switch_relation(&self, diagram: &Diagram, relation: RelationHandle) -> Option<Command> {
        if !self.is_active() {
            return None;
        }
        match diagram.relation(relation)?.mode() {
            RelationModeType::Normal => Some(DisableDbRelation::new(relation).into()),
            RelationModeType::Faint => Some(EnableDbRelation::new(relation).into()),
            RelationModeType::Visual => None,
        }
    }

    /// A click on a node while the mode is active: starts a drawing from it, or finishes the
    /// current drawing on it.
    pub fn element_click(
        &mut self,
        diagram: &Diagram,
        node: NodeHandle,
        position: Point,
    ) -> Option<Command> {
        if !self.is_active() {
            return None;
        }
        if self.visual.is_drawing() {
            self.visual.end_drawing(diagram, Some(node))
        } else {
            self.visual.start_drawing(node, position);
            None
        }
    }

    pub fn connect_relation(
        &self,
        diagram: &Diagram,
        relation: RelationHandle,
        end: LinkEnd,
        target: Endpoint,
    ) -> Option<Command> {
        self.visual
            .change_relation_connection(diagram, relation, end, target, self.is_active())
    }
}

fn reconcile(
    diagram: &mut Diagram,
    layout: &mut dyn LayoutHook,
    fetched: Vec<ApiRelation>,
) -> ReconcileReport {
    let mut by_id = BTreeMap::<RelationUuid, ApiRelation>::new();
    for relation in fetched {
        by_id.insert(relation.relation_id.clone(), relation);
    }

    let mut report = ReconcileReport {
        backend_relations: by_id.len(),
        ..ReconcileReport::default()
    };
    let mut present = HashSet::<PresentKey>::new();

    for handle in diagram.relations().handles() {
        let Some(relation) = diagram.relation_mut(handle) else {
            continue;
        };
        let key = relation.uuid().and_then(|uuid| {
            let backend = by_id.get(uuid)?;
            let info = relation.info();
            let matches = &backend.from == info.from().uuid()
                && &backend.to == info.to().uuid()
                && !relation.has_dangling_end();
            matches.then(|| (uuid.clone(), info.from().clone(), info.to().clone()))
        });

        match key {
            Some(key) => {
                present.insert(key);
                if relation.mode() != RelationModeType::Faint {
                    relation.set_confirmed(true);
                    report.confirmed += 1;
                }
            }
            None => {
                relation.set_mode(RelationModeType::Visual);
                relation.set_confirmed(false);
                report.visual += 1;
            }
        }
    }

    for (relation_id, backend) in &by_id {
        let sources = diagram.nodes().get_by_uuid(&backend.from);
        let targets = diagram.nodes().get_by_uuid(&backend.to);

        for source in sources {
            let mut added = false;
            for target in targets.iter().copied() {
                let (Some(from), Some(to)) = (
                    diagram.nodes().reference_of(source).cloned(),
                    diagram.nodes().reference_of(target).cloned(),
                ) else {
                    continue;
                };
                if present.contains(&(relation_id.clone(), from, to)) {
                    continue;
                }
                if diagram
                    .add_relation(
                        source,
                        target,
                        Some(relation_id.clone()),
                        backend.relation_type.clone(),
                        RelationModeType::Faint,
                    )
                    .is_some()
                {
                    added = true;
                    report.faint_added += 1;
                }
            }
            if added {
                layout.rearrange_overlapping_relations(diagram, source);
            }
        }
    }

    report
}
