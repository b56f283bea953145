// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reversible diagram edits.
//!
//! Every mutation that should show up in the edit history is a [`Command`]. A command captures
//! what it needs to reverse itself the first time it is applied, so `redo(); undo()` leaves the
//! registries exactly as they were. Commands tolerate targets that disappeared out of band
//! (for example faint relations dropped when relation mode is turned off): both directions are
//! then no-ops.

use std::mem;

use crate::model::{
    ApiRelation, Endpoint, LinkEnd, NodeHandle, NodeInfo, NodeStyle, Point, Relation,
    RelationHandle, RelationModeType, RelationUuid, Size,
};
use crate::registry::{Diagram, RemovedNode};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateNode(CreateNode),
    RemoveNode(RemoveNode),
    MoveNode(MoveNode),
    ResizeNode(ResizeNode),
    RestyleNode(RestyleNode),
    CreateRelation(CreateRelation),
    RemoveRelation(RemoveRelation),
    BendRelation(BendRelation),
    ReconnectRelation(ReconnectRelation),
    EnableDbRelation(EnableDbRelation),
    DisableDbRelation(DisableDbRelation),
}

impl Command {
    pub fn redo(&mut self, diagram: &mut Diagram) {
        match self {
            Self::CreateNode(command) => command.redo(diagram),
            Self::RemoveNode(command) => command.redo(diagram),
            Self::MoveNode(command) => command.redo(diagram),
            Self::ResizeNode(command) => command.redo(diagram),
            Self::RestyleNode(command) => command.redo(diagram),
            Self::CreateRelation(command) => command.redo(diagram),
            Self::RemoveRelation(command) => command.redo(diagram),
            Self::BendRelation(command) => command.redo(diagram),
            Self::ReconnectRelation(command) => command.redo(diagram),
            Self::EnableDbRelation(command) => command.redo(diagram),
            Self::DisableDbRelation(command) => command.redo(diagram),
        }
    }

    pub fn undo(&mut self, diagram: &mut Diagram) {
        match self {
            Self::CreateNode(command) => command.undo(diagram),
            Self::RemoveNode(command) => command.undo(diagram),
            Self::MoveNode(command) => command.undo(diagram),
            Self::ResizeNode(command) => command.undo(diagram),
            Self::RestyleNode(command) => command.undo(diagram),
            Self::CreateRelation(command) => command.undo(diagram),
            Self::RemoveRelation(command) => command.undo(diagram),
            Self::BendRelation(command) => command.undo(diagram),
            Self::ReconnectRelation(command) => command.undo(diagram),
            Self::EnableDbRelation(command) => command.undo(diagram),
            Self::DisableDbRelation(command) => command.undo(diagram),
        }
    }

    /// Rewrite what the command would restore so that replaying it outside relation mode never
    /// brings back faint or visual state. Called for every stored command when the mode is left.
    pub fn fold_relation_modes(&mut self) {
        match self {
            Self::CreateNode(command) => command.fold_relation_modes(),
            Self::RemoveNode(command) => command.fold_relation_modes(),
            Self::CreateRelation(command) => command.fold_relation_modes(),
            Self::RemoveRelation(command) => command.fold_relation_modes(),
            Self::ReconnectRelation(command) => command.fold_relation_modes(),
            Self::EnableDbRelation(command) => command.settled = true,
            Self::DisableDbRelation(command) => command.settled = true,
            Self::MoveNode(_)
            | Self::ResizeNode(_)
            | Self::RestyleNode(_)
            | Self::BendRelation(_) => {}
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateNode(_) => "create_node",
            Self::RemoveNode(_) => "remove_node",
            Self::MoveNode(_) => "move_node",
            Self::ResizeNode(_) => "resize_node",
            Self::RestyleNode(_) => "restyle_node",
            Self::CreateRelation(_) => "create_relation",
            Self::RemoveRelation(_) => "remove_relation",
            Self::BendRelation(_) => "bend_relation",
            Self::ReconnectRelation(_) => "reconnect_relation",
            Self::EnableDbRelation(_) => "enable_db_relation",
            Self::DisableDbRelation(_) => "disable_db_relation",
        }
    }
}

macro_rules! command_from {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(command: $variant) -> Self {
                    Self::$variant(command)
                }
            }
        )+
    };
}

command_from!(
    CreateNode,
    RemoveNode,
    MoveNode,
    ResizeNode,
    RestyleNode,
    CreateRelation,
    RemoveRelation,
    BendRelation,
    ReconnectRelation,
    EnableDbRelation,
    DisableDbRelation,
);

#[derive(Debug, Clone, PartialEq)]
enum CreatedNode {
    Pending,
    Applied(NodeHandle),
    Undone(RemovedNode),
}

/// Place a node, optionally wiring up the backend relations it has to nodes already placed.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNode {
    info: NodeInfo,
    relations: Vec<ApiRelation>,
    state: CreatedNode,
}

impl CreateNode {
    pub fn new(info: NodeInfo) -> Self {
        Self::with_relations(info, Vec::new())
    }

    /// `relations` are the backend relations of the node; each one that touches the new node is
    /// placed as a `Normal` relation to every placed copy of the node at its other end.
    pub fn with_relations(info: NodeInfo, relations: Vec<ApiRelation>) -> Self {
        Self {
            info,
            relations,
            state: CreatedNode::Pending,
        }
    }

    /// The handle of the placed node while the command is applied.
    pub fn handle(&self) -> Option<NodeHandle> {
        match self.state {
            CreatedNode::Applied(handle) => Some(handle),
            _ => None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        self.state = match mem::replace(&mut self.state, CreatedNode::Pending) {
            CreatedNode::Pending => CreatedNode::Applied(self.place(diagram)),
            CreatedNode::Applied(handle) => CreatedNode::Applied(handle),
            CreatedNode::Undone(removed) => {
                let handle = removed.handle;
                if diagram.restore_node(removed) {
                    CreatedNode::Applied(handle)
                } else {
                    CreatedNode::Applied(self.place(diagram))
                }
            }
        };
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        self.state = match mem::replace(&mut self.state, CreatedNode::Pending) {
            CreatedNode::Applied(handle) => match diagram.remove_node(handle) {
                Some(removed) => CreatedNode::Undone(removed),
                None => CreatedNode::Pending,
            },
            other => other,
        };
    }

    fn fold_relation_modes(&mut self) {
        if let CreatedNode::Undone(removed) = &mut self.state {
            removed.fold_relation_modes();
        }
    }

    fn place(&self, diagram: &mut Diagram) -> NodeHandle {
        let handle = diagram.add_node(self.info.clone());
        let uuid = self.info.uuid();

        for relation in &self.relations {
            if &relation.from == uuid {
                let targets = diagram.nodes().get_by_uuid(&relation.to);
                for target in targets {
                    diagram.add_relation(
                        handle,
                        target,
                        Some(relation.relation_id.clone()),
                        relation.relation_type.clone(),
                        RelationModeType::Normal,
                    );
                }
            } else if &relation.to == uuid {
                let sources = diagram.nodes().get_by_uuid(&relation.from);
                for source in sources {
                    diagram.add_relation(
                        source,
                        handle,
                        Some(relation.relation_id.clone()),
                        relation.relation_type.clone(),
                        RelationModeType::Normal,
                    );
                }
            }
        }

        handle
    }
}

/// Remove a node and, by cascade, its relations.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveNode {
    handle: NodeHandle,
    removed: Option<RemovedNode>,
}

impl RemoveNode {
    pub fn new(handle: NodeHandle) -> Self {
        Self {
            handle,
            removed: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if self.removed.is_none() {
            self.removed = diagram.remove_node(self.handle);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let Some(removed) = self.removed.take() {
            diagram.restore_node(removed);
        }
    }

    fn fold_relation_modes(&mut self) {
        if let Some(removed) = &mut self.removed {
            removed.fold_relation_modes();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveNode {
    handle: NodeHandle,
    start: Point,
    stop: Point,
}

impl MoveNode {
    pub fn new(handle: NodeHandle, start: Point, stop: Point) -> Self {
        Self {
            handle,
            start,
            stop,
        }
    }

    pub fn set_stop(&mut self, stop: Point) {
        self.stop = stop;
    }

    pub fn is_noop(&self) -> bool {
        self.start == self.stop
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if let Some(node) = diagram.node_mut(self.handle) {
            node.set_position(self.stop);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let Some(node) = diagram.node_mut(self.handle) {
            node.set_position(self.start);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResizeNode {
    handle: NodeHandle,
    size: Size,
    previous: Option<Size>,
}

impl ResizeNode {
    pub fn new(handle: NodeHandle, size: Size) -> Self {
        Self {
            handle,
            size,
            previous: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if let Some(node) = diagram.node_mut(self.handle) {
            self.previous = Some(node.size());
            node.set_size(self.size);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let (Some(node), Some(previous)) = (diagram.node_mut(self.handle), self.previous.take()) {
            node.set_size(previous);
        }
    }
}

/// Change shape and color of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct RestyleNode {
    handle: NodeHandle,
    style: NodeStyle,
    previous: Option<NodeStyle>,
}

impl RestyleNode {
    pub fn new(handle: NodeHandle, style: NodeStyle) -> Self {
        Self {
            handle,
            style,
            previous: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if let Some(node) = diagram.node_mut(self.handle) {
            self.previous = Some(node.style().clone());
            node.set_style(self.style.clone());
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let (Some(node), Some(previous)) = (diagram.node_mut(self.handle), self.previous.take()) {
            node.set_style(previous);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CreatedRelation {
    Pending,
    Applied(RelationHandle),
    Undone(RelationHandle, Relation),
    /// Undone faint suggestion that relation mode has since dropped; never comes back.
    Settled,
}

/// Connect two placed nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRelation {
    source: NodeHandle,
    target: NodeHandle,
    uuid: Option<RelationUuid>,
    label: String,
    mode: RelationModeType,
    state: CreatedRelation,
}

impl CreateRelation {
    pub fn new(
        source: NodeHandle,
        target: NodeHandle,
        uuid: Option<RelationUuid>,
        label: impl Into<String>,
        mode: RelationModeType,
    ) -> Self {
        Self {
            source,
            target,
            uuid,
            label: label.into(),
            mode,
            state: CreatedRelation::Pending,
        }
    }

    /// A diagram-only relation, as drawn by hand in relation mode.
    pub fn visual(source: NodeHandle, target: NodeHandle, label: impl Into<String>) -> Self {
        Self::new(source, target, None, label, RelationModeType::Visual)
    }

    pub fn source(&self) -> NodeHandle {
        self.source
    }

    pub fn target(&self) -> NodeHandle {
        self.target
    }

    pub fn handle(&self) -> Option<RelationHandle> {
        match self.state {
            CreatedRelation::Applied(handle) => Some(handle),
            _ => None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        self.state = match mem::replace(&mut self.state, CreatedRelation::Pending) {
            CreatedRelation::Pending => diagram
                .add_relation(
                    self.source,
                    self.target,
                    self.uuid.clone(),
                    self.label.clone(),
                    self.mode,
                )
                .map_or(CreatedRelation::Pending, CreatedRelation::Applied),
            CreatedRelation::Applied(handle) => CreatedRelation::Applied(handle),
            CreatedRelation::Undone(handle, relation) => {
                if diagram.restore_relation(handle, relation) {
                    CreatedRelation::Applied(handle)
                } else {
                    CreatedRelation::Pending
                }
            }
            CreatedRelation::Settled => CreatedRelation::Settled,
        };
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        self.state = match mem::replace(&mut self.state, CreatedRelation::Pending) {
            CreatedRelation::Applied(handle) => match diagram.remove_relation(handle) {
                Some(relation) => CreatedRelation::Undone(handle, relation),
                None => CreatedRelation::Pending,
            },
            other => other,
        };
    }

    fn fold_relation_modes(&mut self) {
        self.mode = RelationModeType::Normal;
        self.state = match mem::replace(&mut self.state, CreatedRelation::Pending) {
            CreatedRelation::Undone(_, relation) if relation.mode() == RelationModeType::Faint => {
                CreatedRelation::Settled
            }
            CreatedRelation::Undone(handle, mut relation) => {
                relation.fold_to_normal();
                CreatedRelation::Undone(handle, relation)
            }
            other => other,
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveRelation {
    handle: RelationHandle,
    removed: Option<Relation>,
}

impl RemoveRelation {
    pub fn new(handle: RelationHandle) -> Self {
        Self {
            handle,
            removed: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if self.removed.is_none() {
            self.removed = diagram.remove_relation(self.handle);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let Some(relation) = self.removed.take() {
            diagram.restore_relation(self.handle, relation);
        }
    }

    fn fold_relation_modes(&mut self) {
        if self
            .removed
            .as_ref()
            .is_some_and(|relation| relation.mode() == RelationModeType::Faint)
        {
            self.removed = None;
        } else if let Some(relation) = &mut self.removed {
            relation.fold_to_normal();
        }
    }
}

/// Replace the routing vertices of a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct BendRelation {
    handle: RelationHandle,
    vertices: Vec<Point>,
    previous: Option<Vec<Point>>,
}

impl BendRelation {
    pub fn new(handle: RelationHandle, vertices: Vec<Point>) -> Self {
        Self {
            handle,
            vertices,
            previous: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if let Some(relation) = diagram.relation_mut(self.handle) {
            self.previous = Some(relation.info().vertices().to_vec());
            relation.info_mut().set_vertices(self.vertices.clone());
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if let (Some(relation), Some(previous)) =
            (diagram.relation_mut(self.handle), self.previous.take())
        {
            relation.info_mut().set_vertices(previous);
        }
    }
}

/// Move one end of a relation onto another node or onto blank paper.
///
/// With `demote_to_visual` set (relation mode active) the relation no longer reflects the
/// backend and becomes `Visual`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconnectRelation {
    handle: RelationHandle,
    end: LinkEnd,
    target: Endpoint,
    demote_to_visual: bool,
    previous: Option<Relation>,
}

impl ReconnectRelation {
    pub fn new(
        handle: RelationHandle,
        end: LinkEnd,
        target: Endpoint,
        demote_to_visual: bool,
    ) -> Self {
        Self {
            handle,
            end,
            target,
            demote_to_visual,
            previous: None,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        let reference = match self.target {
            Endpoint::Node(node) => match diagram.nodes().reference_of(node) {
                Some(reference) => Some((node, reference.clone())),
                None => return,
            },
            Endpoint::Point(_) => None,
        };
        let Some(relation) = diagram.relation_mut(self.handle) else {
            return;
        };

        self.previous = Some(relation.clone());
        match (reference, self.target) {
            (Some((node, reference)), _) => relation.attach(self.end, node, reference),
            (None, Endpoint::Point(point)) => relation.detach(self.end, point),
            (None, Endpoint::Node(_)) => {}
        }
        if self.demote_to_visual && relation.mode() != RelationModeType::Visual {
            relation.set_mode(RelationModeType::Visual);
            relation.set_confirmed(false);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        if !diagram.nodes().contains(previous.source_node())
            || !diagram.nodes().contains(previous.target_node())
        {
            return;
        }
        if let Some(relation) = diagram.relation_mut(self.handle) {
            *relation = previous;
        }
    }

    fn fold_relation_modes(&mut self) {
        self.demote_to_visual = false;
        if let Some(previous) = &mut self.previous {
            previous.fold_to_normal();
        }
    }
}

/// Promote a faint suggestion to a committed relation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnableDbRelation {
    handle: RelationHandle,
    previous: Option<(RelationModeType, bool)>,
    /// Set once relation mode was left; the toggle has no meaning outside of it.
    settled: bool,
}

impl EnableDbRelation {
    pub fn new(handle: RelationHandle) -> Self {
        Self {
            handle,
            previous: None,
            settled: false,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if self.settled {
            return;
        }
        if let Some(relation) = diagram.relation_mut(self.handle) {
            self.previous = Some((relation.mode(), relation.is_confirmed()));
            relation.set_mode(RelationModeType::Normal);
            relation.set_confirmed(true);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if !self.settled {
            restore_mode(diagram, self.handle, self.previous.take());
        }
    }
}

/// Turn a committed relation back into a faint suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct DisableDbRelation {
    handle: RelationHandle,
    previous: Option<(RelationModeType, bool)>,
    /// Set once relation mode was left; the toggle has no meaning outside of it.
    settled: bool,
}

impl DisableDbRelation {
    pub fn new(handle: RelationHandle) -> Self {
        Self {
            handle,
            previous: None,
            settled: false,
        }
    }

    fn redo(&mut self, diagram: &mut Diagram) {
        if self.settled {
            return;
        }
        if let Some(relation) = diagram.relation_mut(self.handle) {
            self.previous = Some((relation.mode(), relation.is_confirmed()));
            relation.set_mode(RelationModeType::Faint);
            relation.set_confirmed(false);
        }
    }

    fn undo(&mut self, diagram: &mut Diagram) {
        if !self.settled {
            restore_mode(diagram, self.handle, self.previous.take());
        }
    }
}

fn restore_mode(
    diagram: &mut Diagram,
    handle: RelationHandle,
    previous: Option<(RelationModeType, bool)>,
) {
    if let (Some(relation), Some((mode, confirmed))) = (diagram.relation_mut(handle), previous) {
        relation.set_mode(mode);
        relation.set_confirmed(confirmed);
    }
}
