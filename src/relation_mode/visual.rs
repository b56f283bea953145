// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::commands::{Command, CreateRelation, ReconnectRelation};
use crate::model::{Endpoint, LinkEnd, NodeHandle, Point, RelationHandle};
use crate::registry::Diagram;

/// A relation being drawn: anchored at `source`, free end following the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProvisionalRelation {
    source: NodeHandle,
    anchor: Point,
    pointer: Point,
}

impl ProvisionalRelation {
    pub fn source(&self) -> NodeHandle {
        self.source
    }

    /// Where the drawing started.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Current position of the free end.
    pub fn pointer(&self) -> Point {
        self.pointer
    }
}

/// Interactive drawing of diagram-only relations.
///
/// One pointer, one provisional relation at a time. Nothing touches the registries until the
/// drawing ends on a valid node, which yields a [`CreateRelation`] command for the history.
#[derive(Debug, Clone, Default)]
pub struct VisualRelationControls {
    drawing: Option<ProvisionalRelation>,
    label: String,
}

impl VisualRelationControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    pub fn provisional(&self) -> Option<&ProvisionalRelation> {
        self.drawing.as_ref()
    }

    /// Label given to relations committed by [`VisualRelationControls::end_drawing`].
    pub fn relation_label(&self) -> &str {
        &self.label
    }

    pub fn set_relation_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Begin a provisional relation at `source`. A drawing already in progress is cancelled
    /// first.
    pub fn start_drawing(&mut self, source: NodeHandle, position: Point) {
        if let Some(previous) = self.drawing.take() {
            tracing::debug!(source = %previous.source, "restarting visual relation drawing");
        }
        self.drawing = Some(ProvisionalRelation {
            source,
            anchor: position,
            pointer: position,
        });
    }

    /// Track the pointer with the free end. Returns `false` when not drawing.
    pub fn mousemove(&mut self, position: Point) -> bool {
        match self.drawing.as_mut() {
            Some(drawing) => {
                drawing.pointer = position;
                true
            }
            None => false,
        }
    }

    /// Finish the drawing on `target`.
    ///
    /// Yields the command that commits the relation as `Visual`, or `None` when there was no
    /// drawing, the target is missing/unregistered, or the source vanished meanwhile. The drawing
    /// state is cleared either way.
    pub fn end_drawing(&mut self, diagram: &Diagram, target: Option<NodeHandle>) -> Option<Command> {
        let drawing = self.drawing.take()?;
        let target = target.filter(|target| diagram.nodes().contains(*target))?;
        if !diagram.nodes().contains(drawing.source) {
            return None;
        }
        Some(CreateRelation::visual(drawing.source, target, self.label.clone()).into())
    }

    /// Discard the provisional relation. Safe to call when not drawing.
    pub fn cancel_drawing(&mut self) -> bool {
        self.drawing.take().is_some()
    }

    /// The user dropped one end of an existing relation on `target`.
    ///
    /// Returns the reconnect command, or `None` if the relation or target node is unknown or the
    /// end is already attached there.
    pub fn change_relation_connection(
        &self,
        diagram: &Diagram,
        relation: RelationHandle,
        end: LinkEnd,
        target: Endpoint,
        relation_mode_active: bool,
    ) -> Option<Command> {
        let current = diagram.relation(relation)?;
        if let Endpoint::Node(node) = target {
            if !diagram.nodes().contains(node) {
                return None;
            }
        }
        if current.end(end) == target {
            return None;
        }
        Some(ReconnectRelation::new(relation, end, target, relation_mode_active).into())
    }
}
