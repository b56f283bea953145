// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde_json::Value;

use super::handle::NodeHandle;
use super::ids::RelationUuid;
use super::node::{NodeReference, Point};

/// How a placed relation relates to backend ground truth.
///
/// Only meaningful while relation mode is active; outside of it every relation is `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationModeType {
    /// Backed 1:1 by a backend relation and connected exactly as the backend states.
    Normal,
    /// Known to the backend but not drawn by the user; a suggestion, never persisted.
    Faint,
    /// Exists only in the diagram (no backend uuid, or disconnected from backend truth).
    Visual,
}

impl RelationModeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Faint => "faint",
            Self::Visual => "visual",
        }
    }
}

impl fmt::Display for RelationModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where one end of a relation is currently attached on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    Node(NodeHandle),
    /// Dropped on blank paper; the relation still remembers its recorded node.
    Point(Point),
}

impl Endpoint {
    pub fn node(self) -> Option<NodeHandle> {
        match self {
            Self::Node(handle) => Some(handle),
            Self::Point(_) => None,
        }
    }

    pub fn is_dangling(self) -> bool {
        matches!(self, Self::Point(_))
    }
}

/// Which end of a relation an interaction refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkEnd {
    Source,
    Target,
}

/// The persisted part of a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationInfo {
    uuid: Option<RelationUuid>,
    label: String,
    from: NodeReference,
    to: NodeReference,
    vertices: Vec<Point>,
    anchors: Option<Value>,
}

impl RelationInfo {
    pub fn new(
        uuid: Option<RelationUuid>,
        label: impl Into<String>,
        from: NodeReference,
        to: NodeReference,
    ) -> Self {
        Self {
            uuid,
            label: label.into(),
            from,
            to,
            vertices: Vec::new(),
            anchors: None,
        }
    }

    pub fn uuid(&self) -> Option<&RelationUuid> {
        self.uuid.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn from(&self) -> &NodeReference {
        &self.from
    }

    pub fn to(&self) -> &NodeReference {
        &self.to
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.vertices = vertices;
    }

    pub fn anchors(&self) -> Option<&Value> {
        self.anchors.as_ref()
    }

    pub fn set_anchors(&mut self, anchors: Option<Value>) {
        self.anchors = anchors;
    }
}

/// A relation placed in the diagram.
///
/// `source_node`/`target_node` are the recorded endpoint nodes and always agree with
/// `info.from`/`info.to`. The `*_end` fields describe where the link is attached right now, which
/// differs only while an endpoint dangles on blank paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    info: RelationInfo,
    mode: RelationModeType,
    confirmed: bool,
    source_node: NodeHandle,
    target_node: NodeHandle,
    source_end: Endpoint,
    target_end: Endpoint,
    z: i64,
}

impl Relation {
    pub(crate) fn new(
        info: RelationInfo,
        source_node: NodeHandle,
        target_node: NodeHandle,
        mode: RelationModeType,
    ) -> Self {
        Self {
            info,
            mode,
            confirmed: false,
            source_node,
            target_node,
            source_end: Endpoint::Node(source_node),
            target_end: Endpoint::Node(target_node),
            z: 0,
        }
    }

    pub fn info(&self) -> &RelationInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut RelationInfo {
        &mut self.info
    }

    pub fn uuid(&self) -> Option<&RelationUuid> {
        self.info.uuid()
    }

    pub fn mode(&self) -> RelationModeType {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RelationModeType) {
        self.mode = mode;
    }

    /// True while the relation is styled as confirmed against the backend.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn set_confirmed(&mut self, confirmed: bool) {
        self.confirmed = confirmed;
    }

    /// Persisted relations are everything except faint suggestions.
    pub fn is_savable(&self) -> bool {
        self.mode != RelationModeType::Faint
    }

    pub fn source_node(&self) -> NodeHandle {
        self.source_node
    }

    pub fn target_node(&self) -> NodeHandle {
        self.target_node
    }

    pub fn touches(&self, node: NodeHandle) -> bool {
        self.source_node == node || self.target_node == node
    }

    pub fn end(&self, end: LinkEnd) -> Endpoint {
        match end {
            LinkEnd::Source => self.source_end,
            LinkEnd::Target => self.target_end,
        }
    }

    pub fn has_dangling_end(&self) -> bool {
        self.source_end.is_dangling() || self.target_end.is_dangling()
    }

    /// Attach one end to another node, moving the recorded reference with it.
    pub(crate) fn attach(&mut self, end: LinkEnd, node: NodeHandle, reference: NodeReference) {
        match end {
            LinkEnd::Source => {
                self.source_node = node;
                self.source_end = Endpoint::Node(node);
                self.info.from = reference;
            }
            LinkEnd::Target => {
                self.target_node = node;
                self.target_end = Endpoint::Node(node);
                self.info.to = reference;
            }
        }
    }

    /// Leave one end dangling at a point; the recorded node is kept.
    pub(crate) fn detach(&mut self, end: LinkEnd, point: Point) {
        match end {
            LinkEnd::Source => self.source_end = Endpoint::Point(point),
            LinkEnd::Target => self.target_end = Endpoint::Point(point),
        }
    }

    /// Snap both ends back onto the recorded source and target nodes.
    pub(crate) fn snap_to_recorded_nodes(&mut self) {
        self.source_end = Endpoint::Node(self.source_node);
        self.target_end = Endpoint::Node(self.target_node);
    }

    /// The state relation mode leaves behind: visual relations snap back onto their nodes and
    /// every relation is an unconfirmed `Normal` one. Faint relations are not touched.
    pub(crate) fn fold_to_normal(&mut self) {
        if self.mode == RelationModeType::Visual && self.has_dangling_end() {
            self.snap_to_recorded_nodes();
        }
        if self.mode != RelationModeType::Faint {
            self.mode = RelationModeType::Normal;
        }
        self.confirmed = false;
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: i64) {
        self.z = z;
    }
}
