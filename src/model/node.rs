// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::NodeUuid;

/// Identifies one placed shape of a logical node.
///
/// A backend node may be placed several times in the same diagram; `index` tells the copies
/// apart. Within one diagram the pair `(uuid, index)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeReference {
    uuid: NodeUuid,
    index: u32,
}

impl NodeReference {
    pub fn new(uuid: NodeUuid, index: u32) -> Self {
        Self { uuid, index }
    }

    pub fn uuid(&self) -> &NodeUuid {
        &self.uuid
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: u32) {
        self.index = index;
    }
}

impl fmt::Display for NodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.uuid, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shape size. `-1 x -1` means the shape has not been sized yet and the surface picks a default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const UNSET: Size = Size {
        width: -1.0,
        height: -1.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::UNSET
    }
}

/// The restylable part of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: String,
    pub color: Option<String>,
}

pub const DEFAULT_NODE_SHAPE: &str = "rectangle";

/// A node placed in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInfo {
    reference: NodeReference,
    label: String,
    name: String,
    style: NodeStyle,
    position: Point,
    size: Size,
    z: i64,
}

impl NodeInfo {
    pub fn new(
        uuid: NodeUuid,
        label: impl Into<String>,
        name: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            reference: NodeReference::new(uuid, 0),
            label: label.into(),
            name: name.into(),
            style: NodeStyle {
                shape: DEFAULT_NODE_SHAPE.to_owned(),
                color: None,
            },
            position,
            size: Size::UNSET,
            z: 0,
        }
    }

    pub fn with_reference(mut self, reference: NodeReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_z(mut self, z: i64) -> Self {
        self.z = z;
        self
    }

    pub fn reference(&self) -> &NodeReference {
        &self.reference
    }

    pub(crate) fn reference_mut(&mut self) -> &mut NodeReference {
        &mut self.reference
    }

    pub fn uuid(&self) -> &NodeUuid {
        self.reference.uuid()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: NodeStyle) {
        self.style = style;
    }

    pub fn shape(&self) -> &str {
        &self.style.shape
    }

    pub fn color(&self) -> Option<&str> {
        self.style.color.as_deref()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: i64) {
        self.z = z;
    }
}
