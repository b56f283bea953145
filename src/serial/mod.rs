// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! On-disk diagram JSON.
//!
//! ```json
//! {
//!   "nodes": [{ "label", "ref": {"uuid", "index"}, "name", "shape", "x", "y", "size", "color"?, "z" }],
//!   "relations": [{ "uuid"?, "label", "from", "to", "vertices"?, "anchors"?, "z" }],
//!   "heatConfigs": { "<label>-<attribute>": HeatConfig }
//! }
//! ```
//!
//! Only savable relations are written, and relation modes are not stored: everything loads
//! back as `Normal`.

use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    HeatConfig, Id, IdError, NodeHandle, NodeInfo, NodeReference, NodeStyle, NodeUuid, Point,
    RelationModeType, RelationUuid, Size, DEFAULT_NODE_SHAPE,
};
use crate::registry::Diagram;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("malformed diagram json: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid id {value:?} in diagram json: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: IdError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SerializableGraph {
    #[serde(default)]
    pub nodes: Vec<NodeJson>,
    #[serde(default)]
    pub relations: Vec<RelationJson>,
    #[serde(default)]
    pub heat_configs: BTreeMap<String, HeatConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceJson {
    pub uuid: String,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointJson {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SizeJson {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeJson {
    pub label: String,
    #[serde(rename = "ref")]
    pub reference: ReferenceJson,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RelationJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, alias = "name")]
    pub label: String,
    pub from: ReferenceJson,
    pub to: ReferenceJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<PointJson>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
}

fn default_shape() -> String {
    DEFAULT_NODE_SHAPE.to_owned()
}

impl From<&NodeReference> for ReferenceJson {
    fn from(reference: &NodeReference) -> Self {
        Self {
            uuid: reference.uuid().to_string(),
            index: reference.index(),
        }
    }
}

impl From<Point> for PointJson {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<PointJson> for Point {
    fn from(point: PointJson) -> Self {
        Point::new(point.x, point.y)
    }
}

impl SerializableGraph {
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let nodes = diagram
            .nodes()
            .iter()
            .map(|(_, info)| NodeJson {
                label: info.label().to_owned(),
                reference: info.reference().into(),
                name: info.name().to_owned(),
                shape: info.shape().to_owned(),
                x: info.position().x,
                y: info.position().y,
                size: Some(SizeJson {
                    width: info.size().width,
                    height: info.size().height,
                }),
                color: info.color().map(str::to_owned),
                z: Some(info.z()),
            })
            .collect();

        let relations = diagram
            .relations()
            .savable_relations()
            .map(|(_, relation)| {
                let info = relation.info();
                RelationJson {
                    uuid: info.uuid().map(ToString::to_string),
                    label: info.label().to_owned(),
                    from: info.from().into(),
                    to: info.to().into(),
                    vertices: (!info.vertices().is_empty())
                        .then(|| info.vertices().iter().copied().map(PointJson::from).collect()),
                    anchors: info.anchors().cloned(),
                    z: Some(relation.z()),
                }
            })
            .collect();

        Self {
            nodes,
            relations,
            heat_configs: diagram.heat_configs().clone(),
        }
    }

    /// Build a diagram. Relations whose endpoints are not among the loaded nodes are dropped.
    pub fn into_diagram(self) -> Result<Diagram, SerialError> {
        let mut diagram = Diagram::new();
        let mut by_reference = HashMap::<(String, u32), NodeHandle>::new();

        for node in self.nodes {
            let uuid: NodeUuid = parse_id(&node.reference.uuid)?;
            let size = node
                .size
                .map_or(Size::UNSET, |size| Size::new(size.width, size.height));
            let info =
                NodeInfo::new(uuid.clone(), node.label, node.name, Point::new(node.x, node.y))
                    .with_reference(NodeReference::new(uuid, node.reference.index))
                    .with_style(NodeStyle {
                        shape: node.shape,
                        color: node.color,
                    })
                    .with_size(size);
            let z = node.z.unwrap_or_else(|| diagram.next_z());
            let info = info.with_z(z);
            let handle = diagram.add_loaded_node(info);
            by_reference
                .entry((node.reference.uuid, node.reference.index))
                .or_insert(handle);
        }

        for relation in self.relations {
            let source = by_reference.get(&(relation.from.uuid.clone(), relation.from.index));
            let target = by_reference.get(&(relation.to.uuid.clone(), relation.to.index));
            let (Some(&source), Some(&target)) = (source, target) else {
                tracing::warn!(
                    uuid = relation.uuid.as_deref().unwrap_or("-"),
                    from = %relation.from.uuid,
                    from_index = relation.from.index,
                    to = %relation.to.uuid,
                    to_index = relation.to.index,
                    "dropping relation with missing endpoint"
                );
                continue;
            };
            let uuid: Option<RelationUuid> = relation.uuid.as_deref().map(parse_id).transpose()?;
            let Some(handle) = diagram.add_relation(
                source,
                target,
                uuid,
                relation.label,
                RelationModeType::Normal,
            ) else {
                continue;
            };
            if let Some(placed) = diagram.relation_mut(handle) {
                if let Some(vertices) = relation.vertices {
                    placed
                        .info_mut()
                        .set_vertices(vertices.into_iter().map(Point::from).collect());
                }
                placed.info_mut().set_anchors(relation.anchors);
                if let Some(z) = relation.z {
                    placed.set_z(z);
                }
            }
        }

        for (key, config) in self.heat_configs {
            diagram.insert_heat_config(key, config);
        }

        Ok(diagram)
    }
}

fn parse_id<T>(value: &str) -> Result<Id<T>, SerialError> {
    Id::new(value).map_err(|source| SerialError::InvalidId {
        value: value.to_owned(),
        source,
    })
}

pub fn to_json(diagram: &Diagram) -> Result<String, SerialError> {
    Ok(serde_json::to_string(&SerializableGraph::from_diagram(diagram))?)
}

/// Parse a stored diagram. Blank input and `{}` are an empty diagram.
pub fn from_json(json: &str) -> Result<Diagram, SerialError> {
    let trimmed = json.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(Diagram::new());
    }
    serde_json::from_str::<SerializableGraph>(trimmed)?.into_diagram()
}

/// JSON schema of the diagram file.
pub fn graph_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(SerializableGraph)).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests;
