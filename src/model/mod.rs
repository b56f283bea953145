// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Placed nodes and relations, their backend counterparts, and the per-diagram heat configs.

pub mod api;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod handle;
pub mod heat;
pub mod ids;
pub mod node;
pub mod relation;

pub use api::{ApiNode, ApiRelation};
pub use handle::{NodeHandle, RelationHandle};
pub use heat::{heat_key, HeatConfig};
pub use ids::{DiagramId, Id, IdError, NodeUuid, RelationUuid};
pub use node::{NodeInfo, NodeReference, NodeStyle, Point, Size, DEFAULT_NODE_SHAPE};
pub use relation::{Endpoint, LinkEnd, Relation, RelationInfo, RelationModeType};
