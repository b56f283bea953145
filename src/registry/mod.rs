// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bidirectional registries between stable handles and placed nodes/relations.

pub mod diagram;
pub mod nodes;
pub mod relations;

pub use diagram::{Diagram, RemovedNode};
pub use nodes::NodeRegistry;
pub use relations::RelationRegistry;

#[cfg(test)]
mod tests;
