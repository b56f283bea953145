// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Relgraph: editing core for diagrams over graph data.
//!
//! Placed nodes and relations live in a [`registry::Diagram`]; every edit is a
//! [`commands::Command`] kept on an undo/redo [`history::History`]. The relation mode in
//! [`relation_mode`] reconciles the diagram against the relations a backend knows about.

pub mod commands;
pub mod editor;
pub mod graph;
pub mod history;
pub mod model;
pub mod registry;
pub mod relation_mode;
pub mod repository;
pub mod serial;
pub mod store;
