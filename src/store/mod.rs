// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence on disk.
//!
//! A diagram folder holds a backend snapshot (`backend.json`) and one `<id>.diagram.json` file
//! per diagram.

pub mod diagram_folder;

pub use diagram_folder::{
    BackendSnapshot, DiagramFolder, StoreError, WriteDurability, BACKEND_FILENAME,
    DIAGRAM_SUFFIX,
};
