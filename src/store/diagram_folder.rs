// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::{ApiNode, ApiRelation, DiagramId, Id, IdError, NodeUuid};
use crate::repository::{GraphRepository, RepositoryError};

pub const BACKEND_FILENAME: &str = "backend.json";
pub const DIAGRAM_SUFFIX: &str = ".diagram.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid id {value:?} in {path:?}: {source}")]
    InvalidId {
        path: PathBuf,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Additionally syncs the written file and its directory where the platform allows it.
    Durable,
}

/// Nodes and relations as the backend knows them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendSnapshot {
    pub nodes: BTreeMap<NodeUuid, ApiNode>,
    pub relations: Vec<ApiRelation>,
}

impl BackendSnapshot {
    pub fn relations_of(&self, uuid: &NodeUuid) -> Vec<ApiRelation> {
        self.relations
            .iter()
            .filter(|relation| relation.touches(uuid))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BackendJson {
    #[serde(default)]
    nodes: Vec<BackendNodeJson>,
    #[serde(default)]
    relations: Vec<BackendRelationJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendNodeJson {
    node_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendRelationJson {
    relation_id: String,
    #[serde(rename = "type")]
    relation_type: String,
    from: String,
    to: String,
}

#[derive(Debug, Clone)]
pub struct DiagramFolder {
    root: PathBuf,
    backend_path: Option<PathBuf>,
    durability: WriteDurability,
}

impl DiagramFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            backend_path: None,
            durability: WriteDurability::default(),
        }
    }

    /// Read the backend snapshot from `path` instead of `<root>/backend.json`.
    pub fn with_backend_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend_path = Some(path.into());
        self
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend_path(&self) -> PathBuf {
        self.backend_path
            .clone()
            .unwrap_or_else(|| self.root.join(BACKEND_FILENAME))
    }

    pub fn diagram_path(&self, diagram_id: &DiagramId) -> PathBuf {
        self.root.join(format!("{diagram_id}{DIAGRAM_SUFFIX}"))
    }

    /// Stored JSON of a diagram, or an empty string if it was never saved.
    pub fn load_diagram(&self, diagram_id: &DiagramId) -> Result<String, StoreError> {
        let path = self.diagram_path(diagram_id);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(json),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub fn save_diagram(&self, diagram_id: &DiagramId, json: &str) -> Result<(), StoreError> {
        tracing::debug!(diagram = %diagram_id, bytes = json.len(), "saving diagram");
        write_atomic(
            &self.root,
            &self.diagram_path(diagram_id),
            json.as_bytes(),
            self.durability,
        )
    }

    /// Ids of all stored diagrams, sorted. Files with names that are not valid ids are skipped.
    pub fn diagram_ids(&self) -> Result<Vec<DiagramId>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let file_name = entry.file_name();
            let Some(stem) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(DIAGRAM_SUFFIX))
            else {
                continue;
            };
            if let Ok(id) = DiagramId::new(stem) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Read `backend.json`. A missing file is an empty backend.
    pub fn load_backend(&self) -> Result<BackendSnapshot, StoreError> {
        let path = self.backend_path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(BackendSnapshot::default())
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let parsed: BackendJson =
            serde_json::from_str(&json).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;

        let mut snapshot = BackendSnapshot::default();
        for node in parsed.nodes {
            let node_id: NodeUuid = parse_id(&path, &node.node_id)?;
            let api = ApiNode::new(node_id.clone(), node.name, node.label);
            snapshot.nodes.insert(node_id, api);
        }
        for relation in parsed.relations {
            snapshot.relations.push(ApiRelation::new(
                parse_id(&path, &relation.relation_id)?,
                relation.relation_type,
                parse_id(&path, &relation.from)?,
                parse_id(&path, &relation.to)?,
            ));
        }
        Ok(snapshot)
    }

    pub fn save_backend(&self, snapshot: &BackendSnapshot) -> Result<(), StoreError> {
        let path = self.backend_path();
        let json = BackendJson {
            nodes: snapshot
                .nodes
                .values()
                .map(|node| BackendNodeJson {
                    node_id: node.node_id.to_string(),
                    name: node.name.clone(),
                    label: node.label.clone(),
                })
                .collect(),
            relations: snapshot
                .relations
                .iter()
                .map(|relation| BackendRelationJson {
                    relation_id: relation.relation_id.to_string(),
                    relation_type: relation.relation_type.clone(),
                    from: relation.from.to_string(),
                    to: relation.to.to_string(),
                })
                .collect(),
        };
        let contents = serde_json::to_string_pretty(&json).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let dir = path.parent().unwrap_or(self.root.as_path()).to_path_buf();
        write_atomic(&dir, &path, contents.as_bytes(), self.durability)
    }
}

impl GraphRepository for DiagramFolder {
    async fn fetch_node(&self, uuid: &NodeUuid) -> Result<Option<ApiNode>, RepositoryError> {
        Ok(self.load_backend()?.nodes.remove(uuid))
    }

    async fn fetch_relations_of_node(
        &self,
        uuid: &NodeUuid,
    ) -> Result<Vec<ApiRelation>, RepositoryError> {
        Ok(self.load_backend()?.relations_of(uuid))
    }

    async fn persist_diagram(
        &self,
        diagram_id: &DiagramId,
        json: String,
    ) -> Result<(), RepositoryError> {
        self.save_diagram(diagram_id, &json)?;
        Ok(())
    }
}

fn parse_id<T>(path: &Path, value: &str) -> Result<Id<T>, StoreError> {
    Id::new(value).map_err(|source| StoreError::InvalidId {
        path: path.to_path_buf(),
        value: value.to_owned(),
        source,
    })
}

/// Remove the temp file at `tmp_path` when `result` is an error.
fn discard_on_error<T>(tmp_path: &Path, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if result.is_err() {
        let _ = fs::remove_file(tmp_path);
    }
    result
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

/// Write `contents` to `path` through a temp file in the same directory and an atomic rename.
fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(root).map_err(|source| StoreError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent or file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".relgraph.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    let filled = file
        .write_all(contents)
        .and_then(|()| match durability {
            WriteDurability::Durable => file.sync_all(),
            WriteDurability::BestEffort => Ok(()),
        })
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        });
    drop(file);
    discard_on_error(&tmp_path, filled)?;

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
