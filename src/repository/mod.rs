// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The backend collaborator: node lookups, relation lookups and diagram persistence.

pub mod memory;

use std::future::Future;

use futures::future::join_all;

use crate::model::{ApiNode, ApiRelation, DiagramId, NodeUuid};
use crate::store::StoreError;

pub use memory::InMemoryRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("relations of node {uuid} could not be fetched: {reason}")]
    RelationsUnavailable { uuid: NodeUuid, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub trait GraphRepository: Send + Sync {
    /// `Ok(None)` when the backend does not know the node.
    fn fetch_node(
        &self,
        uuid: &NodeUuid,
    ) -> impl Future<Output = Result<Option<ApiNode>, RepositoryError>> + Send;

    /// Every relation with `uuid` as source or target.
    fn fetch_relations_of_node(
        &self,
        uuid: &NodeUuid,
    ) -> impl Future<Output = Result<Vec<ApiRelation>, RepositoryError>> + Send;

    fn persist_diagram(
        &self,
        diagram_id: &DiagramId,
        json: String,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Fetch the relations of every node concurrently and keep whatever succeeded.
///
/// A failed fetch is logged and contributes nothing; it never aborts the others.
pub async fn fetch_all_settled<R: GraphRepository>(
    repository: &R,
    uuids: &[NodeUuid],
) -> Vec<ApiRelation> {
    let results = join_all(
        uuids
            .iter()
            .map(|uuid| repository.fetch_relations_of_node(uuid)),
    )
    .await;

    let mut fetched = Vec::new();
    for (uuid, result) in uuids.iter().zip(results) {
        match result {
            Ok(relations) => fetched.extend(relations),
            Err(err) => tracing::warn!(node = %uuid, error = %err, "relation fetch failed"),
        }
    }
    fetched
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{fetch_all_settled, GraphRepository, InMemoryRepository};
    use crate::model::fixtures::{api_relation, nid};
    use crate::model::ApiNode;

    fn backend() -> InMemoryRepository {
        InMemoryRepository::new()
            .with_node(ApiNode::new(nid("a1"), "A", "Person"))
            .with_node(ApiNode::new(nid("b1"), "B", "Person"))
            .with_node(ApiNode::new(nid("c1"), "C", "Person"))
            .with_relation(api_relation("r1", "KNOWS", "a1", "b1"))
            .with_relation(api_relation("r2", "KNOWS", "b1", "c1"))
    }

    #[tokio::test]
    async fn settled_fetch_collects_every_node() {
        let repository = backend();
        let fetched = fetch_all_settled(&repository, &[nid("a1"), nid("c1")]).await;

        let ids = fetched
            .iter()
            .map(|relation| relation.relation_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[rstest]
    #[case::first("a1", vec!["r1", "r2"])]
    #[case::second("b1", vec!["r1"])]
    #[tokio::test]
    async fn failed_fetch_does_not_abort_others(
        #[case] failing: &str,
        #[case] expected: Vec<&str>,
    ) {
        let repository = backend().fail_relations_of(nid(failing));
        let fetched = fetch_all_settled(&repository, &[nid("a1"), nid("b1")]).await;

        let mut ids = fetched
            .iter()
            .map(|relation| relation.relation_id.as_str())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn unknown_node_is_none() {
        let repository = backend();
        assert!(repository.fetch_node(&nid("zz")).await.expect("fetch").is_none());
        assert!(repository.fetch_node(&nid("a1")).await.expect("fetch").is_some());
    }
}
