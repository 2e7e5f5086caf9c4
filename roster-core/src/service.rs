//! Orchestration between the authoritative store and the search index.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::index::MemberIndex;
use crate::member::Member;
use crate::page::{Page, PageRequest};
use crate::store::MemberStore;

/// Write-through service over the member store and the search index.
///
/// Writes hit the store first and the index second; there is no rollback of
/// the store when the index fails, the error is surfaced and the store's
/// state stands. Reads come from the store, free-text search from the index.
pub struct MemberService {
    store: Arc<dyn MemberStore>,
    index: Arc<dyn MemberIndex>,
}

impl std::fmt::Debug for MemberService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberService").finish_non_exhaustive()
    }
}

impl MemberService {
    pub fn new(store: Arc<dyn MemberStore>, index: Arc<dyn MemberIndex>) -> Self {
        Self { store, index }
    }

    /// Persist the member, then mirror it into the index under the id the
    /// store assigned.
    pub async fn save(&self, member: Member) -> Result<Member> {
        debug!("Request to save member: {member:?}");
        let saved = self.store.save(member).await?;
        self.index.index(&saved).await?;
        Ok(saved)
    }

    pub async fn find_all(&self, request: &PageRequest) -> Result<Page<Member>> {
        debug!("Request to get a page of members");
        self.store.find_all(request).await
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<Member>> {
        debug!("Request to get member: {id}");
        self.store.find_by_id(id).await
    }

    /// Remove the member from the store, then from the index. The order is
    /// fixed: once the authoritative record is gone no stale search hit may
    /// outlive it through a reversed interleaving.
    pub async fn delete(&self, id: i64) -> Result<()> {
        debug!("Request to delete member: {id}");
        self.store.delete(id).await?;
        self.index.delete(id).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Member>> {
        debug!("Request to search members for query {query}");
        self.index.query(query).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::RosterError;
    use crate::index::InvertedMemberIndex;
    use crate::store::InMemoryMemberStore;

    fn member(first: &str, last: &str) -> Member {
        Member {
            id: None,
            first_name: first.into(),
            last_name: last.into(),
            email: None,
            phone: None,
        }
    }

    fn service_with(
        store: Arc<dyn MemberStore>,
        index: Arc<dyn MemberIndex>,
    ) -> MemberService {
        MemberService::new(store, index)
    }

    fn in_memory_service() -> (Arc<InMemoryMemberStore>, Arc<InvertedMemberIndex>, MemberService) {
        let store = Arc::new(InMemoryMemberStore::new());
        let index = Arc::new(InvertedMemberIndex::new());
        let service = service_with(store.clone(), index.clone());
        (store, index, service)
    }

    /// Index double that refuses every write.
    struct FailingIndex;

    #[async_trait]
    impl MemberIndex for FailingIndex {
        async fn index(&self, _member: &Member) -> Result<()> {
            Err(RosterError::Index("index unavailable".to_string()))
        }

        async fn delete(&self, _id: i64) -> Result<()> {
            Err(RosterError::Index("index unavailable".to_string()))
        }

        async fn query(&self, _query_string: &str) -> Result<Vec<Member>> {
            Err(RosterError::Index("index unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn save_writes_store_then_index() {
        let (store, index, service) = in_memory_service();

        let saved = service.save(member("Ada", "Lovelace")).await.unwrap();
        let id = saved.id.unwrap();

        assert_eq!(store.find_by_id(id).await.unwrap(), Some(saved.clone()));
        let hits = index.query("Ada").await.unwrap();
        assert_eq!(hits, vec![saved]);
    }

    #[tokio::test]
    async fn index_failure_leaves_the_store_intact() {
        let store = Arc::new(InMemoryMemberStore::new());
        let service = service_with(store.clone(), Arc::new(FailingIndex));

        let err = service.save(member("Ada", "Lovelace")).await.unwrap_err();
        assert!(matches!(err, RosterError::Index(_)));

        // the store committed before the index refused
        assert!(store.find_by_id(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_from_store_and_index() {
        let (store, index, service) = in_memory_service();
        let saved = service.save(member("Ada", "Lovelace")).await.unwrap();
        let id = saved.id.unwrap();

        service.delete(id).await.unwrap();

        assert_eq!(store.find_by_id(id).await.unwrap(), None);
        assert!(index.query("Ada").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_delete_precedes_index_delete() {
        let store = Arc::new(InMemoryMemberStore::new());
        let saved = store.save(member("Ada", "Lovelace")).await.unwrap();
        let service = service_with(store.clone(), Arc::new(FailingIndex));

        let err = service.delete(saved.id.unwrap()).await.unwrap_err();
        assert!(matches!(err, RosterError::Index(_)));

        // the authoritative record is gone even though the index refused
        assert_eq!(store.find_by_id(saved.id.unwrap()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_converges_store_and_index() {
        let (store, index, service) = in_memory_service();
        let saved = service.save(member("Ada", "Lovelace")).await.unwrap();

        let renamed = Member {
            last_name: "King".into(),
            ..saved
        };
        service.save(renamed.clone()).await.unwrap();

        assert_eq!(
            store.find_by_id(renamed.id.unwrap()).await.unwrap(),
            Some(renamed.clone())
        );
        assert!(index.query("Lovelace").await.unwrap().is_empty());
        assert_eq!(index.query("King").await.unwrap(), vec![renamed]);
    }
}
