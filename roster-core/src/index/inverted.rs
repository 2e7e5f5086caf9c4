use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::index::tokenizer::{tokenize_query, tokenize_text};
use crate::index::MemberIndex;
use crate::member::Member;

/// In-process inverted index over member records.
///
/// Postings map tokens to document ids; documents are scored by the number
/// of distinct query tokens they match and returned best-first.
#[derive(Debug, Default)]
pub struct InvertedMemberIndex {
    inner: RwLock<IndexInner>,
}

#[derive(Debug, Default)]
struct IndexInner {
    postings: HashMap<String, HashSet<i64>>,
    tokens_by_doc: HashMap<i64, HashSet<String>>,
    documents: HashMap<i64, Member>,
}

impl IndexInner {
    fn remove_document(&mut self, id: i64) {
        let Some(tokens) = self.tokens_by_doc.remove(&id) else {
            return;
        };
        for token in tokens {
            if let Some(ids) = self.postings.get_mut(&token) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.postings.remove(&token);
                }
            }
        }
        self.documents.remove(&id);
    }
}

impl InvertedMemberIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberIndex for InvertedMemberIndex {
    async fn index(&self, member: &Member) -> Result<()> {
        let id = member.id.ok_or_else(|| {
            RosterError::Index("cannot index an unpersisted member".to_string())
        })?;

        let mut tokens: HashSet<String> = HashSet::new();
        for value in member.indexed_values() {
            tokens.extend(tokenize_text(value));
        }

        let mut inner = self.inner.write().await;
        inner.remove_document(id);
        for token in &tokens {
            inner.postings.entry(token.clone()).or_default().insert(id);
        }
        inner.tokens_by_doc.insert(id, tokens);
        inner.documents.insert(id, member.clone());

        debug!("Indexed member {id}");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner.write().await.remove_document(id);
        Ok(())
    }

    async fn query(&self, query_string: &str) -> Result<Vec<Member>> {
        let query_tokens = tokenize_query(query_string);
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }

        let inner = self.inner.read().await;
        let mut scores: HashMap<i64, usize> = HashMap::new();
        for token in &query_tokens {
            if let Some(ids) = inner.postings.get(token) {
                for id in ids {
                    *scores.entry(*id).or_insert(0) += 1;
                }
            }
        }

        let mut hits: Vec<(i64, usize)> = scores.into_iter().collect();
        hits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Ok(hits
            .into_iter()
            .filter_map(|(id, _)| inner.documents.get(&id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, first: &str, last: &str, email: Option<&str>) -> Member {
        Member {
            id: Some(id),
            first_name: first.into(),
            last_name: last.into(),
            email: email.map(str::to_string),
            phone: None,
        }
    }

    #[tokio::test]
    async fn indexes_and_queries_by_any_field() {
        let index = InvertedMemberIndex::new();
        index
            .index(&member(1, "Ada", "Lovelace", Some("ada@analytical.org")))
            .await
            .unwrap();

        for query in ["Ada", "lovelace", "analytical.org"] {
            let hits = index.query(query).await.unwrap();
            assert_eq!(hits.len(), 1, "query {query:?} should match");
            assert_eq!(hits[0].id, Some(1));
        }
    }

    #[tokio::test]
    async fn rejects_unpersisted_members() {
        let index = InvertedMemberIndex::new();
        let unsaved = Member {
            id: None,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            phone: None,
        };
        assert!(index.index(&unsaved).await.is_err());
    }

    #[tokio::test]
    async fn upsert_replaces_previous_postings() {
        let index = InvertedMemberIndex::new();
        index.index(&member(1, "Ada", "Lovelace", None)).await.unwrap();
        index.index(&member(1, "Augusta", "King", None)).await.unwrap();

        assert!(index.query("Lovelace").await.unwrap().is_empty());
        let hits = index.query("King").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Augusta");
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let index = InvertedMemberIndex::new();
        index.index(&member(1, "Ada", "Lovelace", None)).await.unwrap();
        index.delete(1).await.unwrap();
        assert!(index.query("Ada").await.unwrap().is_empty());

        // a second delete is harmless
        index.delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn better_matches_rank_first() {
        let index = InvertedMemberIndex::new();
        index.index(&member(1, "Ada", "Lovelace", None)).await.unwrap();
        index.index(&member(2, "Ada", "Byron", None)).await.unwrap();

        let hits = index.query("Ada Byron").await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, Some(2));
        assert_eq!(hits[1].id, Some(1));
    }

    #[tokio::test]
    async fn empty_query_matches_nothing() {
        let index = InvertedMemberIndex::new();
        index.index(&member(1, "Ada", "Lovelace", None)).await.unwrap();
        assert!(index.query("  ,.  ").await.unwrap().is_empty());
    }
}
