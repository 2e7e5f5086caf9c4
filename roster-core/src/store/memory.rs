use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::member::Member;
use crate::page::{Page, PageRequest, SortDirection};
use crate::store::MemberStore;

/// In-memory `MemberStore` backend.
///
/// Serves as the default backend when no database is configured and as the
/// store used by the test suites. Ids come from an atomic sequence that is
/// kept ahead of any explicitly assigned id.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    members: RwLock<BTreeMap<i64, Member>>,
    sequence: AtomicI64,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_by_column(a: &Member, b: &Member, column: &str) -> Ordering {
    match column {
        "id" => a.id.cmp(&b.id),
        "first_name" => a.first_name.cmp(&b.first_name),
        "last_name" => a.last_name.cmp(&b.last_name),
        "email" => a.email.cmp(&b.email),
        "phone" => a.phone.cmp(&b.phone),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn save(&self, member: Member) -> Result<Member> {
        let id = match member.id {
            Some(id) => {
                self.sequence.fetch_max(id, AtomicOrdering::SeqCst);
                id
            }
            None => self.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1,
        };
        let saved = Member {
            id: Some(id),
            ..member
        };
        self.members.write().await.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Member>> {
        request.validate()?;

        let mut ordering = Vec::with_capacity(request.sort.len());
        for order in &request.sort {
            ordering.push((order.column()?, order.direction));
        }

        let members = self.members.read().await;
        let mut all: Vec<Member> = members.values().cloned().collect();
        drop(members);

        // BTreeMap iteration already yields id order; only re-sort on demand.
        if !ordering.is_empty() {
            all.sort_by(|a, b| {
                for (column, direction) in &ordering {
                    let cmp = match direction {
                        SortDirection::Asc => compare_by_column(a, b, column),
                        SortDirection::Desc => compare_by_column(b, a, column),
                    };
                    if cmp != Ordering::Equal {
                        return cmp;
                    }
                }
                a.id.cmp(&b.id)
            });
        }

        let total = all.len() as u64;
        let content: Vec<Member> = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();

        Ok(Page::new(content, total, request))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.members.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::SortOrder;

    fn member(first: &str, last: &str) -> Member {
        Member {
            id: None,
            first_name: first.into(),
            last_name: last.into(),
            email: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = InMemoryMemberStore::new();
        let ada = store.save(member("Ada", "Lovelace")).await.unwrap();
        let grace = store.save(member("Grace", "Hopper")).await.unwrap();
        assert_eq!(ada.id, Some(1));
        assert_eq!(grace.id, Some(2));
    }

    #[tokio::test]
    async fn explicit_id_keeps_sequence_ahead() {
        let store = InMemoryMemberStore::new();
        let explicit = Member {
            id: Some(7),
            ..member("Ada", "Lovelace")
        };
        store.save(explicit).await.unwrap();

        let next = store.save(member("Grace", "Hopper")).await.unwrap();
        assert_eq!(next.id, Some(8));
    }

    #[tokio::test]
    async fn save_with_id_overwrites() {
        let store = InMemoryMemberStore::new();
        let saved = store.save(member("Ada", "Lovelace")).await.unwrap();
        let updated = store
            .save(Member {
                first_name: "Augusta".into(),
                ..saved.clone()
            })
            .await
            .unwrap();
        assert_eq!(updated.id, saved.id);

        let found = store.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Augusta");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_a_noop() {
        let store = InMemoryMemberStore::new();
        store.delete(42).await.unwrap();
        store.delete(42).await.unwrap();
    }

    #[tokio::test]
    async fn pages_are_windows_with_totals() {
        let store = InMemoryMemberStore::new();
        for i in 0..25 {
            store.save(member(&format!("First{i:02}"), "Member")).await.unwrap();
        }

        let request = PageRequest {
            page: 1,
            size: 10,
            sort: Vec::new(),
        };
        let page = store.find_all(&request).await.unwrap();
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content[0].id, Some(11));
    }

    #[tokio::test]
    async fn sorts_by_requested_property() {
        let store = InMemoryMemberStore::new();
        store.save(member("Ada", "Lovelace")).await.unwrap();
        store.save(member("Grace", "Hopper")).await.unwrap();
        store.save(member("Edsger", "Dijkstra")).await.unwrap();

        let request = PageRequest {
            page: 0,
            size: 10,
            sort: vec![SortOrder::parse("firstName,desc").unwrap()],
        };
        let page = store.find_all(&request).await.unwrap();
        let names: Vec<_> = page.content.iter().map(|m| m.first_name.as_str()).collect();
        assert_eq!(names, vec!["Grace", "Edsger", "Ada"]);
    }

    #[tokio::test]
    async fn unknown_sort_property_is_a_validation_error() {
        let store = InMemoryMemberStore::new();
        let request = PageRequest {
            page: 0,
            size: 10,
            sort: vec![SortOrder {
                property: "shoeSize".into(),
                direction: SortDirection::Asc,
            }],
        };
        assert!(store.find_all(&request).await.is_err());
    }
}
