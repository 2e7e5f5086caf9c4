//! The authoritative member store port and its backends.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::member::Member;
use crate::page::{Page, PageRequest};

pub use memory::InMemoryMemberStore;
pub use postgres::PostgresMemberStore;

/// Durable primary storage for members, keyed by numeric id.
///
/// `save` assigns an id when the member carries none and upserts at the
/// given id otherwise. `delete` of an unknown id is a successful no-op.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn save(&self, member: Member) -> Result<Member>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>>;
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Member>>;
    async fn delete(&self, id: i64) -> Result<()>;
}
