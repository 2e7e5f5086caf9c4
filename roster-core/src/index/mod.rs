//! The secondary full-text index port and its backend.

pub mod inverted;
pub mod tokenizer;

use async_trait::async_trait;

use crate::error::Result;
use crate::member::Member;

pub use inverted::InvertedMemberIndex;

/// Full-text index mirroring the member store.
///
/// Documents are keyed by the member id. The index is eventually consistent
/// with the store and is never the source of truth; a failure here must
/// leave the store untouched.
#[async_trait]
pub trait MemberIndex: Send + Sync {
    /// Upsert the member's document. The member must carry an id.
    async fn index(&self, member: &Member) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// Free-text query; results are members whose indexed fields matched,
    /// best match first.
    async fn query(&self, query_string: &str) -> Result<Vec<Member>>;
}
