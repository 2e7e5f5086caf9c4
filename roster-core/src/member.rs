use serde::{Deserialize, Serialize};

/// The member entity managed by this service.
///
/// `id` is `None` exactly while the member is unpersisted; the store assigns
/// it on create and it is immutable afterwards. The same value keys the
/// authoritative row and the search-index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Member {
    /// The field values the search index derives tokens from.
    pub fn indexed_values(&self) -> Vec<&str> {
        let mut values = vec![self.first_name.as_str(), self.last_name.as_str()];
        if let Some(email) = self.email.as_deref() {
            values.push(email);
        }
        if let Some(phone) = self.phone.as_deref() {
            values.push(phone);
        }
        values
    }
}
