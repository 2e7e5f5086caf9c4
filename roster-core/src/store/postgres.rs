use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::member::Member;
use crate::page::{Page, PageRequest};
use crate::store::MemberStore;

/// PostgreSQL-backed implementation of the `MemberStore` port.
#[derive(Clone, Debug)]
pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub async fn connect(connection_string: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL database");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(connection_string)
            .await
            .map_err(|e| RosterError::Store(format!("Failed to connect to PostgreSQL: {e}")))?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// First-run schema creation; safe to call on every startup.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS members (
                id BIGSERIAL PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT,
                phone TEXT
            )
            "#,
        )
        .execute(self.pool())
        .await
        .map_err(|e| RosterError::Store(format!("Failed to initialize schema: {e}")))?;

        info!("Database schema initialized");
        Ok(())
    }
}

fn map_write_error(e: sqlx::Error, context: &str) -> RosterError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() || db_err.is_check_violation() {
            return RosterError::Validation(format!("{context}: {db_err}"));
        }
    }
    RosterError::Store(format!("{context}: {e}"))
}

#[async_trait]
impl MemberStore for PostgresMemberStore {
    async fn save(&self, member: Member) -> Result<Member> {
        match member.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO members (first_name, last_name, email, phone)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&member.first_name)
                .bind(&member.last_name)
                .bind(&member.email)
                .bind(&member.phone)
                .fetch_one(self.pool())
                .await
                .map_err(|e| map_write_error(e, "Failed to create member"))?;

                debug!("Created member {id}");
                Ok(Member {
                    id: Some(id),
                    ..member
                })
            }
            Some(id) => {
                let mut tx = self
                    .pool()
                    .begin()
                    .await
                    .map_err(|e| RosterError::Store(format!("Failed to start transaction: {e}")))?;

                sqlx::query(
                    r#"
                    INSERT INTO members (id, first_name, last_name, email, phone)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO UPDATE SET
                        first_name = EXCLUDED.first_name,
                        last_name = EXCLUDED.last_name,
                        email = EXCLUDED.email,
                        phone = EXCLUDED.phone
                    "#,
                )
                .bind(id)
                .bind(&member.first_name)
                .bind(&member.last_name)
                .bind(&member.email)
                .bind(&member.phone)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_write_error(e, "Failed to update member"))?;

                // keep the id sequence ahead of explicitly assigned ids
                sqlx::query(
                    "SELECT setval(pg_get_serial_sequence('members', 'id'), \
                     (SELECT MAX(id) FROM members))",
                )
                .execute(&mut *tx)
                .await
                .map_err(|e| RosterError::Store(format!("Failed to advance id sequence: {e}")))?;

                tx.commit()
                    .await
                    .map_err(|e| RosterError::Store(format!("Failed to commit transaction: {e}")))?;

                debug!("Updated member {id}");
                Ok(member)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT id, first_name, last_name, email, phone FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| RosterError::Store(format!("Failed to get member by id: {e}")))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<Member>> {
        request.validate()?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(self.pool())
            .await
            .map_err(|e| RosterError::Store(format!("Failed to count members: {e}")))?;

        let mut sql =
            String::from("SELECT id, first_name, last_name, email, phone FROM members ORDER BY ");
        if request.sort.is_empty() {
            sql.push_str("id ASC");
        } else {
            let mut clauses = Vec::with_capacity(request.sort.len());
            for order in &request.sort {
                // column() only yields whitelisted identifiers
                clauses.push(format!("{} {}", order.column()?, order.direction.as_sql()));
            }
            sql.push_str(&clauses.join(", "));
            sql.push_str(", id ASC");
        }
        sql.push_str(" LIMIT $1 OFFSET $2");

        let content = sqlx::query_as::<_, Member>(&sql)
            .bind(request.size as i64)
            .bind(request.offset() as i64)
            .fetch_all(self.pool())
            .await
            .map_err(|e| RosterError::Store(format!("Failed to list members: {e}")))?;

        Ok(Page::new(content, total as u64, request))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        // No row is not an error; delete is idempotent.
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| RosterError::Store(format!("Failed to delete member: {e}")))?;

        debug!("Deleted member {id}");
        Ok(())
    }
}
