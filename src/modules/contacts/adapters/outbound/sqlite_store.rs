//! SQLite-backed contact and telephone tables.
//!
//! [`SqliteContactStore`] wraps a `sqlx::SqlitePool` with foreign keys enabled
//! and implements both persistence ports. Contacts are always returned with
//! their telephones, read with a second query against `telephone.contact_id`.
//!
//! The schema lives in `migrations/` and is embedded with `sqlx::migrate!`.
//! [`SqliteContactStore::synchronize`] applies pending migrations, so it can run
//! on every start.

use crate::modules::contacts::core::contact::Contact;
use crate::modules::contacts::core::ports::{
    ContactFilter, ContactRepository, RepositoryError, TelephoneFilter, TelephoneRepository,
};
use crate::modules::contacts::core::telephone::Telephone;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, sqlx::FromRow)]
struct TelephoneRow {
    id: i64,
    number: String,
    kind: String,
    contact_id: Option<i64>,
}

impl From<TelephoneRow> for Telephone {
    fn from(row: TelephoneRow) -> Self {
        Self {
            id: Some(row.id),
            number: row.number,
            kind: row.kind,
            contact_id: row.contact_id,
        }
    }
}

impl ContactRow {
    fn into_contact(self, telephones: Vec<Telephone>) -> Contact {
        Contact {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            telephones,
        }
    }
}

fn backend(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(err.to_string())
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[derive(Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Opens a pool on `url`. An in-memory database lives and dies with its
    /// single connection, so the pool is pinned to one connection that never expires.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .foreign_keys(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(backend)?;
        Ok(Self { pool })
    }

    pub async fn synchronize(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| RepositoryError::Backend(err.to_string()))?;
        debug!("contact schema synchronized");
        Ok(())
    }

    async fn telephones_of(&self, contact_id: i64) -> Result<Vec<Telephone>, RepositoryError> {
        let rows = sqlx::query_as::<_, TelephoneRow>(
            "SELECT id, number, type AS kind, contact_id FROM telephone
             WHERE contact_id = ? ORDER BY id",
        )
        .bind(contact_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(Telephone::from).collect())
    }

    /// Attaches every owned telephone to its contact, keeping the row order of `rows`.
    async fn hydrate(&self, rows: Vec<ContactRow>) -> Result<Vec<Contact>, RepositoryError> {
        let telephone_rows = sqlx::query_as::<_, TelephoneRow>(
            "SELECT id, number, type AS kind, contact_id FROM telephone
             WHERE contact_id IS NOT NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut owned: HashMap<i64, Vec<Telephone>> = HashMap::new();
        for row in telephone_rows {
            if let Some(contact_id) = row.contact_id {
                owned.entry(contact_id).or_default().push(row.into());
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let telephones = owned.remove(&row.id).unwrap_or_default();
                row.into_contact(telephones)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ContactRepository for SqliteContactStore {
    async fn find(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, first_name, last_name, email FROM contact
             ORDER BY first_name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        self.hydrate(rows).await
    }

    async fn find_one(&self, filter: ContactFilter) -> Result<Option<Contact>, RepositoryError> {
        let row = match filter {
            ContactFilter::Id(id) => {
                sqlx::query_as::<_, ContactRow>(
                    "SELECT id, first_name, last_name, email FROM contact WHERE id = ?",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
            ContactFilter::FirstName(name) => {
                sqlx::query_as::<_, ContactRow>(
                    "SELECT id, first_name, last_name, email FROM contact
                     WHERE first_name = ? ORDER BY id ASC LIMIT 1",
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(backend)?;
        let Some(row) = row else {
            return Ok(None);
        };
        let telephones = self.telephones_of(row.id).await?;
        Ok(Some(row.into_contact(telephones)))
    }

    async fn save(&self, contact: Contact) -> Result<Contact, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO contact (id, first_name, last_name, email) VALUES (?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                email = excluded.email",
        )
        .bind(contact.id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        let id = contact.id.unwrap_or_else(|| result.last_insert_rowid());

        for telephone_id in contact.telephones.iter().filter_map(|t| t.id) {
            sqlx::query("UPDATE telephone SET contact_id = ? WHERE id = ?")
                .bind(id)
                .bind(telephone_id)
                .execute(&self.pool)
                .await
                .map_err(backend)?;
        }

        ContactRepository::find_one(self, ContactFilter::Id(id))
            .await?
            .ok_or_else(|| RepositoryError::Backend(format!("contact {id} missing after save")))
    }

    async fn remove(&self, contact: &Contact) -> Result<(), RepositoryError> {
        let Some(id) = contact.id else {
            return Ok(());
        };
        sqlx::query("DELETE FROM contact WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl TelephoneRepository for SqliteContactStore {
    async fn find(&self) -> Result<Vec<Telephone>, RepositoryError> {
        let rows = sqlx::query_as::<_, TelephoneRow>(
            "SELECT id, number, type AS kind, contact_id FROM telephone ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(Telephone::from).collect())
    }

    async fn find_one(
        &self,
        filter: TelephoneFilter,
    ) -> Result<Option<Telephone>, RepositoryError> {
        let TelephoneFilter::Id(id) = filter;
        let row = sqlx::query_as::<_, TelephoneRow>(
            "SELECT id, number, type AS kind, contact_id FROM telephone WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(Telephone::from))
    }

    async fn save(&self, mut telephone: Telephone) -> Result<Telephone, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO telephone (id, number, type, contact_id) VALUES (?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                number = excluded.number,
                type = excluded.type,
                contact_id = excluded.contact_id",
        )
        .bind(telephone.id)
        .bind(&telephone.number)
        .bind(&telephone.kind)
        .bind(telephone.contact_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        if telephone.id.is_none() {
            telephone.id = Some(result.last_insert_rowid());
        }
        Ok(telephone)
    }

    async fn remove(&self, telephone: &Telephone) -> Result<(), RepositoryError> {
        let Some(id) = telephone.id else {
            return Ok(());
        };
        sqlx::query("DELETE FROM telephone WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
