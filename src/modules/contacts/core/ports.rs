// Ports describe what the contact service needs from storage, without implementing it.
//
// Responsibilities
// - Keep the service independent of any database by coding against traits.
// - Contacts come back with their telephones already loaded.
//
// Boundaries
// - Adapters implement these traits: an in-memory store for tests and local runs,
//   a SQLite store for the real thing.

use crate::modules::contacts::core::contact::Contact;
use crate::modules::contacts::core::telephone::Telephone;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFilter {
    Id(i64),
    FirstName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelephoneFilter {
    Id(i64),
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every contact, ordered by first name.
    async fn find(&self) -> Result<Vec<Contact>, RepositoryError>;

    async fn find_one(&self, filter: ContactFilter) -> Result<Option<Contact>, RepositoryError>;

    /// Inserts or updates the contact and links every saved telephone in
    /// `contact.telephones` to it. Returns the contact as stored.
    async fn save(&self, contact: Contact) -> Result<Contact, RepositoryError>;

    /// Fails while telephones still reference the contact.
    async fn remove(&self, contact: &Contact) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait TelephoneRepository: Send + Sync {
    async fn find(&self) -> Result<Vec<Telephone>, RepositoryError>;

    async fn find_one(&self, filter: TelephoneFilter)
    -> Result<Option<Telephone>, RepositoryError>;

    async fn save(&self, telephone: Telephone) -> Result<Telephone, RepositoryError>;

    async fn remove(&self, telephone: &Telephone) -> Result<(), RepositoryError>;
}
