// In memory contact and telephone tables.
//
// Purpose
// - Exercise the contact service and the HTTP layer without a database.
//
// Responsibilities
// - Keep contacts and telephones as two tables joined by `contact_id`, like the SQL schema.
// - Hand out increasing surrogate ids on insert.
// - Refuse to remove a contact that still owns telephones, as the foreign key would.

use crate::modules::contacts::core::contact::Contact;
use crate::modules::contacts::core::ports::{
    ContactFilter, ContactRepository, RepositoryError, TelephoneFilter, TelephoneRepository,
};
use crate::modules::contacts::core::telephone::Telephone;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    contacts: BTreeMap<i64, Contact>,
    telephones: BTreeMap<i64, Telephone>,
    last_contact_id: i64,
    last_telephone_id: i64,
}

impl Tables {
    fn hydrate(&self, contact: &Contact) -> Contact {
        let telephones = self
            .telephones
            .values()
            .filter(|telephone| {
                telephone.contact_id.is_some() && telephone.contact_id == contact.id
            })
            .cloned()
            .collect();
        contact.clone().with_telephones(telephones)
    }

    fn sorted_contacts(&self) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self
            .contacts
            .values()
            .map(|contact| self.hydrate(contact))
            .collect();
        contacts.sort_by(|a, b| a.first_name.cmp(&b.first_name).then(a.id.cmp(&b.id)));
        contacts
    }
}

#[derive(Default)]
pub struct InMemoryContactStore {
    tables: RwLock<Tables>,
    is_offline: bool,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Backend("Contact store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactRepository for InMemoryContactStore {
    async fn find(&self) -> Result<Vec<Contact>, RepositoryError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.sorted_contacts())
    }

    async fn find_one(&self, filter: ContactFilter) -> Result<Option<Contact>, RepositoryError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let found = match filter {
            ContactFilter::Id(id) => tables.contacts.get(&id).map(|c| tables.hydrate(c)),
            ContactFilter::FirstName(name) => tables
                .sorted_contacts()
                .into_iter()
                .find(|contact| contact.first_name == name),
        };
        Ok(found)
    }

    async fn save(&self, contact: Contact) -> Result<Contact, RepositoryError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let id = match contact.id {
            Some(id) => id,
            None => tables.last_contact_id + 1,
        };
        tables.last_contact_id = tables.last_contact_id.max(id);

        for linked in &contact.telephones {
            if let Some(row) = linked.id.and_then(|tid| tables.telephones.get_mut(&tid)) {
                row.contact_id = Some(id);
            }
        }

        let mut row = contact.with_telephones(Vec::new());
        row.id = Some(id);
        tables.contacts.insert(id, row.clone());
        Ok(tables.hydrate(&row))
    }

    async fn remove(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.ensure_online()?;
        let Some(id) = contact.id else {
            return Ok(());
        };
        let mut tables = self.tables.write().await;
        if tables
            .telephones
            .values()
            .any(|telephone| telephone.contact_id == Some(id))
        {
            return Err(RepositoryError::Backend(
                "FOREIGN KEY constraint failed".into(),
            ));
        }
        tables.contacts.remove(&id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl TelephoneRepository for InMemoryContactStore {
    async fn find(&self) -> Result<Vec<Telephone>, RepositoryError> {
        self.ensure_online()?;
        Ok(self.tables.read().await.telephones.values().cloned().collect())
    }

    async fn find_one(
        &self,
        filter: TelephoneFilter,
    ) -> Result<Option<Telephone>, RepositoryError> {
        self.ensure_online()?;
        let TelephoneFilter::Id(id) = filter;
        Ok(self.tables.read().await.telephones.get(&id).cloned())
    }

    async fn save(&self, mut telephone: Telephone) -> Result<Telephone, RepositoryError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if let Some(contact_id) = telephone.contact_id {
            if !tables.contacts.contains_key(&contact_id) {
                return Err(RepositoryError::Backend(
                    "FOREIGN KEY constraint failed".into(),
                ));
            }
        }
        let id = match telephone.id {
            Some(id) => id,
            None => tables.last_telephone_id + 1,
        };
        tables.last_telephone_id = tables.last_telephone_id.max(id);
        telephone.id = Some(id);
        tables.telephones.insert(id, telephone.clone());
        Ok(telephone)
    }

    async fn remove(&self, telephone: &Telephone) -> Result<(), RepositoryError> {
        self.ensure_online()?;
        if let Some(id) = telephone.id {
            self.tables.write().await.telephones.remove(&id);
        }
        Ok(())
    }
}
