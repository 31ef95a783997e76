use crate::modules::contacts::application::commands::{AddContact, NewNumber};
use crate::modules::contacts::application::errors::ContactError;
use crate::modules::contacts::core::contact::{Contact, ContactChanges};
use crate::modules::contacts::core::ports::{
    ContactFilter, ContactRepository, TelephoneFilter, TelephoneRepository,
};
use crate::modules::contacts::core::telephone::{NumberChanges, Telephone};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use cases of the contact book, each a plain read-then-write against the ports.
///
/// Writes that touch both tables are not atomic: a failure between the two
/// saves leaves the earlier write in place.
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
    telephones: Arc<dyn TelephoneRepository>,
}

impl ContactService {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        telephones: Arc<dyn TelephoneRepository>,
    ) -> Self {
        Self {
            contacts,
            telephones,
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.contacts.find().await?)
    }

    pub async fn find_one(&self, first_name: &str) -> Result<Contact, ContactError> {
        self.contacts
            .find_one(ContactFilter::FirstName(first_name.to_string()))
            .await?
            .ok_or_else(|| {
                not_found(format!(
                    "Contact with first name {first_name} was not found."
                ))
            })
    }

    /// Lists every contact. `letter` is accepted by the route but not applied.
    pub async fn get_filtered_contacts(&self, letter: &str) -> Result<Vec<Contact>, ContactError> {
        debug!(letter, "Listing contacts for filter request");
        self.find_all().await
    }

    pub async fn new_contact(&self, command: AddContact) -> Result<Contact, ContactError> {
        let AddContact {
            first_name,
            last_name,
            email,
            number,
            kind,
        } = command;

        let telephone = self.telephones.save(Telephone::new(number, kind)).await?;
        let contact = self
            .contacts
            .save(Contact::new(first_name, last_name, email).with_telephones(vec![telephone]))
            .await?;

        info!(contact_id = ?contact.id, "contact created");
        Ok(contact)
    }

    pub async fn add_new_number(&self, command: NewNumber) -> Result<Telephone, ContactError> {
        let NewNumber {
            contact_id,
            number,
            kind,
        } = command;

        let contact = self.load_contact(contact_id).await?;
        let telephone = Telephone::new(number, kind).owned_by(contact_id);

        self.contacts.save(contact).await?;
        let telephone = self.telephones.save(telephone).await?;

        info!(contact_id, telephone_id = ?telephone.id, "number added to contact");
        Ok(telephone)
    }

    pub async fn modify_contact(
        &self,
        id: i64,
        changes: ContactChanges,
    ) -> Result<Contact, ContactError> {
        let contact = self.load_contact(id).await?;
        let contact = self.contacts.save(contact.apply(changes)).await?;

        info!(contact_id = id, "contact modified");
        Ok(contact)
    }

    pub async fn modify_number(
        &self,
        id: i64,
        changes: NumberChanges,
    ) -> Result<Telephone, ContactError> {
        let telephone = self
            .telephones
            .find_one(TelephoneFilter::Id(id))
            .await?
            .ok_or_else(|| not_found(format!("Telephone with id {id} was not found.")))?;
        let telephone = self.telephones.save(telephone.apply(changes)).await?;

        info!(telephone_id = id, "number modified");
        Ok(telephone)
    }

    /// Removes the contact's numbers, then the contact. Any failure on the way
    /// is returned as an error, so the only successful outcome is `true`.
    pub async fn delete_contact(&self, id: i64) -> Result<bool, ContactError> {
        let contact = self.load_contact(id).await?;

        for telephone in &contact.telephones {
            self.telephones.remove(telephone).await?;
        }
        self.contacts.remove(&contact).await?;

        info!(
            contact_id = id,
            removed_numbers = contact.telephones.len(),
            "contact deleted"
        );
        Ok(true)
    }

    async fn load_contact(&self, id: i64) -> Result<Contact, ContactError> {
        self.contacts
            .find_one(ContactFilter::Id(id))
            .await?
            .ok_or_else(|| not_found(format!("Contact with id {id} was not found.")))
    }
}

fn not_found(message: String) -> ContactError {
    warn!(%message, "lookup failed");
    ContactError::NotFound(message)
}
