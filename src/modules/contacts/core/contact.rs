use crate::modules::contacts::core::telephone::Telephone;
use serde::{Deserialize, Serialize};

/// A person in the contact book together with the numbers it owns.
///
/// `telephones` is always loaded with the contact and holds exactly the
/// telephones whose `contact_id` points at this contact, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephones: Vec<Telephone>,
}

impl Contact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            telephones: Vec::new(),
        }
    }

    pub fn with_telephones(mut self, telephones: Vec<Telephone>) -> Self {
        self.telephones = telephones;
        self
    }

    /// Overwrites every field present in `changes`, keeping the rest.
    /// Telephones are never touched by a contact patch.
    pub fn apply(mut self, changes: ContactChanges) -> Self {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        self
    }
}

/// Sparse update for a contact, as sent to `PATCH /contacts/{id}/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
