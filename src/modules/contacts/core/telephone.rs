use serde::{Deserialize, Serialize};

/// A phone number, optionally owned by a contact.
///
/// `id` is `None` until the telephone has been saved. Neither the id nor the
/// owning contact's id is part of the outbound JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Telephone {
    #[serde(skip)]
    pub id: Option<i64>,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip)]
    pub contact_id: Option<i64>,
}

impl Telephone {
    pub fn new(number: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            number: number.into(),
            kind: kind.into(),
            contact_id: None,
        }
    }

    pub fn owned_by(mut self, contact_id: i64) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    /// Overwrites every field present in `changes`, keeping the rest.
    pub fn apply(mut self, changes: NumberChanges) -> Self {
        if let Some(number) = changes.number {
            self.number = number;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        self
    }
}

/// Sparse update for a telephone, as sent to `PATCH /contacts/{id}/number`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberChanges {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
