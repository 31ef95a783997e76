use serde::Deserialize;

/// Body of `POST /contacts`: a new contact and its first number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `PATCH /contacts`: an extra number for an existing contact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNumber {
    pub contact_id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub kind: String,
}
