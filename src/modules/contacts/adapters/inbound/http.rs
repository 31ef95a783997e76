use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::modules::contacts::application::commands::{AddContact, NewNumber};
use crate::modules::contacts::application::errors::ContactError;
use crate::modules::contacts::core::contact::{Contact, ContactChanges};
use crate::modules::contacts::core::telephone::{NumberChanges, Telephone};
use crate::shell::state::AppState;

/// Error envelope shared by every contact endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(message) => ApiError::new(StatusCode::NOT_FOUND, message),
            ContactError::Repository(err) => {
                error!(error = %err, "contact repository failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            message: self.message,
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteContactResponse {
    pub success: bool,
    pub message: String,
}

pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.find_all().await?))
}

pub async fn find_one(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.find_one(&name).await?))
}

pub async fn filter(
    State(state): State<AppState>,
    Path(letter): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.get_filtered_contacts(&letter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<AddContact>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(command) = body?;
    let contact = state.contacts.new_contact(command).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn add_number(
    State(state): State<AppState>,
    body: Result<Json<NewNumber>, JsonRejection>,
) -> Result<Json<Telephone>, ApiError> {
    let Json(command) = body?;
    Ok(Json(state.contacts.add_new_number(command).await?))
}

pub async fn patch_contact(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<ContactChanges>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    Ok(Json(state.contacts.modify_contact(id, changes).await?))
}

pub async fn patch_number(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NumberChanges>, JsonRejection>,
) -> Result<Json<Telephone>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = body?;
    Ok(Json(state.contacts.modify_number(id, changes).await?))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteContactResponse>, ApiError> {
    let Path(id) = id?;
    let response = if state.contacts.delete_contact(id).await? {
        DeleteContactResponse {
            success: true,
            message: format!("The contact with id {id} has been deleted"),
        }
    } else {
        DeleteContactResponse {
            success: false,
            message: format!("The contact with id {id} has not been deleted"),
        }
    };
    Ok(Json(response))
}
