use crate::modules::contacts::application::contact_service::ContactService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<ContactService>,
}
