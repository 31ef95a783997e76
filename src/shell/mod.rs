// Composition root for the contact book.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the configured contact store.
// - Wire the store into the contact service and the HTTP router.

pub mod config;
pub mod http;
pub mod state;
