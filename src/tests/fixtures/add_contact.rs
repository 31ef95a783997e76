// Shared test fixture for the AddContact command.
// The defaults come from `json/add_contact.json`, the same body the HTTP tests post.

use crate::modules::contacts::application::commands::AddContact;

pub const ADD_CONTACT_JSON: &str = include_str!("json/add_contact.json");

pub struct AddContactBuilder {
    inner: AddContact,
}

impl Default for AddContactBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AddContactBuilder {
    pub fn new() -> Self {
        Self {
            inner: serde_json::from_str(ADD_CONTACT_JSON).unwrap(),
        }
    }

    pub fn first_name(mut self, v: impl Into<String>) -> Self {
        self.inner.first_name = v.into();
        self
    }

    pub fn last_name(mut self, v: impl Into<String>) -> Self {
        self.inner.last_name = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = v.into();
        self
    }

    pub fn number(mut self, v: impl Into<String>) -> Self {
        self.inner.number = v.into();
        self
    }

    pub fn kind(mut self, v: impl Into<String>) -> Self {
        self.inner.kind = v.into();
        self
    }

    pub fn build(self) -> AddContact {
        self.inner
    }
}

#[cfg(test)]
mod add_contact_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = AddContactBuilder::default().build();
        assert_eq!(
            built,
            AddContact {
                first_name: "alexandru".into(),
                last_name: "dumitru".into(),
                email: "alexdumitru@yahoo.com".into(),
                number: "0763674453".into(),
                kind: "work".into(),
            }
        );
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = AddContactBuilder::new()
            .first_name("ana")
            .last_name("pop")
            .email("ana@x.com")
            .number("0700000000")
            .kind("home")
            .build();

        assert_eq!(custom.first_name, "ana");
        assert_eq!(custom.last_name, "pop");
        assert_eq!(custom.email, "ana@x.com");
        assert_eq!(custom.number, "0700000000");
        assert_eq!(custom.kind, "home");
    }
}
