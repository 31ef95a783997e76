pub mod add_contact;
