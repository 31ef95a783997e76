pub mod modules {
    pub mod contacts {
        pub mod core {
            pub mod contact;
            pub mod ports;
            pub mod telephone;
        }
        pub mod application {
            pub mod commands;
            pub mod contact_service;
            pub mod errors;
        }
        pub mod adapters {
            pub mod inbound {
                pub mod http;
            }
            pub mod outbound {
                pub mod in_memory_store;
                pub mod sqlite_store;
            }
        }
    }
}

pub mod shell;
