//! Agenda booking server - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every layer
//! through `agenda_test::` paths.

pub mod component {
    pub use agenda_service::*;

    pub mod db {
        pub use agenda_db::db::*;
    }

    pub mod model {
        pub use agenda_core::model::*;
    }

    pub mod config {
        pub use agenda_app::config::ConfigHandler;
        pub use agenda_core::config::*;
    }
}

pub mod app {
    pub use agenda_app::*;

    pub mod api {
        pub use agenda_app::app::api::*;
    }
}
