use agenda_core::model::ClientRecord;
use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

/// Row of the client registry.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::registry_client)]
#[diesel(check_for_backend(Pg))]
pub struct ClientRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<ClientRow> for ClientRecord {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// Row of the photographer registry.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::registry_photographer)]
#[diesel(check_for_backend(Pg))]
pub struct PhotographerRow {
    pub id: uuid::Uuid,
    pub name: String,
}
