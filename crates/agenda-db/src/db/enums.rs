//! Database enum types with Diesel serialization.
//!
//! The domain enums live in `agenda-core`, so each column gets a local
//! wrapper implementing `ToSql`/`FromSql` against the `CHECK` constraints of
//! the `booking_session` table.

use agenda_core::model::{SessionCategory, SessionStatus};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::io::Write;

/// Maps to `booking_session.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub struct CategoryColumn(pub SessionCategory);

impl ToSql<Text, Pg> for CategoryColumn {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.0.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for CategoryColumn {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let category = match bytes.as_bytes() {
            b"studio" => SessionCategory::Studio,
            b"event" => SessionCategory::Event,
            b"birthday" => SessionCategory::Birthday,
            b"month_birthday" => SessionCategory::MonthBirthday,
            b"maternity" => SessionCategory::Maternity,
            b"graduation" => SessionCategory::Graduation,
            b"debutante" => SessionCategory::Debutante,
            b"wedding" => SessionCategory::Wedding,
            _ => return Err("Unrecognized session category".into()),
        };
        Ok(Self(category))
    }
}

/// Maps to `booking_session.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
pub struct StatusColumn(pub SessionStatus);

impl ToSql<Text, Pg> for StatusColumn {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.0.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for StatusColumn {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"pending" => Ok(Self(SessionStatus::Pending)),
            b"completed" => Ok(Self(SessionStatus::Completed)),
            b"cancelled" => Ok(Self(SessionStatus::Cancelled)),
            _ => Err("Unrecognized session status".into()),
        }
    }
}
