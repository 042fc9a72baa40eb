use diesel::prelude::*;
use uuid::Uuid;

use cartera_core::platforms::{NewPlatform, Platform};

use crate::schema::platforms;
use crate::utils::{now_string, parse_timestamp};

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = platforms)]
pub struct PlatformDB {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub default_currency: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PlatformDB> for Platform {
    fn from(db: PlatformDB) -> Self {
        Platform {
            created_at: parse_timestamp(&db.created_at, "platforms.created_at"),
            updated_at: parse_timestamp(&db.updated_at, "platforms.updated_at"),
            id: db.id,
            name: db.name,
            country: db.country,
            default_currency: db.default_currency,
        }
    }
}

impl From<NewPlatform> for PlatformDB {
    fn from(new: NewPlatform) -> Self {
        let now = now_string();
        PlatformDB {
            id: new.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new.name,
            country: new.country,
            default_currency: new.default_currency,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
