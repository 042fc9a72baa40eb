use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use cartera_core::errors::DatabaseError;
use cartera_core::platforms::{NewPlatform, Platform, PlatformRepositoryTrait};
use cartera_core::{Error, Result};

use super::model::PlatformDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::platforms;
use crate::utils::now_string;

#[derive(Clone)]
pub struct PlatformRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlatformRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PlatformRepositoryTrait for PlatformRepository {
    fn get_platform(&self, platform_id: &str) -> Result<Platform> {
        let mut conn = get_connection(&self.pool)?;
        platforms::table
            .find(platform_id)
            .first::<PlatformDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Platform::from)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(platform_id.to_string())))
    }

    fn get_platforms(&self) -> Result<Vec<Platform>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = platforms::table
            .order_by(platforms::name.asc())
            .load::<PlatformDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Platform::from).collect())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Platform>> {
        let mut conn = get_connection(&self.pool)?;
        let row = platforms::table
            .filter(platforms::name.eq(name))
            .first::<PlatformDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Platform::from))
    }

    async fn create_platform(&self, new_platform: NewPlatform) -> Result<Platform> {
        self.writer
            .exec(move |conn| {
                let row = PlatformDB::from(new_platform);
                diesel::insert_into(platforms::table)
                    .values(&row)
                    .get_result::<PlatformDB>(conn)
                    .map(Platform::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn update_platform(&self, platform: Platform) -> Result<Platform> {
        self.writer
            .exec(move |conn| {
                diesel::update(platforms::table.find(&platform.id))
                    .set((
                        platforms::name.eq(&platform.name),
                        platforms::country.eq(&platform.country),
                        platforms::default_currency.eq(&platform.default_currency),
                        platforms::updated_at.eq(now_string()),
                    ))
                    .get_result::<PlatformDB>(conn)
                    .map(Platform::from)
                    .map_err(|e| StorageError::from(e).into())
            })
            .await
    }

    async fn delete_platform(&self, platform_id: &str) -> Result<()> {
        let platform_id = platform_id.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(platforms::table.find(&platform_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(platform_id)));
                }
                Ok(())
            })
            .await
    }
}
