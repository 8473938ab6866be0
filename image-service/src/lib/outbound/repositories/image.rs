use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::image::models::Image;
use crate::domain::image::models::OwnerId;
use crate::domain::image::models::Page;
use crate::image::errors::ImageError;
use crate::image::ports::ImageRepository;

pub struct PostgresImageRepository {
    pool: PgPool,
}

impl PostgresImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Postgres has no unsigned integers; values past `i64::MAX` saturate.
fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn image_from_row(row: PgRow) -> Result<Image, ImageError> {
    let filename: String = row
        .try_get("filename")
        .map_err(|e| ImageError::Database(e.to_string()))?;
    let user_id: i64 = row
        .try_get("user_id")
        .map_err(|e| ImageError::Database(e.to_string()))?;

    Ok(Image {
        filename,
        owner: OwnerId::new(user_id)?,
    })
}

#[async_trait]
impl ImageRepository for PostgresImageRepository {
    async fn insert(&self, image: &Image) -> Result<(), ImageError> {
        sqlx::query(
            r#"
            INSERT INTO images (filename, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(&image.filename)
        .bind(to_bigint(image.owner.get()))
        .execute(&self.pool)
        .await
        .map_err(|e| ImageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_owner(&self, owner: OwnerId, page: Page) -> Result<Vec<Image>, ImageError> {
        let rows = match page.limit {
            Some(limit) => {
                sqlx::query(
                    r#"
                    SELECT filename, user_id
                    FROM images
                    WHERE user_id = $1
                    ORDER BY filename
                    OFFSET $2
                    LIMIT $3
                    "#,
                )
                .bind(to_bigint(owner.get()))
                .bind(to_bigint(page.offset))
                .bind(to_bigint(limit.get()))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT filename, user_id
                    FROM images
                    WHERE user_id = $1
                    ORDER BY filename
                    OFFSET $2
                    "#,
                )
                .bind(to_bigint(owner.get()))
                .bind(to_bigint(page.offset))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| ImageError::Database(e.to_string()))?;

        rows.into_iter().map(image_from_row).collect()
    }
}
