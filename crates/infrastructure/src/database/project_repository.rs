use super::storage_error;
use async_trait::async_trait;
use domain::DomainError;
use domain::project::{Project, ProjectRepository};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<Project, DomainError> {
        Ok(Project {
            id: row.try_get("id").map_err(storage_error)?,
            code: row.try_get("code").map_err(storage_error)?,
            name: row.try_get("name").map_err(storage_error)?,
            active: row.try_get("is_active").map_err(storage_error)?,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_all(&self) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query("SELECT id, code, name, is_active FROM projects ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn find_active(&self) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, code, name, is_active FROM projects \
             WHERE is_active = true ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn create(&self, code: &str, name: &str) -> Result<Project, DomainError> {
        let code = code.trim().to_uppercase();
        let name = name.trim();
        if code.is_empty() {
            return Err(DomainError::MissingField("code".to_string()));
        }
        if name.is_empty() {
            return Err(DomainError::MissingField("name".to_string()));
        }

        let row = sqlx::query(
            "INSERT INTO projects (code, name) VALUES ($1, $2) \
             RETURNING id, code, name, is_active",
        )
        .bind(&code)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Self::from_row(&row)
    }
}
