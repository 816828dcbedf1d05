use crate::queries::{self, parse_user};
use crate::store::UserStore;
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserInput};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

const MAX_CONNECTIONS: u32 = 10;

pub struct ServerDatabase {
    pub pool: PgPool,
}

impl ServerDatabase {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the users table if it does not exist yet.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for ServerDatabase {
    async fn list(&self) -> RosterResult<Vec<User>> {
        let rows = sqlx::query(queries::LIST_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(RosterError::database)?;

        rows.iter().map(parse_user).collect()
    }

    async fn get(&self, id: i32) -> RosterResult<Option<User>> {
        let row = sqlx::query(queries::GET_USER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RosterError::database)?;

        row.as_ref().map(parse_user).transpose()
    }

    async fn create(&self, input: &UserInput) -> RosterResult<i32> {
        let row = sqlx::query(queries::INSERT_USER)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await
            .map_err(RosterError::database)?;

        row.try_get("id").map_err(RosterError::database)
    }

    async fn update(&self, id: i32, input: &UserInput) -> RosterResult<u64> {
        let result = sqlx::query(queries::UPDATE_USER)
            .bind(&input.name)
            .bind(&input.email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RosterError::database)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> RosterResult<()> {
        if self.get(id).await?.is_none() {
            return Err(RosterError::UserNotFound(id));
        }

        sqlx::query(queries::DELETE_USER)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RosterError::database)?;

        Ok(())
    }
}
