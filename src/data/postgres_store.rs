use crate::{
    config::DbConfig,
    data::{
        StudentStore,
        student::{StudentFields, StudentRecord},
    },
    error::{
        GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, RosterResult,
    },
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn new(options: PgPoolOptions, db_config: &DbConfig) -> RosterResult<Self> {
        let pool = options
            .connect(db_config.get_db_path().expose_secret())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> RosterResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn insert_into_database(&self, to_be_added: StudentFields) -> RosterResult<Uuid> {
        let StudentFields {
            name,
            email,
            roll_no,
        } = to_be_added;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO public.students (name, email, roll_no) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(roll_no)
        .fetch_one(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)?;

        debug!(%id, "Inserted student");
        Ok(id)
    }

    async fn get_all(&self) -> RosterResult<Vec<StudentRecord>> {
        sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, email, roll_no FROM public.students ORDER BY seq",
        )
        .fetch_all(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn replace_in_database(
        &self,
        id: Uuid,
        replacement: StudentFields,
    ) -> RosterResult<Option<StudentRecord>> {
        let StudentFields {
            name,
            email,
            roll_no,
        } = replacement;

        sqlx::query_as::<_, StudentRecord>(
            "UPDATE public.students SET name = $2, email = $3, roll_no = $4 WHERE id = $1 RETURNING id, name, email, roll_no",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(roll_no)
        .fetch_optional(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn remove_from_database(&self, id: Uuid) -> RosterResult<Option<StudentRecord>> {
        sqlx::query_as::<_, StudentRecord>(
            "DELETE FROM public.students WHERE id = $1 RETURNING id, name, email, roll_no",
        )
        .bind(id)
        .fetch_optional(&mut *self.get_connection().await?)
        .await
        .context(MakeQuerySnafu)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
