use crate::{
    config::DbConfig,
    data::student::{Student, StudentDetails, StudentFieldUpdate},
    error::{
        CommitTransactionSnafu, DuplicateStudentSnafu, EstudiantesResult,
        GetDatabaseConnectionSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu,
    },
    store::StudentStore,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, Transaction, postgres::PgPoolOptions};

#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn new(options: PgPoolOptions, config: &DbConfig) -> EstudiantesResult<Self> {
        let pool = options
            .max_connections(config.max_connections())
            .connect(config.connection_url().expose_secret())
            .await
            .context(OpenDatabaseSnafu)?;

        if config.run_migrations() {
            sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;
            info!("Database migrations applied");
        }

        Ok(Self::from_pool(pool))
    }

    pub const fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn get_transaction(&self) -> EstudiantesResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn get_all(&self) -> EstudiantesResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT no_control, nombre, ap_paterno, ap_materno, semestre FROM public.alumnos",
        )
        .fetch_all(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get(&self, no_control: &str) -> EstudiantesResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT no_control, nombre, ap_paterno, ap_materno, semestre FROM public.alumnos WHERE no_control = $1",
        )
        .bind(no_control)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn insert(&self, student: Student) -> EstudiantesResult<()> {
        let mut tx = self.get_transaction().await?;

        let result = sqlx::query("INSERT INTO public.alumnos (no_control, nombre, ap_paterno, ap_materno, semestre) VALUES ($1, $2, $3, $4, $5)")
            .bind(&student.control_number)
            .bind(&student.first_name)
            .bind(&student.paternal_surname)
            .bind(&student.maternal_surname)
            .bind(student.semester)
            .execute(&mut *tx)
            .await;

        match result {
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                return DuplicateStudentSnafu {
                    no_control: student.control_number,
                }
                .fail();
            }
            other => {
                other.context(MakeQuerySnafu)?;
            }
        }

        tx.commit().await.context(CommitTransactionSnafu)
    }

    async fn replace_details(
        &self,
        no_control: &str,
        details: StudentDetails,
    ) -> EstudiantesResult<bool> {
        let StudentDetails {
            first_name,
            paternal_surname,
            maternal_surname,
            semester,
        } = details;

        let mut tx = self.get_transaction().await?;

        let rows_affected = sqlx::query("UPDATE public.alumnos SET nombre = $2, ap_paterno = $3, ap_materno = $4, semestre = $5 WHERE no_control = $1")
            .bind(no_control)
            .bind(first_name)
            .bind(paternal_surname)
            .bind(maternal_surname)
            .bind(semester)
            .execute(&mut *tx)
            .await
            .context(MakeQuerySnafu)?
            .rows_affected();

        tx.commit().await.context(CommitTransactionSnafu)?;
        Ok(rows_affected > 0)
    }

    async fn update_field(
        &self,
        no_control: &str,
        update: StudentFieldUpdate,
    ) -> EstudiantesResult<bool> {
        let query = match update {
            StudentFieldUpdate::FirstName(first_name) => {
                sqlx::query("UPDATE public.alumnos SET nombre = $2 WHERE no_control = $1")
                    .bind(no_control)
                    .bind(first_name)
            }
            StudentFieldUpdate::PaternalSurname(surname) => {
                sqlx::query("UPDATE public.alumnos SET ap_paterno = $2 WHERE no_control = $1")
                    .bind(no_control)
                    .bind(surname)
            }
            StudentFieldUpdate::MaternalSurname(surname) => {
                sqlx::query("UPDATE public.alumnos SET ap_materno = $2 WHERE no_control = $1")
                    .bind(no_control)
                    .bind(surname)
            }
            StudentFieldUpdate::Semester(semester) => {
                sqlx::query("UPDATE public.alumnos SET semestre = $2 WHERE no_control = $1")
                    .bind(no_control)
                    .bind(semester)
            }
        };

        let mut tx = self.get_transaction().await?;
        let rows_affected = query
            .execute(&mut *tx)
            .await
            .context(MakeQuerySnafu)?
            .rows_affected();

        tx.commit().await.context(CommitTransactionSnafu)?;
        Ok(rows_affected > 0)
    }

    async fn remove(&self, no_control: &str) -> EstudiantesResult<bool> {
        let mut tx = self.get_transaction().await?;

        let rows_affected = sqlx::query("DELETE FROM public.alumnos WHERE no_control = $1")
            .bind(no_control)
            .execute(&mut *tx)
            .await
            .context(MakeQuerySnafu)?
            .rows_affected();

        tx.commit().await.context(CommitTransactionSnafu)?;
        Ok(rows_affected > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
