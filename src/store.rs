use crate::{
    data::student::{Student, StudentDetails, StudentFieldUpdate},
    error::EstudiantesResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;

/// Row-level access to the `alumnos` table.
///
/// Each call is its own unit of work: it either fully applies or leaves the store untouched.
/// Mutations return `false` when no student has the given control number.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    async fn get_all(&self) -> EstudiantesResult<Vec<Student>>;

    async fn get(&self, no_control: &str) -> EstudiantesResult<Option<Student>>;

    /// Fails with `DuplicateStudent` if the control number is taken.
    async fn insert(&self, student: Student) -> EstudiantesResult<()>;

    async fn replace_details(
        &self,
        no_control: &str,
        details: StudentDetails,
    ) -> EstudiantesResult<bool>;

    async fn update_field(
        &self,
        no_control: &str,
        update: StudentFieldUpdate,
    ) -> EstudiantesResult<bool>;

    async fn remove(&self, no_control: &str) -> EstudiantesResult<bool>;

    async fn close(&self) {}
}
