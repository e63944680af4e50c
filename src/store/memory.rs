use crate::{
    data::student::{Student, StudentDetails, StudentFieldUpdate},
    error::{DuplicateStudentSnafu, EstudiantesResult},
    store::StudentStore,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps students in insertion order, for local runs without a database.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn get_all(&self) -> EstudiantesResult<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }

    async fn get(&self, no_control: &str) -> EstudiantesResult<Option<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|student| student.control_number == no_control)
            .cloned())
    }

    async fn insert(&self, student: Student) -> EstudiantesResult<()> {
        let mut students = self.students.write().await;
        if students
            .iter()
            .any(|existing| existing.control_number == student.control_number)
        {
            return DuplicateStudentSnafu {
                no_control: student.control_number,
            }
            .fail();
        }

        students.push(student);
        Ok(())
    }

    async fn replace_details(
        &self,
        no_control: &str,
        details: StudentDetails,
    ) -> EstudiantesResult<bool> {
        let mut students = self.students.write().await;
        let Some(student) = students
            .iter_mut()
            .find(|student| student.control_number == no_control)
        else {
            return Ok(false);
        };

        student.replace_details(details);
        Ok(true)
    }

    async fn update_field(
        &self,
        no_control: &str,
        update: StudentFieldUpdate,
    ) -> EstudiantesResult<bool> {
        let mut students = self.students.write().await;
        let Some(student) = students
            .iter_mut()
            .find(|student| student.control_number == no_control)
        else {
            return Ok(false);
        };

        student.apply(update);
        Ok(true)
    }

    async fn remove(&self, no_control: &str) -> EstudiantesResult<bool> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|student| student.control_number != no_control);
        Ok(students.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstudiantesError;

    fn student(no_control: &str, first_name: &str) -> Student {
        Student {
            control_number: no_control.into(),
            first_name: Some(first_name.into()),
            paternal_surname: None,
            maternal_surname: None,
            semester: Some(1),
        }
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = MemoryStudentStore::new();
        store.insert(student("b", "Beto")).await.expect("insert b");
        store.insert(student("a", "Ana")).await.expect("insert a");

        let all = store.get_all().await.expect("list");
        let ids: Vec<_> = all.iter().map(|s| s.control_number.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_and_keeps_original() {
        let store = MemoryStudentStore::new();
        store.insert(student("a", "Ana")).await.expect("first insert");

        let error = store
            .insert(student("a", "Otra"))
            .await
            .expect_err("second insert must fail");
        assert!(matches!(error, EstudiantesError::DuplicateStudent { .. }));

        let kept = store.get("a").await.expect("get").expect("still there");
        assert_eq!(kept.first_name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn mutations_report_missing_rows() {
        let store = MemoryStudentStore::new();

        assert!(
            !store
                .update_field("nadie", StudentFieldUpdate::Semester(Some(2)))
                .await
                .expect("update")
        );
        assert!(!store.remove("nadie").await.expect("remove"));
        assert!(
            !store
                .replace_details(
                    "nadie",
                    StudentDetails {
                        first_name: None,
                        paternal_surname: None,
                        maternal_surname: None,
                        semester: None,
                    },
                )
                .await
                .expect("replace")
        );
    }

    #[tokio::test]
    async fn remove_only_drops_the_matching_student() {
        let store = MemoryStudentStore::new();
        store.insert(student("a", "Ana")).await.expect("insert a");
        store.insert(student("b", "Beto")).await.expect("insert b");

        assert!(store.remove("a").await.expect("remove"));
        assert!(store.get("a").await.expect("get a").is_none());
        assert!(store.get("b").await.expect("get b").is_some());
    }
}
