use crate::{
    data::{
        StudentStore,
        student::{StudentFields, StudentRecord},
    },
    error::RosterResult,
};
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

///keeps everything in process memory, in insertion order
///
///used by the tests, and by `ROSTER_STORE=memory` for running without postgres
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    students: Vec<StudentRecord>,
    //every id ever handed out, including deleted ones, so they never come back
    issued_ids: HashSet<Uuid>,
}

impl Inner {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.students.iter().position(|student| student.id == id)
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn insert_into_database(&self, to_be_added: StudentFields) -> RosterResult<Uuid> {
        let mut inner = self.inner.write().await;

        let mut id = Uuid::new_v4();
        while inner.issued_ids.contains(&id) {
            id = Uuid::new_v4();
        }
        inner.issued_ids.insert(id);
        inner
            .students
            .push(StudentRecord::from_fields(id, to_be_added));

        debug!(%id, "Inserted student into memory");
        Ok(id)
    }

    async fn get_all(&self) -> RosterResult<Vec<StudentRecord>> {
        Ok(self.inner.read().await.students.clone())
    }

    async fn replace_in_database(
        &self,
        id: Uuid,
        replacement: StudentFields,
    ) -> RosterResult<Option<StudentRecord>> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.position(id) else {
            return Ok(None);
        };

        let replaced = StudentRecord::from_fields(id, replacement);
        inner.students[index] = replaced.clone();
        Ok(Some(replaced))
    }

    async fn remove_from_database(&self, id: Uuid) -> RosterResult<Option<StudentRecord>> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .position(id)
            .map(|index| inner.students.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, roll_no: &str) -> StudentFields {
        StudentFields {
            name: Some(name.into()),
            email: Some(email.into()),
            roll_no: Some(roll_no.into()),
        }
    }

    #[tokio::test]
    async fn get_all_keeps_insertion_order() {
        let store = InMemoryStudentStore::default();
        let first = store
            .insert_into_database(fields("Alice", "a@x.com", "R1"))
            .await
            .unwrap();
        let second = store
            .insert_into_database(fields("Bob", "b@x.com", "R2"))
            .await
            .unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(
            all.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![first, second]
        );
        assert_eq!(all[1].name.as_deref(), Some("Bob"));
    }

    #[tokio::test]
    async fn replace_overwrites_every_field() {
        let store = InMemoryStudentStore::default();
        let id = store
            .insert_into_database(fields("Alice", "a@x.com", "R1"))
            .await
            .unwrap();

        let replaced = store
            .replace_in_database(
                id,
                StudentFields {
                    name: Some("Alicia".into()),
                    ..StudentFields::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.name.as_deref(), Some("Alicia"));
        assert_eq!(replaced.email, None);
        assert_eq!(replaced.roll_no, None);
        assert_eq!(store.get_all().await.unwrap(), vec![replaced]);
    }

    #[tokio::test]
    async fn missing_ids_are_none() {
        let store = InMemoryStudentStore::default();
        let id = Uuid::new_v4();

        assert!(
            store
                .replace_in_database(id, StudentFields::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.remove_from_database(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_returns_the_record_and_forgets_it() {
        let store = InMemoryStudentStore::default();
        let id = store
            .insert_into_database(fields("Alice", "a@x.com", "R1"))
            .await
            .unwrap();

        let removed = store.remove_from_database(id).await.unwrap().unwrap();
        assert_eq!(removed.id, id);
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(store.remove_from_database(id).await.unwrap().is_none());

        let next = store
            .insert_into_database(fields("Alice", "a@x.com", "R1"))
            .await
            .unwrap();
        assert_ne!(next, id);
        assert!(store.inner.read().await.issued_ids.contains(&id));
    }
}
