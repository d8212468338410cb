use std::collections::BTreeMap;
use std::sync::RwLock;

use staffbook_employees::{Employee, EmployeeId, NewEmployee};

use super::{EmployeeRepository, RepositoryError};

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<EmployeeId, Employee>,
    next_id: i64,
}

/// In-memory employee store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    inner: RwLock<Inner>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed the store with already-identified employees.
    ///
    /// Later inserts continue after the highest seeded id, and never below 1.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let rows: BTreeMap<EmployeeId, Employee> =
            employees.into_iter().map(|e| (e.id, e)).collect();
        let next_id = rows
            .keys()
            .next_back()
            .map(|id| id.get().max(0).saturating_add(1))
            .unwrap_or(1);
        Self {
            inner: RwLock::new(Inner { rows, next_id }),
        }
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("in-memory employee store lock poisoned".to_string())
    }
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn save(&self, new: NewEmployee) -> Result<Employee, RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        let id = EmployeeId::new(inner.next_id);
        inner.next_id = inner.next_id.checked_add(1).ok_or_else(|| RepositoryError::Backend {
            operation: "save",
            message: "employee id sequence exhausted".to_string(),
        })?;

        let employee = Employee::from_new(id, new);
        inner.rows.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        new: NewEmployee,
    ) -> Result<Option<Employee>, RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.get_mut(&id).map(|slot| {
            *slot = Employee::from_new(id, new);
            slot.clone()
        }))
    }

    async fn delete_by_id(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| Self::poisoned())?;
        Ok(inner.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_employee(first: &str, last: &str, email: &str) -> NewEmployee {
        NewEmployee::new(first, last, email).unwrap()
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids_and_lists_in_order() {
        let repo = InMemoryEmployeeRepository::new();
        let alice = repo
            .save(new_employee("Alice", "Dupont", "alice@mail.com"))
            .await
            .unwrap();
        let bob = repo
            .save(new_employee("Bob", "Martin", "bob@mail.com"))
            .await
            .unwrap();

        assert_eq!(alice.id, EmployeeId::new(1));
        assert_eq!(bob.id, EmployeeId::new(2));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![alice, bob]);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let repo = InMemoryEmployeeRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(repo.find_by_id(EmployeeId::new(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn seeded_store_continues_after_highest_id() {
        let seeded = Employee::from_new(
            EmployeeId::new(10),
            new_employee("Alice", "Dupont", "alice@mail.com"),
        );
        let repo = InMemoryEmployeeRepository::with_employees(vec![seeded.clone()]);

        assert_eq!(
            repo.find_by_id(EmployeeId::new(10)).await.unwrap(),
            Some(seeded)
        );
        let next = repo
            .save(new_employee("Bob", "Martin", "bob@mail.com"))
            .await
            .unwrap();
        assert_eq!(next.id, EmployeeId::new(11));
    }

    #[tokio::test]
    async fn seeded_non_positive_ids_do_not_drag_the_sequence_below_one() {
        let seeded = Employee::from_new(
            EmployeeId::new(-5),
            new_employee("Alice", "Dupont", "alice@mail.com"),
        );
        let repo = InMemoryEmployeeRepository::with_employees(vec![seeded]);

        let next = repo
            .save(new_employee("Bob", "Martin", "bob@mail.com"))
            .await
            .unwrap();
        assert_eq!(next.id, EmployeeId::new(1));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let repo = InMemoryEmployeeRepository::new();
        let alice = repo
            .save(new_employee("Alice", "Dupont", "alice@mail.com"))
            .await
            .unwrap();

        let updated = repo
            .update(alice.id, new_employee("Alicia", "Durand", "alicia@mail.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, alice.id);
        assert_eq!(updated.first_name, "Alicia");
        assert_eq!(
            repo.find_by_id(alice.id).await.unwrap().unwrap().email_id,
            "alicia@mail.com"
        );

        let missing = repo
            .update(EmployeeId::new(99), new_employee("X", "Y", "z"))
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn delete_removes_once_and_ids_are_not_reused() {
        let repo = InMemoryEmployeeRepository::new();
        let alice = repo
            .save(new_employee("Alice", "Dupont", "alice@mail.com"))
            .await
            .unwrap();

        assert!(repo.delete_by_id(alice.id).await.unwrap());
        assert!(!repo.delete_by_id(alice.id).await.unwrap());
        assert_eq!(repo.find_by_id(alice.id).await.unwrap(), None);

        let bob = repo
            .save(new_employee("Bob", "Martin", "bob@mail.com"))
            .await
            .unwrap();
        assert_eq!(bob.id, EmployeeId::new(2));
    }
}
