//! Solution repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Solution, SolutionId};
use crate::domain::DomainError;

/// Repository trait for solution storage.
///
/// `create` applies the ID policy: a well-formed client-supplied UUID is
/// kept, otherwise a fresh one is generated at this boundary. The counter
/// methods are the only sanctioned mutation paths for the computed web
/// statistics; `update` never writes them.
#[async_trait]
pub trait SolutionRepository: Send + Sync + Debug {
    /// Get a solution by ID; absence is `Ok(None)`, not an error
    async fn get(&self, id: &SolutionId) -> Result<Option<Solution>, DomainError>;

    /// Create a new solution, returning it with its assigned ID
    async fn create(&self, solution: Solution) -> Result<Solution, DomainError>;

    /// Update an existing solution; counter columns are left untouched
    async fn update(&self, solution: &Solution) -> Result<Solution, DomainError>;

    /// Delete a solution row; returns false if no row existed
    async fn delete(&self, id: &SolutionId) -> Result<bool, DomainError>;

    /// Add one to the view counter
    async fn increment_view_count(&self, id: &SolutionId) -> Result<(), DomainError>;

    /// Add one to the download counter
    async fn increment_download_count(&self, id: &SolutionId) -> Result<(), DomainError>;

    /// Replace the rating statistics, computed from rating records
    async fn update_rating_stats(
        &self,
        id: &SolutionId,
        rating_count: i64,
        rating_average_tenths: i64,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock solution repository for testing
    #[derive(Debug, Default)]
    pub struct MockSolutionRepository {
        solutions: Arc<RwLock<HashMap<String, Solution>>>,
    }

    impl MockSolutionRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl SolutionRepository for MockSolutionRepository {
        async fn get(&self, id: &SolutionId) -> Result<Option<Solution>, DomainError> {
            let solutions = self.solutions.read().await;
            Ok(solutions.get(id.as_str()).cloned())
        }

        async fn create(&self, mut solution: Solution) -> Result<Solution, DomainError> {
            let mut solutions = self.solutions.write().await;

            let id = match solution.solution_id() {
                Some(id) => id.clone(),
                None => SolutionId::generate(),
            };

            if solutions.contains_key(id.as_str()) {
                return Err(DomainError::conflict(format!(
                    "Solution '{}' already exists",
                    id
                )));
            }

            solution.set_solution_id(id.clone());
            solutions.insert(id.as_str().to_string(), solution.clone());
            Ok(solution)
        }

        async fn update(&self, solution: &Solution) -> Result<Solution, DomainError> {
            let mut solutions = self.solutions.write().await;

            let id = solution
                .solution_id()
                .ok_or_else(|| DomainError::validation("Cannot update an unsaved solution"))?;

            let stored = solutions.get(id.as_str()).ok_or_else(|| {
                DomainError::not_found(format!("Solution '{}' not found", id))
            })?;

            let mut updated = solution.clone();
            updated.copy_counters_from(stored);
            updated.touch();

            solutions.insert(id.as_str().to_string(), updated.clone());
            Ok(updated)
        }

        async fn delete(&self, id: &SolutionId) -> Result<bool, DomainError> {
            let mut solutions = self.solutions.write().await;
            Ok(solutions.remove(id.as_str()).is_some())
        }

        async fn increment_view_count(&self, id: &SolutionId) -> Result<(), DomainError> {
            let mut solutions = self.solutions.write().await;
            match solutions.get_mut(id.as_str()) {
                Some(solution) => {
                    solution.record_view();
                    Ok(())
                }
                None => Err(DomainError::not_found(format!(
                    "Solution '{}' not found",
                    id
                ))),
            }
        }

        async fn increment_download_count(&self, id: &SolutionId) -> Result<(), DomainError> {
            let mut solutions = self.solutions.write().await;
            match solutions.get_mut(id.as_str()) {
                Some(solution) => {
                    solution.record_download();
                    Ok(())
                }
                None => Err(DomainError::not_found(format!(
                    "Solution '{}' not found",
                    id
                ))),
            }
        }

        async fn update_rating_stats(
            &self,
            id: &SolutionId,
            rating_count: i64,
            rating_average_tenths: i64,
        ) -> Result<(), DomainError> {
            let mut solutions = self.solutions.write().await;
            match solutions.get_mut(id.as_str()) {
                Some(solution) => {
                    solution.set_rating_stats(rating_count, rating_average_tenths);
                    Ok(())
                }
                None => Err(DomainError::not_found(format!(
                    "Solution '{}' not found",
                    id
                ))),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_create_generates_id_when_absent() {
            let repo = MockSolutionRepository::new();
            let solution = Solution::new("My solution", true).unwrap();

            let created = repo.create(solution).await.unwrap();
            assert!(created.solution_id().is_some());

            let retrieved = repo.get(created.solution_id().unwrap()).await.unwrap();
            assert!(retrieved.is_some());
        }

        #[tokio::test]
        async fn test_create_keeps_client_supplied_id() {
            let repo = MockSolutionRepository::new();
            let id = SolutionId::new("12345678-abcd-90ab-cdef-1234567890ab").unwrap();

            let mut solution = Solution::new("My solution", true).unwrap();
            solution.set_solution_id(id.clone());

            let created = repo.create(solution).await.unwrap();
            assert_eq!(created.solution_id(), Some(&id));
        }

        #[tokio::test]
        async fn test_create_duplicate_id_conflicts() {
            let repo = MockSolutionRepository::new();
            let id = SolutionId::generate();

            let mut first = Solution::new("First", true).unwrap();
            first.set_solution_id(id.clone());
            repo.create(first).await.unwrap();

            let mut second = Solution::new("Second", true).unwrap();
            second.set_solution_id(id);
            assert!(repo.create(second).await.is_err());
        }

        #[tokio::test]
        async fn test_generic_update_preserves_counters() {
            let repo = MockSolutionRepository::new();
            let created = repo
                .create(Solution::new("My solution", true).unwrap())
                .await
                .unwrap();
            let id = created.solution_id().unwrap().clone();

            repo.increment_view_count(&id).await.unwrap();
            repo.increment_view_count(&id).await.unwrap();
            repo.increment_download_count(&id).await.unwrap();

            // A caller crafts an update carrying zeroed (stale) counters
            let mut stale = created.clone();
            stale.set_name("Renamed").unwrap();
            let updated = repo.update(&stale).await.unwrap();

            assert_eq!(updated.name(), "Renamed");
            assert_eq!(updated.view_count(), 2);
            assert_eq!(updated.download_count(), 1);
        }

        #[tokio::test]
        async fn test_update_missing_solution() {
            let repo = MockSolutionRepository::new();
            let mut solution = Solution::new("My solution", true).unwrap();
            solution.set_solution_id(SolutionId::generate());

            assert!(repo.update(&solution).await.is_err());
        }

        #[tokio::test]
        async fn test_rating_stats_path() {
            let repo = MockSolutionRepository::new();
            let created = repo
                .create(Solution::new("My solution", true).unwrap())
                .await
                .unwrap();
            let id = created.solution_id().unwrap().clone();

            repo.update_rating_stats(&id, 4, 35).await.unwrap();

            let stored = repo.get(&id).await.unwrap().unwrap();
            assert_eq!(stored.rating_count(), 4);
            assert_eq!(stored.rating_average_tenths(), 35);
        }

        #[tokio::test]
        async fn test_delete() {
            let repo = MockSolutionRepository::new();
            let created = repo
                .create(Solution::new("My solution", true).unwrap())
                .await
                .unwrap();
            let id = created.solution_id().unwrap().clone();

            assert!(repo.delete(&id).await.unwrap());
            assert!(!repo.delete(&id).await.unwrap());
            assert!(repo.get(&id).await.unwrap().is_none());
        }
    }
}
