//! Solution group and membership repository traits

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{SolutionGroup, SolutionGroupMember};
use crate::domain::page::{Page, PageRequest};
use crate::domain::solution::SolutionId;
use crate::domain::DomainError;

/// Repository trait for solution groups
#[async_trait]
pub trait SolutionGroupRepository: Send + Sync + Debug {
    async fn get(&self, group_id: i64) -> Result<Option<SolutionGroup>, DomainError>;

    /// Create a group; the store assigns the generated group ID
    async fn create(&self, group: SolutionGroup) -> Result<SolutionGroup, DomainError>;

    async fn update(&self, group: &SolutionGroup) -> Result<SolutionGroup, DomainError>;

    async fn delete(&self, group_id: i64) -> Result<bool, DomainError>;

    /// List groups a page at a time, ordered by group ID
    async fn list(&self, page: &PageRequest) -> Result<Page<SolutionGroup>, DomainError>;
}

/// Repository trait for the group-to-solution membership table
#[async_trait]
pub trait GroupMemberRepository: Send + Sync + Debug {
    /// Insert a membership row; duplicates are a conflict
    async fn add_member(
        &self,
        member: SolutionGroupMember,
    ) -> Result<SolutionGroupMember, DomainError>;

    /// Remove a membership row; returns false if no row existed
    async fn drop_member(
        &self,
        group_id: i64,
        solution_id: &SolutionId,
    ) -> Result<bool, DomainError>;

    /// IDs of all solutions in the group, unordered
    async fn find_solution_ids_in_group(
        &self,
        group_id: i64,
    ) -> Result<Vec<SolutionId>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock group repository backed by a map, assigning sequential IDs
    #[derive(Debug, Default)]
    pub struct MockSolutionGroupRepository {
        groups: Arc<RwLock<HashMap<i64, SolutionGroup>>>,
        next_id: Arc<RwLock<i64>>,
    }

    impl MockSolutionGroupRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl SolutionGroupRepository for MockSolutionGroupRepository {
        async fn get(&self, group_id: i64) -> Result<Option<SolutionGroup>, DomainError> {
            let groups = self.groups.read().await;
            Ok(groups.get(&group_id).cloned())
        }

        async fn create(&self, mut group: SolutionGroup) -> Result<SolutionGroup, DomainError> {
            let mut groups = self.groups.write().await;
            let mut next_id = self.next_id.write().await;

            *next_id += 1;
            group.set_group_id(*next_id);
            groups.insert(*next_id, group.clone());
            Ok(group)
        }

        async fn update(&self, group: &SolutionGroup) -> Result<SolutionGroup, DomainError> {
            let mut groups = self.groups.write().await;
            let id = group
                .group_id()
                .ok_or_else(|| DomainError::validation("Cannot update an unsaved group"))?;

            if !groups.contains_key(&id) {
                return Err(DomainError::not_found(format!("Group '{}' not found", id)));
            }

            groups.insert(id, group.clone());
            Ok(group.clone())
        }

        async fn delete(&self, group_id: i64) -> Result<bool, DomainError> {
            let mut groups = self.groups.write().await;
            Ok(groups.remove(&group_id).is_some())
        }

        async fn list(&self, page: &PageRequest) -> Result<Page<SolutionGroup>, DomainError> {
            let groups = self.groups.read().await;

            let mut all: Vec<SolutionGroup> = groups.values().cloned().collect();
            all.sort_by_key(|g| g.group_id());

            let total = all.len();
            let items = all
                .into_iter()
                .skip(page.offset())
                .take(page.size)
                .collect();

            Ok(Page::new(items, page, total))
        }
    }

    /// Mock membership repository keyed by the composite key
    #[derive(Debug, Default)]
    pub struct MockGroupMemberRepository {
        members: Arc<RwLock<HashMap<(i64, String), SolutionGroupMember>>>,
    }

    impl MockGroupMemberRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl GroupMemberRepository for MockGroupMemberRepository {
        async fn add_member(
            &self,
            member: SolutionGroupMember,
        ) -> Result<SolutionGroupMember, DomainError> {
            let mut members = self.members.write().await;
            let key = (member.group_id(), member.solution_id().as_str().to_string());

            if members.contains_key(&key) {
                return Err(DomainError::conflict(format!(
                    "Solution '{}' is already in group '{}'",
                    member.solution_id(),
                    member.group_id()
                )));
            }

            let stored = SolutionGroupMember::from_storage(
                member.group_id(),
                member.solution_id().clone(),
                Utc::now(),
            );
            members.insert(key, stored.clone());
            Ok(stored)
        }

        async fn drop_member(
            &self,
            group_id: i64,
            solution_id: &SolutionId,
        ) -> Result<bool, DomainError> {
            let mut members = self.members.write().await;
            let key = (group_id, solution_id.as_str().to_string());
            Ok(members.remove(&key).is_some())
        }

        async fn find_solution_ids_in_group(
            &self,
            group_id: i64,
        ) -> Result<Vec<SolutionId>, DomainError> {
            let members = self.members.read().await;
            Ok(members
                .values()
                .filter(|m| m.group_id() == group_id)
                .map(|m| m.solution_id().clone())
                .collect())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_create_assigns_group_id() {
            let repo = MockSolutionGroupRepository::new();
            let created = repo
                .create(SolutionGroup::new("Restricted partners").unwrap())
                .await
                .unwrap();
            assert!(created.group_id().is_some());
        }

        #[tokio::test]
        async fn test_group_list_pages() {
            let repo = MockSolutionGroupRepository::new();
            for i in 0..5 {
                repo.create(SolutionGroup::new(format!("Group {}", i)).unwrap())
                    .await
                    .unwrap();
            }

            let page = repo.list(&PageRequest::new(1, 2)).await.unwrap();
            assert_eq!(page.items.len(), 2);
            assert_eq!(page.total_elements, 5);
            assert_eq!(page.total_pages(), 3);
        }

        #[tokio::test]
        async fn test_membership_lifecycle() {
            let repo = MockGroupMemberRepository::new();
            let solution_id = SolutionId::generate();

            let member = SolutionGroupMember::new(1, solution_id.clone()).unwrap();
            let stored = repo.add_member(member.clone()).await.unwrap();
            assert!(stored.created().is_some());

            // Second insert of the same key conflicts
            assert!(repo.add_member(member).await.is_err());

            let ids = repo.find_solution_ids_in_group(1).await.unwrap();
            assert_eq!(ids, vec![solution_id.clone()]);

            assert!(repo.drop_member(1, &solution_id).await.unwrap());
            assert!(!repo.drop_member(1, &solution_id).await.unwrap());
            assert!(repo.find_solution_ids_in_group(1).await.unwrap().is_empty());
        }
    }
}
