//! Solution group and group membership entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::solution::SolutionId;

/// GROUP NAME column is VARCHAR(100)
pub const MAX_GROUP_NAME_LENGTH: usize = 100;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroupValidationError {
    #[error("Group name cannot be empty")]
    EmptyName,

    #[error("Group name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Group ID must be a positive value fitting the INT column, got {0}")]
    InvalidGroupId(i64),
}

fn validate_group_name(name: &str) -> Result<(), GroupValidationError> {
    if name.is_empty() {
        return Err(GroupValidationError::EmptyName);
    }
    if name.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(GroupValidationError::NameTooLong(MAX_GROUP_NAME_LENGTH));
    }
    Ok(())
}

/// An ID-name pair supporting access control, mapped to the
/// C_SOLUTION_GROUP table. The ID is generated by the store on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<i64>,
    name: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl SolutionGroup {
    pub fn new(name: impl Into<String>) -> Result<Self, GroupValidationError> {
        let name = name.into();
        validate_group_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            group_id: None,
            name,
            created: now,
            modified: now,
        })
    }

    /// Hydration path for storage implementations
    pub fn from_storage(
        group_id: i64,
        name: String,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id: Some(group_id),
            name,
            created,
            modified,
        }
    }

    pub fn group_id(&self) -> Option<i64> {
        self.group_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), GroupValidationError> {
        let name = name.into();
        validate_group_name(&name)?;
        self.name = name;
        self.modified = Utc::now();
        Ok(())
    }

    pub(crate) fn set_group_id(&mut self, group_id: i64) {
        self.group_id = Some(group_id);
    }
}

impl PartialEq for SolutionGroup {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
    }
}

impl Eq for SolutionGroup {}

impl std::hash::Hash for SolutionGroup {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
    }
}

/// A row in the group-to-solution membership table C_SOL_GRP_MEM_MAP.
///
/// The composite (group_id, solution_id) key is the row's whole identity;
/// the creation timestamp is set once by the store and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionGroupMember {
    group_id: i64,
    solution_id: SolutionId,
    /// Set by the store at insertion; None before persistence
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
}

impl SolutionGroupMember {
    /// Both key parts are required; the group ID must fit the INT column
    pub fn new(group_id: i64, solution_id: SolutionId) -> Result<Self, GroupValidationError> {
        if group_id <= 0 || i32::try_from(group_id).is_err() {
            return Err(GroupValidationError::InvalidGroupId(group_id));
        }
        Ok(Self {
            group_id,
            solution_id,
            created: None,
        })
    }

    /// Hydration path for storage implementations
    pub fn from_storage(group_id: i64, solution_id: SolutionId, created: DateTime<Utc>) -> Self {
        Self {
            group_id,
            solution_id,
            created: Some(created),
        }
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn solution_id(&self) -> &SolutionId {
        &self.solution_id
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}

impl PartialEq for SolutionGroupMember {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id && self.solution_id == other.solution_id
    }
}

impl Eq for SolutionGroupMember {}

impl std::hash::Hash for SolutionGroupMember {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.solution_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_group_requires_name() {
        assert!(SolutionGroup::new("Restricted partners").is_ok());
        assert_eq!(
            SolutionGroup::new("").unwrap_err(),
            GroupValidationError::EmptyName
        );
        assert_eq!(
            SolutionGroup::new("g".repeat(101)).unwrap_err(),
            GroupValidationError::NameTooLong(MAX_GROUP_NAME_LENGTH)
        );
    }

    #[test]
    fn test_group_id_unset_until_persisted() {
        let group = SolutionGroup::new("Restricted partners").unwrap();
        assert!(group.group_id().is_none());
    }

    #[test]
    fn test_group_equality_by_id() {
        let first = SolutionGroup::from_storage(7, "A".into(), Utc::now(), Utc::now());
        let second = SolutionGroup::from_storage(7, "B".into(), Utc::now(), Utc::now());
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_member_requires_key_parts() {
        let solution_id = SolutionId::generate();
        assert!(SolutionGroupMember::new(1, solution_id.clone()).is_ok());
        assert!(SolutionGroupMember::new(0, solution_id).is_err());
    }

    #[test]
    fn test_member_group_id_bounded_by_column() {
        let solution_id = SolutionId::generate();
        assert!(SolutionGroupMember::new(i64::from(i32::MAX), solution_id.clone()).is_ok());

        // A key beyond the INT column range cannot exist in the store
        assert_eq!(
            SolutionGroupMember::new(i64::from(i32::MAX) + 1, solution_id).unwrap_err(),
            GroupValidationError::InvalidGroupId(i64::from(i32::MAX) + 1)
        );
    }

    #[test]
    fn test_member_composite_key_equality_ignores_created() {
        let solution_id = SolutionId::generate();
        let earlier = Utc::now() - chrono::Duration::days(1);

        let first = SolutionGroupMember::from_storage(3, solution_id.clone(), earlier);
        let second = SolutionGroupMember::from_storage(3, solution_id.clone(), Utc::now());
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));

        let other = SolutionGroupMember::from_storage(4, solution_id, earlier);
        assert_ne!(first, other);
    }

    #[test]
    fn test_member_clone_copies_created() {
        let member = SolutionGroupMember::from_storage(3, SolutionId::generate(), Utc::now());
        let copy = member.clone();
        assert_eq!(copy.created(), member.created());
        assert_eq!(copy, member);
    }
}
