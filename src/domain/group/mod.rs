//! Solution groups and group membership

mod entity;
mod repository;

pub use entity::{
    GroupValidationError, SolutionGroup, SolutionGroupMember, MAX_GROUP_NAME_LENGTH,
};
pub use repository::{GroupMemberRepository, SolutionGroupRepository};
