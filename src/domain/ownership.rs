use crate::domain::ids::UserId;

/// Outcome of the ownership gate shared by every owner-only mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Unauthorized,
}

impl Authorization {
    pub const fn is_authorized(self) -> bool {
        matches!(self, Authorization::Authorized)
    }
}

/// Only the user who created a resource may change or remove it.
pub fn authorize(resource_owner: UserId, current_user: UserId) -> Authorization {
    if resource_owner == current_user {
        Authorization::Authorized
    } else {
        Authorization::Unauthorized
    }
}
