use hui_domain::{GroupId, MemberId, Money, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot '{path}': {detail}")]
    Malformed { path: String, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("phone number {0} is already registered")]
    DuplicatePhone(String),
    #[error("member {member} still takes part in {groups} active group(s)")]
    ActiveMembership { member: MemberId, groups: usize },
    #[error("member {0} not found")]
    NotFound(MemberId),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Member(#[from] MemberError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("group {0} not found")]
    GroupNotFound(GroupId),
    #[error("group {0} already exists")]
    DuplicateGroup(GroupId),
    #[error("group {0} has already completed")]
    GroupCompleted(GroupId),
    #[error("period {period} of group {group} has no settlement yet")]
    PeriodNotSettled { group: GroupId, period: u32 },
    #[error("payment amount {0} must be positive")]
    InvalidPayment(Money),
}
