use crate::model::{GroupId, MemberId, Money};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("period {period} of group {group} is outside 1..={max}")]
    PeriodOutOfRange { group: GroupId, period: u32, max: u32 },
    #[error("member {member} is unknown to group {group}")]
    UnknownMember { group: GroupId, member: MemberId },
    #[error("member {member} has already collected on every slot of group {group}")]
    NoLiveSlot { group: GroupId, member: MemberId },
    #[error("bid {bid} must not be negative")]
    NegativeBid { bid: Money },
    #[error("bid {bid} exceeds the limit of {limit}")]
    BidOverLimit { bid: Money, limit: Money },
    #[error("group {group} already has a settlement for period {period}")]
    DuplicateCollect { group: GroupId, period: u32 },
}
