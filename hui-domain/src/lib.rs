#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

#[cfg(test)]
mod test_fixtures;

pub use error::ValidationError;
pub use model::{
    BiddingRule, Cadence, CommissionType, Group, GroupId, GroupStatus, Member, MemberId,
    MemberStatus, Money, Transaction, TransactionId, TransactionKind,
};
pub use services::{
    CashflowBucket, CashflowProjector, ContributionDetail, ContributionPlanner,
    ContributionStatus, DebtLedger, PayoutCalculator, PayoutDetail, PeriodShortfall,
    SettlementValidator, SlotLedger, SlotObligation,
};
