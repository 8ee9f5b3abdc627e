use crate::{
    error::ValidationError,
    model::{Group, Member, MemberId, Money},
    services::SlotLedger,
};
use fxhash::FxHashSet;

/// Guards run before any settlement or contribution computation.
pub struct SettlementValidator;

impl SettlementValidator {
    /// Checks a bidding round for `period` of the ledger's group.
    ///
    /// `winner` is optional because a contribution plan can be drawn up before
    /// the round is decided.
    pub fn validate_round(
        ledger: &SlotLedger<'_>,
        period: u32,
        bid: Money,
        winner: Option<&MemberId>,
    ) -> Result<(), ValidationError> {
        let group = ledger.group();

        if period == 0 || period > group.current_period {
            return Err(ValidationError::PeriodOutOfRange {
                group: group.id.clone(),
                period,
                max: group.current_period,
            });
        }

        Self::validate_bid(group, bid)?;

        if let Some(winner) = winner {
            if ledger.slots_of(winner) == 0 {
                return Err(ValidationError::UnknownMember {
                    group: group.id.clone(),
                    member: winner.clone(),
                });
            }
            if ledger.member_live_slots_at(winner, period) == 0 {
                return Err(ValidationError::NoLiveSlot {
                    group: group.id.clone(),
                    member: winner.clone(),
                });
            }
        }

        if let Some(duplicate) = ledger.duplicate_settlement() {
            return Err(ValidationError::DuplicateCollect {
                group: group.id.clone(),
                period: duplicate,
            });
        }

        Ok(())
    }

    pub fn validate_bid(group: &Group, bid: Money) -> Result<(), ValidationError> {
        if bid.is_negative() {
            return Err(ValidationError::NegativeBid { bid });
        }
        if bid > group.share_amount {
            return Err(ValidationError::BidOverLimit {
                bid,
                limit: group.share_amount,
            });
        }
        if group.max_bid_limit.is_positive() && bid > group.max_bid_limit {
            return Err(ValidationError::BidOverLimit {
                bid,
                limit: group.max_bid_limit,
            });
        }
        Ok(())
    }

    /// Checks the group record itself against the member directory.
    pub fn validate_group(group: &Group, members: &[Member]) -> Result<(), ValidationError> {
        let known: FxHashSet<&MemberId> = members.iter().map(|member| &member.id).collect();
        if let Some(unknown) = group.members.iter().find(|id| !known.contains(id)) {
            return Err(ValidationError::UnknownMember {
                group: group.id.clone(),
                member: unknown.clone(),
            });
        }

        let max = group.slot_count() + 1;
        if group.current_period == 0 || group.current_period > max {
            return Err(ValidationError::PeriodOutOfRange {
                group: group.id.clone(),
                period: group.current_period,
                max,
            });
        }

        Ok(())
    }
}
