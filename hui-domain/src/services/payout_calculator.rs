use crate::{
    error::ValidationError,
    model::{Group, MemberId, Money, Transaction},
    services::{DebtLedger, SettlementValidator, SlotLedger},
};
use serde::Serialize;

/// Settlement of one bidding round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDetail {
    pub live_slots: u32,
    pub dead_slots: u32,
    pub amount_per_live: Money,
    pub amount_per_dead: Money,
    pub total_pot: Money,
    pub commission: Money,
    pub deductions: Money,
    pub net_received: Money,
}

impl PayoutDetail {
    pub fn collected_from_live(&self) -> Money {
        self.amount_per_live.times(self.live_slots)
    }

    pub fn collected_from_dead(&self) -> Money {
        self.amount_per_dead.times(self.dead_slots)
    }
}

/// Computes what the winner of a bidding round takes home.
///
/// Live slots pay the share minus the winning bid, dead slots pay the full
/// share. The winner's own slot contributes nothing. Commission and the
/// winner's unpaid history in this group are deducted from the pot.
pub struct PayoutCalculator;

impl PayoutCalculator {
    pub fn calculate(
        &self,
        group: &Group,
        period: u32,
        bid: Money,
        winner: &MemberId,
        transactions: &[Transaction],
    ) -> Result<PayoutDetail, ValidationError> {
        let ledger = SlotLedger::new(group, transactions);
        SettlementValidator::validate_round(&ledger, period, bid, Some(winner))?;

        let dead_slots = ledger.dead_slots_before(period);
        let live_slots = ledger
            .total_slots()
            .saturating_sub(dead_slots)
            .saturating_sub(1);

        let amount_per_live = group.share_amount - bid;
        let amount_per_dead = group.share_amount;
        let total_pot = amount_per_live.times(live_slots) + amount_per_dead.times(dead_slots);
        let commission = group.commission();
        let deductions = DebtLedger.debt_in(&ledger, winner, period);
        let net_received = total_pot - commission - deductions;

        tracing::debug!(
            group = %group.id,
            period,
            winner = %winner,
            bid = %bid,
            live_slots,
            dead_slots,
            total_pot = %total_pot,
            deductions = %deductions,
            "Calculated payout"
        );

        Ok(PayoutDetail {
            live_slots,
            dead_slots,
            amount_per_live,
            amount_per_dead,
            total_pot,
            commission,
            deductions,
            net_received,
        })
    }
}
