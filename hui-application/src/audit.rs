use crate::{
    model::{
        AuditAction, AuditContext, AuditContextInput, AuditContextOutput, AuditInput, AuditLog,
        AuditResult, AuditStateBefore,
    },
    ports::{Clock, IdGenerator},
};
use hui_domain::{ContributionDetail, Group, MemberId, Money, PayoutDetail};

/// Turns engine results into audit records stamped with the current time.
#[derive(Clone, Copy)]
pub struct AuditLogBuilder<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> AuditLogBuilder<'a> {
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { clock, ids }
    }

    pub fn collect_log(
        &self,
        group: &Group,
        winner: &MemberId,
        bid: Money,
        payout: &PayoutDetail,
    ) -> AuditLog {
        let scenario = format!(
            "Collect period {} of group {}",
            group.current_period, group.name
        );
        let context = AuditContext {
            scenario_name: scenario.clone(),
            input_params: AuditContextInput {
                base_value: group.share_amount,
                total_slots: group.slot_count(),
                dead_slots_count: payout.dead_slots,
                live_slots_count: payout.live_slots,
                winning_bid: bid,
                commission: payout.commission,
            },
            app_output: AuditContextOutput {
                total_collected_from_live: payout.collected_from_live(),
                total_collected_from_dead: payout.collected_from_dead(),
                final_payout_to_winner: payout.net_received,
            },
        };

        AuditLog {
            id: self.ids.next_id("LOG"),
            timestamp: self.timestamp(),
            action: AuditAction::CollectExecution,
            user_id: winner.clone(),
            scenario,
            state_before: AuditStateBefore {
                current_period: group.current_period,
                total_members: group.slot_count(),
                live_members_count: Some(payout.live_slots),
                dead_members_count: Some(payout.dead_slots),
                debt_existing: payout.deductions,
            },
            input_parameters: AuditInput {
                base_amount: group.share_amount,
                bid_amount: Some(bid),
                commission_rate: Some(group.commission_rate),
                payment_amount: None,
            },
            result_calculated: AuditResult {
                net_amount_received: Some(payout.net_received),
                remaining_debt: None,
                logic_description: format!(
                    "Payout = ({} * (V - B)) + ({} * V) - Commission - Deductions",
                    payout.live_slots, payout.dead_slots
                ),
            },
            context: Some(context),
        }
    }

    /// `entry` is the member's plan line before `paid` was recorded.
    pub fn payment_log(&self, group: &Group, entry: &ContributionDetail, paid: Money) -> AuditLog {
        let required = entry.required_amount;
        let paid_total = entry.paid_amount + paid;
        AuditLog {
            id: self.ids.next_id("LOG"),
            timestamp: self.timestamp(),
            action: AuditAction::PaymentRecord,
            user_id: entry.member_id.clone(),
            scenario: format!("Payment for period {}", group.current_period),
            state_before: AuditStateBefore {
                current_period: group.current_period,
                total_members: group.slot_count(),
                live_members_count: None,
                dead_members_count: None,
                debt_existing: required,
            },
            input_parameters: AuditInput {
                base_amount: group.share_amount,
                bid_amount: None,
                commission_rate: None,
                payment_amount: Some(paid),
            },
            result_calculated: AuditResult {
                net_amount_received: None,
                remaining_debt: Some(required - paid_total),
                logic_description: format!("Remaining = Required ({required}) - Paid ({paid_total})"),
            },
            context: None,
        }
    }

    fn timestamp(&self) -> String {
        self.clock.now().format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
