use crate::{
    model::{Group, GroupId, MemberId, Money, Transaction},
    services::SlotLedger,
};
use serde::Serialize;

/// Unpaid part of one member's obligation for one past period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodShortfall {
    pub group_id: GroupId,
    pub period: u32,
    pub required: Money,
    pub paid: Money,
    pub shortfall: Money,
}

/// Accumulates unpaid contributions over past periods.
///
/// Shortfalls are summed per period and never netted against a surplus paid
/// in another period, so the total only moves upward as periods pass.
pub struct DebtLedger;

impl DebtLedger {
    /// Debt over periods `1..currentPeriod` of every group holding `member`.
    pub fn member_total_debt(
        &self,
        member: &MemberId,
        groups: &[Group],
        transactions: &[Transaction],
    ) -> Money {
        groups
            .iter()
            .filter(|group| group.holds_slot(member))
            .map(|group| {
                let ledger = SlotLedger::new(group, transactions);
                warn_unsettled(&ledger, group.current_period);
                self.debt_in(&ledger, member, group.current_period)
            })
            .sum()
    }

    /// Debt owed by every slot holder of every group, one pass per group.
    pub fn outstanding_total(&self, groups: &[Group], transactions: &[Transaction]) -> Money {
        groups
            .iter()
            .map(|group| {
                let ledger = SlotLedger::new(group, transactions);
                warn_unsettled(&ledger, group.current_period);
                ledger
                    .holders()
                    .map(|(member, _)| self.debt_in(&ledger, member, group.current_period))
                    .sum::<Money>()
            })
            .sum()
    }

    /// Debt within `group` over periods `1..before_period`.
    pub fn member_group_debt(
        &self,
        member: &MemberId,
        group: &Group,
        transactions: &[Transaction],
        before_period: u32,
    ) -> Money {
        if !group.holds_slot(member) {
            return Money::ZERO;
        }
        self.debt_in(&SlotLedger::new(group, transactions), member, before_period)
    }

    /// Every positive shortfall behind [`Self::member_total_debt`], group by group.
    pub fn shortfalls(
        &self,
        member: &MemberId,
        groups: &[Group],
        transactions: &[Transaction],
    ) -> Vec<PeriodShortfall> {
        let mut result = Vec::new();
        for group in groups.iter().filter(|group| group.holds_slot(member)) {
            let ledger = SlotLedger::new(group, transactions);
            warn_unsettled(&ledger, group.current_period);
            result.extend(period_shortfalls(&ledger, member, group.current_period));
        }
        result
    }

    pub(crate) fn debt_in(
        &self,
        ledger: &SlotLedger<'_>,
        member: &MemberId,
        before_period: u32,
    ) -> Money {
        period_shortfalls(ledger, member, before_period)
            .map(|entry| entry.shortfall)
            .sum()
    }
}

fn warn_unsettled(ledger: &SlotLedger<'_>, before_period: u32) {
    for period in (1..before_period).filter(|period| ledger.settlement(*period).is_none()) {
        tracing::warn!(
            group = %ledger.group().id,
            period,
            "No settlement recorded for past period; assuming zero bid"
        );
    }
}

fn period_shortfalls<'l>(
    ledger: &'l SlotLedger<'_>,
    member: &'l MemberId,
    before_period: u32,
) -> impl Iterator<Item = PeriodShortfall> + 'l {
    (1..before_period).filter_map(move |period| {
        let (winner, bid) = match ledger.settlement(period) {
            Some(tx) => (Some(&tx.member_id), tx.bid()),
            // An unsettled past period is priced as a zero bid.
            None => (None, Money::ZERO),
        };

        let obligation = ledger.obligation(member, period, bid, winner);
        let paid = ledger.paid(member, period);
        let shortfall = obligation.required - paid;
        shortfall.is_positive().then(|| PeriodShortfall {
            group_id: ledger.group().id.clone(),
            period,
            required: obligation.required,
            paid,
            shortfall,
        })
    })
}
