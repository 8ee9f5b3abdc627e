use crate::{
    error::ValidationError,
    model::{Group, MemberId, Money, Transaction},
    services::{SettlementValidator, SlotLedger},
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionStatus {
    Full,
    Partial,
    Unpaid,
}

impl ContributionStatus {
    /// Surplus folds into `Full`; there is no separate overpaid state.
    pub fn classify(required: Money, paid: Money) -> Self {
        if required.is_zero() || !(required - paid).is_positive() {
            Self::Full
        } else if paid.is_positive() {
            Self::Partial
        } else {
            Self::Unpaid
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDetail {
    pub member_id: MemberId,
    pub dead_slots: u32,
    pub live_slots: u32,
    pub required_amount: Money,
    pub paid_amount: Money,
    /// Negative when the member paid more than required.
    pub remaining_amount: Money,
    pub status: ContributionStatus,
}

impl ContributionDetail {
    pub fn is_outstanding(&self) -> bool {
        self.remaining_amount.is_positive()
    }
}

pub struct ContributionPlanner;

impl ContributionPlanner {
    /// One entry per distinct slot holder, largest outstanding amount first.
    pub fn plan(
        &self,
        group: &Group,
        period: u32,
        bid: Money,
        winner: Option<&MemberId>,
        transactions: &[Transaction],
    ) -> Result<Vec<ContributionDetail>, ValidationError> {
        let ledger = SlotLedger::new(group, transactions);
        SettlementValidator::validate_round(&ledger, period, bid, winner)?;

        let mut plan: Vec<ContributionDetail> = ledger
            .holders()
            .map(|(member, _)| {
                let obligation = ledger.obligation(member, period, bid, winner);
                let paid = ledger.paid(member, period);
                ContributionDetail {
                    member_id: member.clone(),
                    dead_slots: obligation.dead_slots,
                    live_slots: obligation.live_slots,
                    required_amount: obligation.required,
                    paid_amount: paid,
                    remaining_amount: obligation.required - paid,
                    status: ContributionStatus::classify(obligation.required, paid),
                }
            })
            .collect();

        // Debtors come first since they are the only ones with a positive remainder.
        plan.sort_by(|a, b| b.remaining_amount.cmp(&a.remaining_amount));

        tracing::debug!(
            group = %group.id,
            period,
            entries = plan.len(),
            outstanding = plan.iter().filter(|entry| entry.is_outstanding()).count(),
            "Built contribution plan"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{four_member_group, group_with_slots, history_through_period_two};
    use rstest::{fixture, rstest};

    #[fixture]
    fn planner() -> ContributionPlanner {
        ContributionPlanner
    }

    fn entry<'a>(plan: &'a [ContributionDetail], member: &str) -> &'a ContributionDetail {
        plan.iter()
            .find(|entry| entry.member_id.as_str() == member)
            .expect("member in plan")
    }

    #[rstest]
    #[case(Money::from_i64(0), Money::from_i64(0), ContributionStatus::Full)]
    #[case(Money::from_i64(0), Money::from_i64(10), ContributionStatus::Full)]
    #[case(Money::from_i64(100), Money::from_i64(100), ContributionStatus::Full)]
    #[case(Money::from_i64(100), Money::from_i64(150), ContributionStatus::Full)]
    #[case(Money::from_i64(100), Money::from_i64(40), ContributionStatus::Partial)]
    #[case(Money::from_i64(100), Money::from_i64(0), ContributionStatus::Unpaid)]
    fn classifies_status(
        #[case] required: Money,
        #[case] paid: Money,
        #[case] expected: ContributionStatus,
    ) {
        assert_eq!(ContributionStatus::classify(required, paid), expected);
    }

    #[rstest]
    fn period_two_underpayment(planner: ContributionPlanner) {
        let plan = planner
            .plan(
                &four_member_group(),
                2,
                Money::from_i64(150_000),
                Some(&MemberId::new("m2")),
                &history_through_period_two(),
            )
            .expect("valid round");

        let m4 = entry(&plan, "m4");
        assert_eq!(m4.required_amount, Money::from_i64(850_000));
        assert_eq!(m4.paid_amount, Money::from_i64(500_000));
        assert_eq!(m4.remaining_amount, Money::from_i64(350_000));
        assert_eq!(m4.status, ContributionStatus::Partial);

        let m2 = entry(&plan, "m2");
        assert_eq!(m2.required_amount, Money::ZERO);
        assert_eq!((m2.dead_slots, m2.live_slots), (0, 0));
        assert_eq!(m2.status, ContributionStatus::Full);

        assert_eq!(entry(&plan, "m1").status, ContributionStatus::Full);
        assert_eq!(entry(&plan, "m3").status, ContributionStatus::Full);
        assert_eq!(plan[0].member_id.as_str(), "m4");
    }

    #[rstest]
    fn third_period_requirements(planner: ContributionPlanner) {
        let plan = planner
            .plan(
                &four_member_group(),
                3,
                Money::from_i64(50_000),
                Some(&MemberId::new("m3")),
                &history_through_period_two(),
            )
            .expect("valid round");

        assert_eq!(plan.len(), 4);
        assert_eq!(entry(&plan, "m1").required_amount, Money::from_i64(1_000_000));
        assert_eq!(entry(&plan, "m2").required_amount, Money::from_i64(1_000_000));
        assert_eq!(entry(&plan, "m3").required_amount, Money::ZERO);
        assert_eq!(entry(&plan, "m4").required_amount, Money::from_i64(950_000));
        assert_eq!(entry(&plan, "m3").status, ContributionStatus::Full);
        assert_eq!(entry(&plan, "m4").status, ContributionStatus::Unpaid);
    }

    #[rstest]
    fn orders_debtors_by_descending_remainder(planner: ContributionPlanner) {
        let group = group_with_slots(&["m1", "m2", "m2", "m3", "m4"]);
        let transactions = vec![
            Transaction::contribution("t1", "g1", "m1", 1, Money::from_i64(1_000_000)),
            Transaction::contribution("t2", "g1", "m3", 1, Money::from_i64(1_200_000)),
            Transaction::contribution("t3", "g1", "m4", 1, Money::from_i64(400_000)),
        ];
        let plan = planner
            .plan(&group, 1, Money::ZERO, None, &transactions)
            .expect("valid round");

        let order: Vec<_> = plan.iter().map(|entry| entry.member_id.as_str()).collect();
        assert_eq!(order, vec!["m2", "m4", "m1", "m3"]);
        assert_eq!(entry(&plan, "m2").required_amount, Money::from_i64(2_000_000));
        assert_eq!(entry(&plan, "m2").status, ContributionStatus::Unpaid);
        assert_eq!(entry(&plan, "m3").remaining_amount, Money::from_i64(-200_000));
    }

    #[rstest]
    fn winner_paying_anyway_stays_full(planner: ContributionPlanner) {
        let mut transactions = history_through_period_two();
        transactions.push(Transaction::contribution(
            "t9",
            "g1",
            "m2",
            2,
            Money::from_i64(10_000),
        ));
        let plan = planner
            .plan(
                &four_member_group(),
                2,
                Money::from_i64(150_000),
                Some(&MemberId::new("m2")),
                &transactions,
            )
            .expect("valid round");
        let m2 = entry(&plan, "m2");
        assert_eq!(m2.status, ContributionStatus::Full);
        assert_eq!(m2.remaining_amount, Money::from_i64(-10_000));
    }

    #[rstest]
    fn empty_group_yields_empty_plan(planner: ContributionPlanner) {
        let group = group_with_slots(&[]);
        let plan = planner
            .plan(&group, 1, Money::ZERO, None, &[])
            .expect("valid round");
        assert!(plan.is_empty());
    }
}
