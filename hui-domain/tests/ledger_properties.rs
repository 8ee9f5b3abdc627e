use hui_domain::{
    BiddingRule, Cadence, CommissionType, ContributionPlanner, ContributionStatus, DebtLedger,
    Group, GroupId, GroupStatus, MemberId, Money, PayoutCalculator, Transaction,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

const SHARE: i64 = 1_000_000;

fn group(slot_owners: &[usize], current_period: u32) -> Group {
    Group {
        id: GroupId::new("g1"),
        name: "Property".to_owned(),
        cadence: Cadence::Monthly,
        share_amount: Money::from_i64(SHARE),
        commission_type: CommissionType::Percent,
        commission_rate: Decimal::new(3, 0),
        start_date: String::new(),
        status: GroupStatus::Active,
        bidding_rule: BiddingRule::OpenBid,
        max_bid_limit: Money::ZERO,
        members: slot_owners
            .iter()
            .map(|owner| MemberId::from(format!("m{owner}")))
            .collect(),
        current_period,
    }
}

/// Settles `rounds` periods, picking each winner among the still-live slots.
fn history(
    slot_owners: &[usize],
    rounds: usize,
    bids: &[i64],
    winner_picks: &[usize],
    payments: &[i64],
) -> Vec<Transaction> {
    let mut live: Vec<usize> = slot_owners.to_vec();
    let mut transactions = Vec::new();
    let mut next_id = 0usize;
    let mut id = || {
        next_id += 1;
        format!("t{next_id}")
    };

    for round in 0..rounds {
        let period = round as u32 + 1;
        let pick = winner_picks.get(round).copied().unwrap_or(0) % live.len();
        let winner = live.remove(pick);
        let bid = bids.get(round).copied().unwrap_or(0);
        transactions.push(Transaction::collection(
            id(),
            "g1",
            format!("m{winner}"),
            period,
            Money::from_i64(bid),
        ));
        for (idx, owner) in slot_owners.iter().enumerate() {
            let amount = payments
                .get(round * slot_owners.len() + idx)
                .copied()
                .unwrap_or(0);
            if amount > 0 {
                transactions.push(Transaction::contribution(
                    id(),
                    "g1",
                    format!("m{owner}"),
                    period,
                    Money::from_i64(amount),
                ));
            }
        }
    }
    transactions
}

prop_compose! {
    fn scenario()(
        slot_owners in prop::collection::vec(0usize..4, 2..=7),
        bids in prop::collection::vec(0i64..=SHARE, 7),
        winner_picks in prop::collection::vec(0usize..16, 7),
        payments in prop::collection::vec(0i64..=2 * SHARE, 49),
        rounds_seed in 0usize..16,
    ) -> (Vec<usize>, usize, Vec<i64>, Vec<usize>, Vec<i64>) {
        let rounds = rounds_seed % slot_owners.len();
        (slot_owners, rounds, bids, winner_picks, payments)
    }
}

proptest! {
    #[test]
    fn payout_conserves_pot(
        (owners, rounds, bids, picks, payments) in scenario(),
        bid in 0i64..=SHARE,
        pick in 0usize..16,
    ) {
        let transactions = history(&owners, rounds, &bids, &picks, &payments);
        let period = rounds as u32 + 1;
        let group = group(&owners, period);

        let mut live: Vec<usize> = owners.clone();
        for tx in transactions.iter().filter(|tx| tx.is_collect()) {
            let owner: usize = tx.member_id.as_str()[1..].parse().unwrap();
            let pos = live.iter().position(|o| *o == owner).unwrap();
            live.remove(pos);
        }
        let winner = MemberId::from(format!("m{}", live[pick % live.len()]));

        let detail = PayoutCalculator
            .calculate(&group, period, Money::from_i64(bid), &winner, &transactions)
            .unwrap();

        let share = Money::from_i64(SHARE);
        let bid = Money::from_i64(bid);
        prop_assert_eq!(detail.dead_slots, rounds as u32);
        prop_assert_eq!(detail.live_slots + detail.dead_slots + 1, owners.len() as u32);
        prop_assert_eq!(
            detail.total_pot,
            (share - bid).times(detail.live_slots) + share.times(detail.dead_slots)
        );
        prop_assert_eq!(
            detail.net_received,
            detail.total_pot - detail.commission - detail.deductions
        );

        let again = PayoutCalculator
            .calculate(&group, period, bid, &winner, &transactions)
            .unwrap();
        prop_assert_eq!(detail, again);
    }

    #[test]
    fn winner_is_always_exempt(
        (owners, rounds, bids, picks, payments) in scenario(),
        bid in 0i64..=SHARE,
    ) {
        prop_assume!(rounds > 0);
        let transactions = history(&owners, rounds, &bids, &picks, &payments);
        let period = rounds as u32;
        let group = group(&owners, period + 1);
        let winner = transactions
            .iter()
            .find(|tx| tx.is_collect() && tx.period == period)
            .map(|tx| tx.member_id.clone())
            .unwrap();

        let plan = ContributionPlanner
            .plan(&group, period, Money::from_i64(bid), Some(&winner), &transactions)
            .unwrap();

        let entry = plan.iter().find(|entry| entry.member_id == winner).unwrap();
        prop_assert!(entry.required_amount.is_zero());
        prop_assert_eq!(entry.status, ContributionStatus::Full);

        for pair in plan.windows(2) {
            prop_assert!(pair[0].remaining_amount >= pair[1].remaining_amount);
        }
        for entry in &plan {
            prop_assert_eq!(entry.remaining_amount, entry.required_amount - entry.paid_amount);
        }
    }

    #[test]
    fn debt_never_negative_and_not_offset_by_surplus(
        (owners, rounds, bids, picks, payments) in scenario(),
        member in 0usize..4,
        surplus in 1i64..=SHARE,
    ) {
        let transactions = history(&owners, rounds, &bids, &picks, &payments);
        let groups = vec![group(&owners, rounds as u32 + 1)];
        let member = MemberId::from(format!("m{member}"));

        let debt = DebtLedger.member_total_debt(&member, &groups, &transactions);
        prop_assert!(!debt.is_negative());

        let breakdown = DebtLedger.shortfalls(&member, &groups, &transactions);
        let breakdown_total: Money = breakdown.iter().map(|entry| entry.shortfall).sum();
        prop_assert_eq!(debt, breakdown_total);

        let mut overpaid = transactions.clone();
        overpaid.push(Transaction::contribution(
            "extra",
            "g1",
            member.clone(),
            1,
            Money::from_i64(surplus),
        ));
        let after = DebtLedger.member_total_debt(&member, &groups, &overpaid);
        let period_one = breakdown
            .iter()
            .find(|entry| entry.period == 1)
            .map(|entry| entry.shortfall)
            .unwrap_or(Money::ZERO);
        // Only period 1 can shrink, and never below zero.
        prop_assert_eq!(after, debt - period_one.min(Money::from_i64(surplus)));
    }

    #[test]
    fn debt_grows_with_unpaid_periods(
        (owners, rounds, bids, picks, payments) in scenario(),
        member in 0usize..4,
    ) {
        prop_assume!(rounds > 0);
        let transactions = history(&owners, rounds, &bids, &picks, &payments);
        let member = MemberId::from(format!("m{member}"));

        let mut previous = Money::ZERO;
        for current in 1..=rounds as u32 + 1 {
            let groups = vec![group(&owners, current)];
            let debt = DebtLedger.member_total_debt(&member, &groups, &transactions);
            prop_assert!(debt >= previous);
            previous = debt;
        }
    }
}
