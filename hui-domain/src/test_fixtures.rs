use crate::model::{
    BiddingRule, Cadence, CommissionType, Group, GroupId, GroupStatus, MemberId, Money,
    Transaction,
};
use rust_decimal::Decimal;

pub(crate) fn group_with_slots(members: &[&str]) -> Group {
    Group {
        id: GroupId::new("g1"),
        name: "Test Hui".to_owned(),
        cadence: Cadence::Monthly,
        share_amount: Money::from_i64(1_000_000),
        commission_type: CommissionType::Percent,
        commission_rate: Decimal::new(5, 0),
        start_date: "2024-01-01".to_owned(),
        status: GroupStatus::Active,
        bidding_rule: BiddingRule::OpenBid,
        max_bid_limit: Money::ZERO,
        members: members.iter().copied().map(MemberId::new).collect(),
        current_period: 1,
    }
}

/// Four single-slot members, periods 1 and 2 settled.
pub(crate) fn four_member_group() -> Group {
    Group {
        current_period: 3,
        ..group_with_slots(&["m1", "m2", "m3", "m4"])
    }
}

/// m1 wins period 1 at 100k, m2 wins period 2 at 150k, m4 underpays period 2 by 350k.
pub(crate) fn history_through_period_two() -> Vec<Transaction> {
    let money = Money::from_i64;
    vec![
        Transaction::collection("t1", "g1", "m1", 1, money(100_000)),
        Transaction::contribution("t2", "g1", "m2", 1, money(900_000)),
        Transaction::contribution("t3", "g1", "m3", 1, money(900_000)),
        Transaction::contribution("t4", "g1", "m4", 1, money(900_000)),
        Transaction::collection("t5", "g1", "m2", 2, money(150_000)),
        Transaction::contribution("t6", "g1", "m1", 2, money(1_000_000)),
        Transaction::contribution("t7", "g1", "m3", 2, money(850_000)),
        Transaction::contribution("t8", "g1", "m4", 2, money(500_000)),
    ]
}
