use crate::{
    model::AppState,
    ports::{Clock, IdGenerator},
};
use chrono::{NaiveDate, NaiveDateTime};
use hui_domain::{
    BiddingRule, Cadence, CommissionType, Group, GroupId, GroupStatus, Member, MemberId, Money,
    Transaction,
};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let now = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Default)]
pub struct SequentialIds(AtomicUsize);

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let next = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{next}")
    }
}

/// Four single-slot members, two periods settled, now on period 3.
pub fn sample_group() -> Group {
    Group {
        id: GroupId::new("g1"),
        name: "Alpha".to_owned(),
        cadence: Cadence::Monthly,
        share_amount: Money::from_i64(1_000_000),
        commission_type: CommissionType::Percent,
        commission_rate: Decimal::new(5, 0),
        start_date: "2024-01-01".to_owned(),
        status: GroupStatus::Active,
        bidding_rule: BiddingRule::OpenBid,
        max_bid_limit: Money::ZERO,
        members: ["m1", "m2", "m3", "m4"].into_iter().map(MemberId::new).collect(),
        current_period: 3,
    }
}

pub fn sample_state() -> AppState {
    let share = Money::from_i64(1_000_000);
    AppState {
        members: vec![
            member("m1", "An", "0901"),
            member("m2", "Binh", "0902"),
            member("m3", "Chi", "0903"),
            member("m4", "Dung", "0904"),
        ],
        groups: vec![sample_group()],
        transactions: vec![
            Transaction::collection("t1", "g1", "m1", 1, Money::from_i64(100_000)),
            Transaction::contribution("t2", "g1", "m2", 1, Money::from_i64(900_000)),
            Transaction::contribution("t3", "g1", "m3", 1, Money::from_i64(900_000)),
            Transaction::contribution("t4", "g1", "m4", 1, Money::from_i64(900_000)),
            Transaction::collection("t5", "g1", "m2", 2, Money::from_i64(150_000)),
            Transaction::contribution("t6", "g1", "m1", 2, share),
            Transaction::contribution("t7", "g1", "m3", 2, Money::from_i64(850_000)),
            Transaction::contribution("t8", "g1", "m4", 2, Money::from_i64(500_000)),
        ],
        audit_logs: Vec::new(),
    }
}

fn member(id: &str, name: &str, phone: &str) -> Member {
    let mut member = Member::new(id, name);
    member.phone = phone.to_owned();
    member
}
