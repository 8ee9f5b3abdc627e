use chrono::NaiveDate;
use hui_application::AppState;
use hui_domain::{
    BiddingRule, Cadence, CommissionType, Group, GroupId, GroupStatus, Member, MemberId,
    MemberStatus, Money, Transaction,
};
use rust_decimal::Decimal;

/// Demo document used when no data file exists yet.
pub fn sample_state(today: NaiveDate) -> AppState {
    let date = today.to_string();
    AppState {
        members: members(&date),
        groups: groups(&date),
        transactions: transactions(&date),
        audit_logs: Vec::new(),
    }
}

fn members(date: &str) -> Vec<Member> {
    let rows = [
        ("m1", "Nguyễn Văn An", "0912345678", "123 Lê Lợi, Q1, TP.HCM", 95, MemberStatus::Trusted, "Always pays on time"),
        ("m2", "Trần Thị Bình", "0923456789", "456 Nguyễn Huệ, Q1, TP.HCM", 88, MemberStatus::Normal, ""),
        ("m3", "Lê Văn Cường", "0934567890", "789 Trần Hưng Đạo, Q5, TP.HCM", 92, MemberStatus::Normal, "Often travels for work"),
        ("m4", "Phạm Thị Dung", "0945678901", "321 Võ Văn Tần, Q3, TP.HCM", 78, MemberStatus::Normal, ""),
        ("m5", "Hoàng Văn Em", "0956789012", "654 Cách Mạng Tháng 8, Q10, TP.HCM", 45, MemberStatus::Watchlist, "Two periods behind"),
    ];

    rows.into_iter()
        .map(|(id, name, phone, address, reputation, status, note)| Member {
            id: MemberId::new(id),
            name: name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            join_date: date.to_owned(),
            chat_handle: Some(phone.to_owned()),
            reputation_score: reputation,
            status,
            note: (!note.is_empty()).then(|| note.to_owned()),
        })
        .collect()
}

fn groups(date: &str) -> Vec<Group> {
    let slots = |ids: &[&str]| ids.iter().copied().map(MemberId::new).collect::<Vec<_>>();
    vec![
        Group {
            id: GroupId::new("g1"),
            name: "Hụi Tháng 2 Triệu - Bà Năm".to_owned(),
            cadence: Cadence::Monthly,
            share_amount: Money::from_i64(2_000_000),
            commission_type: CommissionType::Percent,
            commission_rate: Decimal::new(2, 0),
            start_date: date.to_owned(),
            status: GroupStatus::Active,
            bidding_rule: BiddingRule::OpenBid,
            max_bid_limit: Money::ZERO,
            members: slots(&["m1", "m2", "m2", "m3", "m3", "m4", "m4", "m5", "m1", "m3"]),
            current_period: 3,
        },
        Group {
            id: GroupId::new("g2"),
            name: "Hụi Tuần 500K - Chợ Bến Thành".to_owned(),
            cadence: Cadence::Weekly,
            share_amount: Money::from_i64(500_000),
            commission_type: CommissionType::Fixed,
            commission_rate: Decimal::new(10_000, 0),
            start_date: date.to_owned(),
            status: GroupStatus::Active,
            bidding_rule: BiddingRule::OpenBid,
            max_bid_limit: Money::ZERO,
            members: slots(&["m1", "m2", "m3", "m4", "m5"]),
            current_period: 1,
        },
    ]
}

fn transactions(date: &str) -> Vec<Transaction> {
    let contribution = |id: &str, member: &str, period: u32, amount: i64, note: &str| {
        Transaction::contribution(id, "g1", member, period, Money::from_i64(amount))
            .with_date(date)
            .with_note(note)
    };

    vec![
        // 9 live × (2,000,000 − 100,000), less 2% commission.
        Transaction::collection("t1", "g1", "m1", 1, Money::from_i64(100_000))
            .with_amounts(Money::from_i64(17_100_000), Money::from_i64(17_060_000))
            .with_date(date)
            .with_note("Period 1 settlement"),
        // 8 live × 1,800,000 + 1 dead × 2,000,000, less commission and m3's unpaid period 1.
        Transaction::collection("t2", "g1", "m3", 2, Money::from_i64(200_000))
            .with_amounts(Money::from_i64(16_400_000), Money::from_i64(10_660_000))
            .with_date(date)
            .with_note("Period 2 settlement"),
        contribution("t3", "m2", 1, 3_800_000, "Period 1 contribution"),
        contribution("t4", "m4", 1, 3_800_000, "Period 1 contribution"),
        contribution("t5", "m2", 2, 3_600_000, "Period 2 contribution"),
        contribution("t6", "m5", 2, 1_000_000, "Period 2 contribution (partial)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{SystemClock, TimestampIdGenerator};
    use hui_application::{EventBus, LedgerService};
    use hui_domain::{PayoutCalculator, SettlementValidator};

    fn state() -> AppState {
        sample_state(NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"))
    }

    #[test]
    fn seed_is_consistent() {
        let state = state();
        for group in &state.groups {
            SettlementValidator::validate_group(group, &state.members).expect("valid group");
        }
        assert_eq!(state.groups[0].slot_count(), 10);
        assert_eq!(state.members[0].join_date, "2024-01-15");
        assert_eq!(state.members[1].note, None);
    }

    #[test]
    fn seeded_settlements_match_engine() {
        let state = state();
        let g1 = &state.groups[0];
        for tx in state.transactions.iter().filter(|tx| tx.is_collect()) {
            let payout = PayoutCalculator
                .calculate(g1, tx.period, tx.bid(), &tx.member_id, &state.transactions)
                .expect("valid settlement");
            assert_eq!(payout.total_pot, tx.amount, "pot of {}", tx.id);
            assert_eq!(tx.net_amount, Some(payout.net_received), "net of {}", tx.id);
        }
    }

    #[test]
    fn dashboard_over_seed() {
        let state = state();
        let (clock, ids, events) = (SystemClock, TimestampIdGenerator::default(), EventBus::new());
        let service = LedgerService::new(&clock, &ids, &events);

        let totals = service.dashboard(&state);

        assert_eq!(totals.members, 5);
        assert_eq!(totals.active_groups, 2);
        assert_eq!(totals.total_groups, 2);
        assert_eq!(totals.total_contributed, Money::from_i64(12_200_000));
        assert_eq!(totals.total_paid_out, Money::from_i64(17_060_000 + 10_660_000));
        let per_member: Money = state
            .members
            .iter()
            .map(|member| service.member_debt(&state, &member.id))
            .sum();
        assert_eq!(totals.outstanding_debt, per_member);
    }
}
