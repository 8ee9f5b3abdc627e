use crate::{
    money_format::format_money,
    text_table::{Alignment, TextTableBuilder, key_value_block},
};
use hui_application::{DashboardTotals, MemberDirectory};
use hui_domain::{
    CashflowBucket, ContributionDetail, ContributionStatus, Group, GroupStatus, MemberId, Money,
    PayoutDetail, PeriodShortfall,
};
use hui_i18n as i18n;
use std::borrow::Cow;

pub struct LedgerPresenter;

impl LedgerPresenter {
    pub fn payout(group: &Group, period: u32, detail: &PayoutDetail) -> String {
        let mut out = i18n::payout_title(&group.name, period);
        out.push('\n');
        out.push_str(&key_value_block(&[
            (i18n::LIVE_SLOTS, Cow::Owned(detail.live_slots.to_string())),
            (i18n::DEAD_SLOTS, Cow::Owned(detail.dead_slots.to_string())),
            (i18n::AMOUNT_PER_LIVE, money(detail.amount_per_live)),
            (i18n::AMOUNT_PER_DEAD, money(detail.amount_per_dead)),
            (i18n::TOTAL_POT, money(detail.total_pot)),
            (i18n::COMMISSION, money(-detail.commission)),
            (i18n::DEDUCTIONS, money(-detail.deductions)),
            (i18n::NET_RECEIVED, money(detail.net_received)),
        ]));
        out
    }

    pub fn plan(
        group: &Group,
        period: u32,
        plan: &[ContributionDetail],
        members: &dyn MemberDirectory,
    ) -> String {
        let headers = [
            Cow::Borrowed(i18n::MEMBER),
            Cow::Borrowed(i18n::DEAD_SLOTS),
            Cow::Borrowed(i18n::LIVE_SLOTS),
            Cow::Borrowed(i18n::REQUIRED),
            Cow::Borrowed(i18n::PAID),
            Cow::Borrowed(i18n::REMAINING),
            Cow::Borrowed(i18n::STATUS),
        ];
        let table = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&headers)
            .rows(plan.iter().map(|entry| {
                [
                    member_label(&entry.member_id, members),
                    Cow::Owned(entry.dead_slots.to_string()),
                    Cow::Owned(entry.live_slots.to_string()),
                    money(entry.required_amount),
                    money(entry.paid_amount),
                    money(entry.remaining_amount),
                    Cow::Borrowed(status_label(entry.status)),
                ]
            }))
            .build();

        format!("{}\n{table}", i18n::plan_title(&group.name, period))
    }

    pub fn debt(
        member: &MemberId,
        breakdown: &[PeriodShortfall],
        members: &dyn MemberDirectory,
    ) -> String {
        let label = member_label(member, members);
        if breakdown.is_empty() {
            return format!("{label}: {}\n", i18n::NO_DEBT);
        }

        let headers = [
            Cow::Borrowed(i18n::GROUP),
            Cow::Borrowed(i18n::PERIOD),
            Cow::Borrowed(i18n::REQUIRED),
            Cow::Borrowed(i18n::PAID),
            Cow::Borrowed(i18n::SHORTFALL),
        ];
        let table = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&headers)
            .rows(breakdown.iter().map(|entry| {
                [
                    Cow::Owned(entry.group_id.to_string()),
                    Cow::Owned(entry.period.to_string()),
                    money(entry.required),
                    money(entry.paid),
                    money(entry.shortfall),
                ]
            }))
            .build();
        let total: Money = breakdown.iter().map(|entry| entry.shortfall).sum();

        format!(
            "{label}\n{table}{}: {} {}\n",
            i18n::TOTAL_DEBT,
            format_money(total),
            i18n::CURRENCY
        )
    }

    pub fn cashflow(buckets: &[CashflowBucket]) -> String {
        let headers = [
            Cow::Borrowed(i18n::MONTH),
            Cow::Borrowed(i18n::INFLOW),
            Cow::Borrowed(i18n::OUTFLOW),
            Cow::Borrowed(i18n::COMMISSION),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&headers)
            .rows(buckets.iter().map(|bucket| {
                [
                    Cow::Borrowed(bucket.label.as_str()),
                    money(bucket.estimated_inflow),
                    money(bucket.estimated_outflow),
                    money(bucket.estimated_commission),
                ]
            }))
            .build()
    }

    pub fn groups(groups: &[Group]) -> String {
        if groups.is_empty() {
            return format!("{}\n", i18n::NO_GROUPS);
        }

        let headers = [
            Cow::Borrowed("ID"),
            Cow::Borrowed(i18n::NAME),
            Cow::Borrowed(i18n::SHARE),
            Cow::Borrowed(i18n::PERIOD),
            Cow::Borrowed(i18n::SLOTS),
            Cow::Borrowed(i18n::STATUS),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&headers)
            .rows(groups.iter().map(|group| {
                [
                    Cow::Borrowed(group.id.as_str()),
                    Cow::Borrowed(group.name.as_str()),
                    money(group.share_amount),
                    Cow::Owned(group.current_period.to_string()),
                    Cow::Owned(group.slot_count().to_string()),
                    Cow::Borrowed(match group.status {
                        GroupStatus::Active => i18n::GROUP_ACTIVE,
                        GroupStatus::Completed => i18n::GROUP_COMPLETED,
                    }),
                ]
            }))
            .build()
    }

    pub fn dashboard(totals: &DashboardTotals) -> String {
        key_value_block(&[
            (i18n::MEMBER_COUNT, Cow::Owned(totals.members.to_string())),
            (
                i18n::ACTIVE_GROUPS,
                Cow::Owned(format!("{}/{}", totals.active_groups, totals.total_groups)),
            ),
            (i18n::TOTAL_CONTRIBUTED, money(totals.total_contributed)),
            (i18n::TOTAL_PAID_OUT, money(totals.total_paid_out)),
            (i18n::TOTAL_DEBT, money(totals.outstanding_debt)),
        ])
    }
}

pub(crate) fn member_label<'a>(
    member_id: &'a MemberId,
    members: &'a dyn MemberDirectory,
) -> Cow<'a, str> {
    match members.display_name(member_id) {
        Some(name) => Cow::Owned(format!("{name} ({member_id})")),
        None => Cow::Borrowed(member_id.as_str()),
    }
}

fn money(amount: Money) -> Cow<'static, str> {
    Cow::Owned(format_money(amount))
}

fn status_label(status: ContributionStatus) -> &'static str {
    match status {
        ContributionStatus::Full => i18n::STATUS_FULL,
        ContributionStatus::Partial => i18n::STATUS_PARTIAL,
        ContributionStatus::Unpaid => i18n::STATUS_UNPAID,
    }
}

#[cfg(all(test, not(feature = "vi")))]
mod tests {
    use super::*;
    use hui_application::AppState;
    use hui_domain::{GroupId, Member};
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> AppState {
        AppState {
            members: vec![Member::new("m4", "Dung")],
            ..AppState::default()
        }
    }

    #[rstest]
    fn plan_lists_members_with_names(directory: AppState) {
        let mut group = sample_group();
        group.name = "Alpha".to_owned();
        let plan = [ContributionDetail {
            member_id: MemberId::new("m4"),
            dead_slots: 0,
            live_slots: 1,
            required_amount: Money::from_i64(850_000),
            paid_amount: Money::from_i64(500_000),
            remaining_amount: Money::from_i64(350_000),
            status: ContributionStatus::Partial,
        }];

        let text = LedgerPresenter::plan(&group, 2, &plan, &directory);

        assert!(text.starts_with("Contribution plan for period 2 of Alpha\n"));
        let row = text.lines().nth(3).expect("data row");
        assert!(row.starts_with("Dung (m4)"));
        assert!(row.contains("850,000"));
        assert!(row.contains("350,000"));
        assert!(row.ends_with("Partial"));
    }

    #[rstest]
    fn debt_without_shortfall(directory: AppState) {
        let text = LedgerPresenter::debt(&MemberId::new("m9"), &[], &directory);
        assert_eq!(text, "m9: No outstanding debt\n");
    }

    #[rstest]
    fn debt_totals_breakdown(directory: AppState) {
        let breakdown = [PeriodShortfall {
            group_id: GroupId::new("g1"),
            period: 2,
            required: Money::from_i64(850_000),
            paid: Money::from_i64(500_000),
            shortfall: Money::from_i64(350_000),
        }];
        let text = LedgerPresenter::debt(&MemberId::new("m4"), &breakdown, &directory);
        assert!(text.starts_with("Dung (m4)\n"));
        assert!(text.ends_with("Total debt: 350,000 VND\n"));
    }

    #[rstest]
    fn payout_shows_deductions_as_negative() {
        let detail = PayoutDetail {
            live_slots: 1,
            dead_slots: 2,
            amount_per_live: Money::from_i64(950_000),
            amount_per_dead: Money::from_i64(1_000_000),
            total_pot: Money::from_i64(2_950_000),
            commission: Money::from_i64(50_000),
            deductions: Money::from_i64(350_000),
            net_received: Money::from_i64(2_550_000),
        };
        let text = LedgerPresenter::payout(&sample_group(), 3, &detail);
        assert!(text.contains("-350,000"));
        assert!(text.lines().last().expect("net line").ends_with("2,550,000"));
    }

    #[rstest]
    fn groups_table() {
        let mut done = sample_group();
        done.id = GroupId::new("g2");
        done.status = hui_domain::GroupStatus::Completed;
        let text = LedgerPresenter::groups(&[sample_group(), done]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("g1 | Test"));
        assert!(lines[2].contains("1,000,000"));
        assert!(lines[2].ends_with("Active"));
        assert!(lines[3].ends_with("Completed"));
        assert_eq!(LedgerPresenter::groups(&[]), "No groups yet\n");
    }

    #[rstest]
    fn dashboard_shows_flows() {
        let text = LedgerPresenter::dashboard(&DashboardTotals {
            active_groups: 1,
            total_groups: 2,
            members: 5,
            total_contributed: Money::from_i64(12_200_000),
            total_paid_out: Money::from_i64(27_720_000),
            outstanding_debt: Money::from_i64(350_000),
        });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Active groups"));
        assert!(lines[1].ends_with("1/2"));
        assert!(lines[2].ends_with("12,200,000"));
        assert!(lines[3].starts_with("Total paid out"));
        assert!(lines[3].ends_with("27,720,000"));
    }

    fn sample_group() -> Group {
        use hui_domain::{BiddingRule, Cadence, CommissionType, GroupStatus};
        use rust_decimal::Decimal;
        Group {
            id: GroupId::new("g1"),
            name: "Test".to_owned(),
            cadence: Cadence::Monthly,
            share_amount: Money::from_i64(1_000_000),
            commission_type: CommissionType::Percent,
            commission_rate: Decimal::new(5, 0),
            start_date: String::new(),
            status: GroupStatus::Active,
            bidding_rule: BiddingRule::OpenBid,
            max_bid_limit: Money::ZERO,
            members: vec![MemberId::new("m4")],
            current_period: 3,
        }
    }
}
