use crate::{
    money_format::format_money,
    text_table::{Alignment, TextTableBuilder, key_value_block},
};
use hui_application::MemberStats;
use hui_domain::{Member, MemberStatus};
use hui_i18n as i18n;
use std::borrow::Cow;

pub struct MemberPresenter;

impl MemberPresenter {
    pub fn list(members: &[&Member]) -> String {
        if members.is_empty() {
            return format!("{}\n", i18n::NO_MEMBERS);
        }

        let headers = [
            Cow::Borrowed("ID"),
            Cow::Borrowed(i18n::NAME),
            Cow::Borrowed(i18n::PHONE),
            Cow::Borrowed(i18n::STATUS),
            Cow::Borrowed(i18n::REPUTATION),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
            ])
            .headers(&headers)
            .rows(members.iter().map(|member| {
                [
                    Cow::Borrowed(member.id.as_str()),
                    Cow::Borrowed(member.name.as_str()),
                    Cow::Borrowed(member.phone.as_str()),
                    Cow::Borrowed(status_label(member.status)),
                    Cow::Owned(member.reputation_score.to_string()),
                ]
            }))
            .build()
    }

    pub fn stats(member: &Member, stats: &MemberStats) -> String {
        let mut out = format!("{} ({})\n", member.name, member.id);
        out.push_str(&key_value_block(&[
            (i18n::GROUPS_JOINED, Cow::Owned(stats.groups_joined.to_string())),
            (i18n::COLLECTIONS, Cow::Owned(stats.collections.to_string())),
            (i18n::TOTAL_DEBT, Cow::Owned(format_money(stats.total_debt))),
        ]));
        out
    }
}

fn status_label(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Normal => "NORMAL",
        MemberStatus::Trusted => "TRUSTED",
        MemberStatus::Watchlist => "WATCHLIST",
        MemberStatus::Blacklist => "BLACKLIST",
    }
}

#[cfg(all(test, not(feature = "vi")))]
mod tests {
    use super::*;
    use hui_domain::Money;

    #[test]
    fn lists_members() {
        let mut an = Member::new("m1", "An");
        an.phone = "0912".to_owned();
        an.status = MemberStatus::Trusted;
        let text = MemberPresenter::list(&[&an]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("m1 | An   | 0912"));
        assert!(lines[2].contains("TRUSTED"));
        assert!(lines[2].ends_with("100"));
    }

    #[test]
    fn empty_search_result() {
        assert_eq!(MemberPresenter::list(&[]), "No matching members\n");
    }

    #[test]
    fn stats_block() {
        let member = Member::new("m4", "Dung");
        let stats = MemberStats {
            groups_joined: 2,
            collections: 1,
            total_debt: Money::from_i64(350_000),
        };
        let text = MemberPresenter::stats(&member, &stats);
        assert!(text.starts_with("Dung (m4)\n"));
        assert!(text.trim_end().ends_with("350,000"));
    }
}
