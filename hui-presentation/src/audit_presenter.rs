use crate::{
    ledger_presenter::member_label,
    money_format::format_money,
    text_table::{Alignment, TextTableBuilder},
};
use hui_application::{AuditAction, AuditLog, MemberDirectory};
use hui_domain::Money;
use hui_i18n as i18n;
use std::borrow::Cow;

pub struct AuditPresenter;

impl AuditPresenter {
    /// Newest first, like the reports view.
    pub fn list(logs: &[AuditLog], members: &dyn MemberDirectory) -> String {
        if logs.is_empty() {
            return format!("{}\n", i18n::NO_LOGS);
        }

        let headers = [
            Cow::Borrowed(i18n::TIME),
            Cow::Borrowed(i18n::ACTION),
            Cow::Borrowed(i18n::MEMBER),
            Cow::Borrowed(i18n::PERIOD),
            Cow::Borrowed(i18n::AMOUNT),
            Cow::Borrowed(i18n::SCENARIO),
        ];
        TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Left,
            ])
            .headers(&headers)
            .rows(logs.iter().rev().map(|log| {
                [
                    Cow::Borrowed(log.timestamp.as_str()),
                    Cow::Borrowed(action_label(log.action)),
                    member_label(&log.user_id, members),
                    Cow::Owned(log.state_before.current_period.to_string()),
                    Cow::Owned(amount(log).map(format_money).unwrap_or_default()),
                    Cow::Borrowed(log.scenario.as_str()),
                ]
            }))
            .build()
    }
}

fn action_label(action: AuditAction) -> &'static str {
    match action {
        AuditAction::CollectExecution => "COLLECT_EXECUTION",
        AuditAction::PaymentRecord => "PAYMENT_RECORD",
    }
}

// Net payout for collections, the amount paid for payments.
fn amount(log: &AuditLog) -> Option<Money> {
    match log.action {
        AuditAction::CollectExecution => log.result_calculated.net_amount_received,
        AuditAction::PaymentRecord => log.input_parameters.payment_amount,
    }
}
