#![warn(clippy::uninlined_format_args)]

pub mod audit_presenter;
pub mod ledger_presenter;
pub mod member_presenter;
pub mod money_format;
pub mod text_table;

pub use audit_presenter::AuditPresenter;
pub use ledger_presenter::LedgerPresenter;
pub use member_presenter::MemberPresenter;
pub use money_format::format_money;
