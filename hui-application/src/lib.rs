#![warn(clippy::uninlined_format_args)]

pub mod audit;
pub mod error;
pub mod event_bus;
pub mod ledger_service;
pub mod member_registry;
pub mod model;
pub mod ports;
#[cfg(test)]
mod test_utils;

pub use audit::AuditLogBuilder;
pub use error::{LedgerError, MemberError, StoreError};
pub use event_bus::{EventBus, EventKind, LedgerEvent, Subscription};
pub use ledger_service::{LedgerService, SettlementReceipt};
pub use member_registry::{MemberDraft, MemberRegistry};
pub use model::{
    AppState, AuditAction, AuditContext, AuditContextInput, AuditContextOutput, AuditInput,
    AuditLog, AuditResult, AuditStateBefore, DashboardTotals, MemberStats, PastWinner,
};
pub use ports::{Clock, IdGenerator, MemberDirectory, SnapshotStore};
