pub mod cashflow_projector;
pub mod contribution_planner;
pub mod debt_ledger;
pub mod payout_calculator;
pub mod settlement_validator;
pub mod slot_ledger;

pub use cashflow_projector::{CashflowBucket, CashflowProjector};
pub use contribution_planner::{ContributionDetail, ContributionPlanner, ContributionStatus};
pub use debt_ledger::{DebtLedger, PeriodShortfall};
pub use payout_calculator::{PayoutCalculator, PayoutDetail};
pub use settlement_validator::SettlementValidator;
pub use slot_ledger::{SlotLedger, SlotObligation};
