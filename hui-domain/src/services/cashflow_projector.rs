use crate::model::{Group, Money};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Flat 2% estimate, independent of each group's configured commission.
const COMMISSION_ESTIMATE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowBucket {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub estimated_inflow: Money,
    pub estimated_outflow: Money,
    pub estimated_commission: Money,
}

/// Dashboard-grade projection of monthly money movement.
///
/// Every active group is assumed to settle once a month with all but one slot
/// paying a full share, whatever its actual period or cadence.
pub struct CashflowProjector;

impl CashflowProjector {
    pub const HORIZON_MONTHS: u32 = 6;

    pub fn project(&self, groups: &[Group], start: NaiveDate) -> Vec<CashflowBucket> {
        let per_period: Money = groups
            .iter()
            .filter(|group| group.is_active())
            .map(|group| group.share_amount.times(group.slot_count().saturating_sub(1)))
            .sum();

        (0..Self::HORIZON_MONTHS)
            .map(|offset| {
                let month0 = start.month0() + offset;
                let year = start.year() + (month0 / 12) as i32;
                let month = month0 % 12 + 1;
                CashflowBucket {
                    label: format!("T{month}/{year}"),
                    year,
                    month,
                    estimated_inflow: per_period,
                    estimated_outflow: per_period,
                    estimated_commission: per_period.scale_by(COMMISSION_ESTIMATE_RATE),
                }
            })
            .collect()
    }
}
