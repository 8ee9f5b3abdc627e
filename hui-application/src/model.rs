use hui_domain::{Group, GroupId, Member, MemberId, Money, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The whole persisted document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub audit_logs: Vec<AuditLog>,
}

impl AppState {
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == *id)
    }

    pub fn group_mut(&mut self, id: &GroupId) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == *id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == *id)
    }

    pub fn member_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|member| member.id == *id)
    }

    pub fn group_transactions<'a>(
        &'a self,
        id: &'a GroupId,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions.iter().filter(move |tx| tx.group_id == *id)
    }

    pub fn active_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|group| group.is_active())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CollectExecution,
    PaymentRecord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStateBefore {
    pub current_period: u32,
    pub total_members: u32,
    /// Absent on payment records, where slot counts are not recomputed.
    #[serde(
        default,
        deserialize_with = "negative_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub live_members_count: Option<u32>,
    #[serde(
        default,
        deserialize_with = "negative_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub dead_members_count: Option<u32>,
    pub debt_existing: Money,
}

// Older documents store -1 for "not computed".
fn negative_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.and_then(|count| u32::try_from(count).ok()))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInput {
    pub base_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<Money>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_amount_received: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_debt: Option<Money>,
    pub logic_description: String,
}

/// Self-contained restatement of a settlement, kept with collect logs so a
/// record can be checked without the rest of the document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditContext {
    pub scenario_name: String,
    pub input_params: AuditContextInput,
    pub app_output: AuditContextOutput,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditContextInput {
    pub base_value: Money,
    pub total_slots: u32,
    pub dead_slots_count: u32,
    pub live_slots_count: u32,
    pub winning_bid: Money,
    pub commission: Money,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditContextOutput {
    pub total_collected_from_live: Money,
    pub total_collected_from_dead: Money,
    pub final_payout_to_winner: Money,
}

/// Immutable record of one money-moving action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub timestamp: String,
    pub action: AuditAction,
    pub user_id: MemberId,
    pub scenario: String,
    pub state_before: AuditStateBefore,
    pub input_parameters: AuditInput,
    pub result_calculated: AuditResult,
    #[serde(rename = "ai_context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AuditContext>,
}

/// A settlement that happened before the group was entered into the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PastWinner {
    pub period: u32,
    pub member_id: MemberId,
    pub bid: Money,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub active_groups: usize,
    pub total_groups: usize,
    pub members: usize,
    /// Sum of all CONTRIBUTE amounts.
    pub total_contributed: Money,
    /// Sum of COLLECT net amounts, falling back to the pot when no net was recorded.
    pub total_paid_out: Money,
    pub outstanding_debt: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub groups_joined: usize,
    pub collections: usize,
    pub total_debt: Money,
}
