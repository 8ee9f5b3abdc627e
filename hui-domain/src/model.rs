use arcstr::ArcStr;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub ArcStr);

        impl $name {
            pub fn new(value: &str) -> Self {
                Self(ArcStr::from(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(ArcStr::from(value))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(MemberId);
string_id!(GroupId);
string_id!(TransactionId);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `self × count`, used for per-slot amounts.
    pub fn times(self, count: u32) -> Self {
        Self(self.0 * Decimal::from(count))
    }

    pub fn scale_by(self, factor: Decimal) -> Self {
        Self(self.0 * factor)
    }

    /// `self × rate / 100`.
    pub fn percent(self, rate: Decimal) -> Self {
        Self(self.0 * rate / Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    #[default]
    #[serde(alias = "Bình thường")]
    Normal,
    #[serde(alias = "Uy tín")]
    Trusted,
    #[serde(alias = "Cần chú ý")]
    Watchlist,
    #[serde(alias = "Blacklist")]
    Blacklist,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default, rename = "zalo", skip_serializing_if = "Option::is_none")]
    pub chat_handle: Option<String>,
    #[serde(default = "default_reputation")]
    pub reputation_score: i32,
    #[serde(default)]
    pub status: MemberStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_reputation() -> i32 {
    100
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: String::new(),
            address: String::new(),
            join_date: String::new(),
            chat_handle: None,
            reputation_score: default_reputation(),
            status: MemberStatus::Normal,
            note: None,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        matches!(self.status, MemberStatus::Watchlist | MemberStatus::Blacklist)
    }

    pub fn is_trusted(&self) -> bool {
        self.reputation_score >= 90 && self.status == MemberStatus::Trusted
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cadence {
    #[default]
    #[serde(alias = "Tháng")]
    Monthly,
    #[serde(alias = "Tuần")]
    Weekly,
    #[serde(alias = "15 Ngày")]
    Biweekly,
    #[serde(alias = "Ngày")]
    Daily,
    #[serde(alias = "Mùa", alias = "KIES")]
    Seasonal,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    #[default]
    #[serde(alias = "Đang chạy")]
    Active,
    #[serde(alias = "Đã mãn")]
    Completed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiddingRule {
    #[default]
    #[serde(alias = "Đấu công khai")]
    OpenBid,
    #[serde(alias = "Bỏ thăm kín")]
    SealedBid,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionType {
    #[default]
    Percent,
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub cadence: Cadence,
    #[serde(rename = "amountPerShare")]
    pub share_amount: Money,
    #[serde(default)]
    pub commission_type: CommissionType,
    /// Percentage for `Percent`, currency amount for `Fixed`.
    #[serde(default)]
    pub commission_rate: Decimal,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub status: GroupStatus,
    #[serde(default)]
    pub bidding_rule: BiddingRule,
    /// Zero means no limit beyond the share amount.
    #[serde(default)]
    pub max_bid_limit: Money,
    /// One entry per slot; a member holding k slots appears k times.
    pub members: Vec<MemberId>,
    pub current_period: u32,
}

impl Group {
    pub fn slot_count(&self) -> u32 {
        self.members.len() as u32
    }

    pub fn slots_of(&self, member: &MemberId) -> u32 {
        self.members.iter().filter(|id| *id == member).count() as u32
    }

    pub fn holds_slot(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    pub fn is_active(&self) -> bool {
        self.status == GroupStatus::Active
    }

    /// Commission charged on one settlement.
    pub fn commission(&self) -> Money {
        match self.commission_type {
            CommissionType::Fixed => Money::from_decimal(self.commission_rate),
            CommissionType::Percent => self.share_amount.percent(self.commission_rate),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Contribute,
    Collect,
    Penalty,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "huiGroupId")]
    pub group_id: GroupId,
    pub member_id: MemberId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    #[serde(default)]
    pub date: String,
    pub period: u32,
    #[serde(default)]
    pub bid_amount: Option<Money>,
    #[serde(default)]
    pub net_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn contribution(
        id: impl Into<TransactionId>,
        group_id: impl Into<GroupId>,
        member_id: impl Into<MemberId>,
        period: u32,
        amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            member_id: member_id.into(),
            kind: TransactionKind::Contribute,
            amount,
            date: String::new(),
            period,
            bid_amount: None,
            net_amount: None,
            note: None,
        }
    }

    pub fn collection(
        id: impl Into<TransactionId>,
        group_id: impl Into<GroupId>,
        member_id: impl Into<MemberId>,
        period: u32,
        bid: Money,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            member_id: member_id.into(),
            kind: TransactionKind::Collect,
            amount: Money::ZERO,
            date: String::new(),
            period,
            bid_amount: Some(bid),
            net_amount: Some(Money::ZERO),
            note: None,
        }
    }

    pub fn with_amounts(mut self, amount: Money, net_amount: Money) -> Self {
        self.amount = amount;
        self.net_amount = Some(net_amount);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_collect(&self) -> bool {
        self.kind == TransactionKind::Collect
    }

    pub fn is_contribution(&self) -> bool {
        self.kind == TransactionKind::Contribute
    }

    pub fn bid(&self) -> Money {
        self.bid_amount.unwrap_or(Money::ZERO)
    }
}
