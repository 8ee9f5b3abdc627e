use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use hui_application::PastWinner;
use hui_domain::{BiddingRule, Cadence, CommissionType, MemberStatus, Money};
use rust_decimal::Decimal;
use std::{path::PathBuf, str::FromStr};

#[derive(Parser, Debug)]
#[command(name = "hui")]
#[command(about = "Ledger for rotating savings groups (hụi)")]
pub struct Args {
    /// Path to the JSON data file; overrides HUI_DATA_FILE
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Preview the winner's payout for the group's current period
    Payout {
        group: String,
        winner: String,
        #[arg(long, default_value = "0")]
        bid: Decimal,
    },

    /// Show who owes what for a period (the current one by default)
    Plan {
        group: String,
        #[arg(long)]
        period: Option<u32>,
    },

    /// Show a member's outstanding debt, period by period
    Debt { member: String },

    /// Six-month cash-flow estimate
    Cashflow,

    /// Record the settlement of the current period
    Settle {
        group: String,
        winner: String,
        #[arg(long)]
        bid: Decimal,
    },

    /// Advance a settled group to its next period
    Close { group: String },

    /// Record a contribution for the current period
    Pay {
        group: String,
        member: String,
        amount: Decimal,
    },

    /// Manage members
    Members {
        #[command(subcommand)]
        action: Option<MemberCommand>,
    },

    /// List or open groups
    Groups {
        #[command(subcommand)]
        action: Option<GroupCommand>,
    },

    /// Audit log, newest first
    Logs {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Totals across all groups
    Dashboard,
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// List every group
    List,

    /// Register a group, possibly already under way
    Open(NewGroup),
}

#[derive(ClapArgs, Debug)]
pub struct NewGroup {
    #[arg(long)]
    pub name: String,
    /// Generated when omitted
    #[arg(long)]
    pub id: Option<String>,
    /// Amount each slot contributes per period
    #[arg(long)]
    pub share: Decimal,
    /// Percentage of the share, or a fixed amount with `--commission-type fixed`
    #[arg(long, default_value = "0")]
    pub commission: Decimal,
    #[arg(long, value_enum, default_value_t = CommissionArg::Percent)]
    pub commission_type: CommissionArg,
    #[arg(long, value_enum, default_value_t = CadenceArg::Monthly)]
    pub cadence: CadenceArg,
    #[arg(long, value_enum, default_value_t = BiddingArg::Open)]
    pub bidding: BiddingArg,
    /// Zero means no limit beyond the share
    #[arg(long, default_value = "0")]
    pub max_bid: Decimal,
    /// Slot holders, comma separated; repeat an id for several slots
    #[arg(long, value_delimiter = ',', required = true)]
    pub members: Vec<String>,
    #[arg(long, default_value_t = 1)]
    pub period: u32,
    /// Earlier settlement as `period:member[:bid]`
    #[arg(long = "past", value_parser = parse_past_winner)]
    pub past: Vec<PastWinner>,
}

fn parse_past_winner(raw: &str) -> Result<PastWinner, String> {
    let mut parts = raw.split(':');
    let (Some(period), Some(member)) = (parts.next(), parts.next()) else {
        return Err(format!("expected period:member[:bid], got '{raw}'"));
    };
    let period = period
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid period '{period}': {err}"))?;
    let member = member.trim();
    if member.is_empty() {
        return Err(format!("missing member in '{raw}'"));
    }
    let bid = match parts.next() {
        Some(bid) => Decimal::from_str(bid.trim())
            .map_err(|err| format!("invalid bid '{bid}': {err}"))?,
        None => Decimal::ZERO,
    };
    if parts.next().is_some() {
        return Err(format!("expected period:member[:bid], got '{raw}'"));
    }
    Ok(PastWinner {
        period,
        member_id: member.into(),
        bid: Money::from_decimal(bid),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CommissionArg {
    Percent,
    Fixed,
}

impl From<CommissionArg> for CommissionType {
    fn from(value: CommissionArg) -> Self {
        match value {
            CommissionArg::Percent => Self::Percent,
            CommissionArg::Fixed => Self::Fixed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CadenceArg {
    Monthly,
    Weekly,
    Biweekly,
    Daily,
    Seasonal,
}

impl From<CadenceArg> for Cadence {
    fn from(value: CadenceArg) -> Self {
        match value {
            CadenceArg::Monthly => Self::Monthly,
            CadenceArg::Weekly => Self::Weekly,
            CadenceArg::Biweekly => Self::Biweekly,
            CadenceArg::Daily => Self::Daily,
            CadenceArg::Seasonal => Self::Seasonal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BiddingArg {
    Open,
    Sealed,
}

impl From<BiddingArg> for BiddingRule {
    fn from(value: BiddingArg) -> Self {
        match value {
            BiddingArg::Open => Self::OpenBid,
            BiddingArg::Sealed => Self::SealedBid,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// List members, optionally filtered by name or phone
    List {
        #[arg(conflicts_with_all = ["risky", "trusted"])]
        query: Option<String>,
        /// Only members on the watchlist or blacklist
        #[arg(long, conflicts_with = "trusted")]
        risky: bool,
        /// Only trusted members with a high reputation
        #[arg(long)]
        trusted: bool,
    },

    /// Show one member's statistics
    Show { id: String },

    /// Register a new member
    Add(NewMember),

    /// Change a member's details; omitted fields stay as they are
    Edit {
        id: String,
        #[command(flatten)]
        changes: MemberChanges,
    },

    /// Remove a member who no longer takes part in an active group
    Remove { id: String },
}

#[derive(ClapArgs, Debug)]
pub struct NewMember {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long)]
    pub chat: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    #[arg(long, value_enum, default_value_t = StatusArg::Normal)]
    pub status: StatusArg,
}

#[derive(ClapArgs, Debug, Default)]
pub struct MemberChanges {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub chat: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Normal,
    Trusted,
    Watchlist,
    Blacklist,
}

impl From<StatusArg> for MemberStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Normal => Self::Normal,
            StatusArg::Trusted => Self::Trusted,
            StatusArg::Watchlist => Self::Watchlist,
            StatusArg::Blacklist => Self::Blacklist,
        }
    }
}
