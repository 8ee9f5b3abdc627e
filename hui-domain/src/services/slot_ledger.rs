use crate::model::{Group, MemberId, Money, Transaction, TransactionKind};
use fxhash::FxHashMap;
use indexmap::IndexMap;

/// How one member's slots stand in one period, and what they owe for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotObligation {
    pub dead_slots: u32,
    pub live_slots: u32,
    pub required: Money,
}

impl SlotObligation {
    /// The period's winner owes nothing and shows no slots for that period.
    pub const EXEMPT: Self = Self {
        dead_slots: 0,
        live_slots: 0,
        required: Money::ZERO,
    };
}

/// Index over the transactions of a single group.
///
/// Every engine service classifies slots through this view so that dead/live
/// counting is done one way only.
pub struct SlotLedger<'a> {
    group: &'a Group,
    slots: IndexMap<&'a MemberId, u32>,
    collects: Vec<&'a Transaction>,
    contributions: FxHashMap<u32, FxHashMap<&'a MemberId, Money>>,
}

impl<'a> SlotLedger<'a> {
    pub fn new(group: &'a Group, transactions: &'a [Transaction]) -> Self {
        let mut slots: IndexMap<&'a MemberId, u32> = IndexMap::new();
        for member in &group.members {
            *slots.entry(member).or_insert(0) += 1;
        }

        let mut collects = Vec::new();
        let mut contributions: FxHashMap<u32, FxHashMap<&'a MemberId, Money>> =
            FxHashMap::default();
        for tx in transactions.iter().filter(|tx| tx.group_id == group.id) {
            match tx.kind {
                TransactionKind::Collect => collects.push(tx),
                TransactionKind::Contribute => {
                    *contributions
                        .entry(tx.period)
                        .or_default()
                        .entry(&tx.member_id)
                        .or_insert(Money::ZERO) += tx.amount;
                }
                TransactionKind::Penalty => {}
            }
        }

        Self {
            group,
            slots,
            collects,
            contributions,
        }
    }

    pub fn group(&self) -> &'a Group {
        self.group
    }

    pub fn total_slots(&self) -> u32 {
        self.group.slot_count()
    }

    pub fn slots_of(&self, member: &MemberId) -> u32 {
        self.slots.get(member).copied().unwrap_or(0)
    }

    /// Distinct slot holders in order of first appearance, with their slot counts.
    pub fn holders(&self) -> impl Iterator<Item = (&'a MemberId, u32)> + '_ {
        self.slots.iter().map(|(member, count)| (*member, *count))
    }

    /// Slots retired by settlements of earlier periods.
    pub fn dead_slots_before(&self, period: u32) -> u32 {
        self.collects.iter().filter(|tx| tx.period < period).count() as u32
    }

    pub fn member_dead_slots_before(&self, member: &MemberId, period: u32) -> u32 {
        self.collects
            .iter()
            .filter(|tx| tx.period < period && tx.member_id == *member)
            .count() as u32
    }

    pub fn member_live_slots_at(&self, member: &MemberId, period: u32) -> u32 {
        self.slots_of(member)
            .saturating_sub(self.member_dead_slots_before(member, period))
    }

    /// The settlement recorded for `period`, if any.
    pub fn settlement(&self, period: u32) -> Option<&'a Transaction> {
        self.collects.iter().copied().find(|tx| tx.period == period)
    }

    pub fn paid(&self, member: &MemberId, period: u32) -> Money {
        self.contributions
            .get(&period)
            .and_then(|by_member| by_member.get(member))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// Earliest period carrying more than one settlement.
    pub fn duplicate_settlement(&self) -> Option<u32> {
        let mut seen: FxHashMap<u32, u32> = FxHashMap::default();
        let mut duplicate: Option<u32> = None;
        for tx in &self.collects {
            let count = seen.entry(tx.period).or_insert(0);
            *count += 1;
            if *count > 1 {
                duplicate = Some(duplicate.map_or(tx.period, |p| p.min(tx.period)));
            }
        }
        duplicate
    }

    pub fn obligation(
        &self,
        member: &MemberId,
        period: u32,
        bid: Money,
        winner: Option<&MemberId>,
    ) -> SlotObligation {
        if winner == Some(member) {
            return SlotObligation::EXEMPT;
        }

        let share = self.group.share_amount;
        let dead_slots = self.member_dead_slots_before(member, period);
        let live_slots = self.slots_of(member).saturating_sub(dead_slots);
        SlotObligation {
            dead_slots,
            live_slots,
            required: share.times(dead_slots) + (share - bid).times(live_slots),
        }
    }
}
