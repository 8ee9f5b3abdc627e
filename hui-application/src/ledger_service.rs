use crate::{
    audit::AuditLogBuilder,
    error::LedgerError,
    event_bus::{EventBus, LedgerEvent},
    model::{AppState, DashboardTotals, PastWinner},
    ports::{Clock, IdGenerator},
};
use hui_domain::{
    CashflowBucket, CashflowProjector, ContributionDetail, ContributionPlanner, ContributionStatus,
    DebtLedger, Group, GroupId, GroupStatus, MemberId, Money, PayoutCalculator, PayoutDetail,
    PeriodShortfall, SettlementValidator, SlotLedger, Transaction, TransactionId, ValidationError,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub transaction_id: TransactionId,
    pub period: u32,
    pub payout: PayoutDetail,
}

/// Use cases that read or append to the ledger.
///
/// All mutations go through `&mut AppState`; persisting the state afterwards is
/// the caller's business.
#[derive(Clone, Copy)]
pub struct LedgerService<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    events: &'a EventBus,
}

impl<'a> LedgerService<'a> {
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator, events: &'a EventBus) -> Self {
        Self { clock, ids, events }
    }

    fn audit(&self) -> AuditLogBuilder<'a> {
        AuditLogBuilder::new(self.clock, self.ids)
    }

    fn find_group<'s>(state: &'s AppState, id: &GroupId) -> Result<&'s Group, LedgerError> {
        state
            .group(id)
            .ok_or_else(|| LedgerError::GroupNotFound(id.clone()))
    }

    fn active_group<'s>(state: &'s AppState, id: &GroupId) -> Result<&'s Group, LedgerError> {
        let group = Self::find_group(state, id)?;
        if !group.is_active() {
            return Err(LedgerError::GroupCompleted(id.clone()));
        }
        Ok(group)
    }

    fn settlement<'s>(state: &'s AppState, id: &'s GroupId, period: u32) -> Option<&'s Transaction> {
        state
            .group_transactions(id)
            .find(|tx| tx.is_collect() && tx.period == period)
    }

    fn ensure_unsettled(state: &AppState, group: &Group) -> Result<(), ValidationError> {
        let period = group.current_period;
        if Self::settlement(state, &group.id, period).is_some() {
            return Err(ValidationError::DuplicateCollect {
                group: group.id.clone(),
                period,
            });
        }
        Ok(())
    }

    /// Payout the winner would receive if the current period settled now.
    pub fn preview_payout(
        &self,
        state: &AppState,
        group_id: &GroupId,
        winner: &MemberId,
        bid: Money,
    ) -> Result<PayoutDetail, LedgerError> {
        let group = Self::active_group(state, group_id)?;
        Self::ensure_unsettled(state, group)?;
        let payout = PayoutCalculator.calculate(
            group,
            group.current_period,
            bid,
            winner,
            &state.transactions,
        )?;
        Ok(payout)
    }

    /// Plan for `period` (the current one by default), priced with the
    /// settlement recorded for it. Before settlement nobody is exempt and the
    /// bid counts as zero.
    pub fn contribution_plan(
        &self,
        state: &AppState,
        group_id: &GroupId,
        period: Option<u32>,
    ) -> Result<Vec<ContributionDetail>, LedgerError> {
        let group = Self::find_group(state, group_id)?;
        let period = period.unwrap_or(group.current_period);
        let (winner, bid) = match Self::settlement(state, group_id, period) {
            Some(tx) => (Some(&tx.member_id), tx.bid()),
            None => (None, Money::ZERO),
        };
        let plan = ContributionPlanner.plan(group, period, bid, winner, &state.transactions)?;
        Ok(plan)
    }

    pub fn settle_round(
        &self,
        state: &mut AppState,
        group_id: &GroupId,
        winner: &MemberId,
        bid: Money,
    ) -> Result<SettlementReceipt, LedgerError> {
        let group = Self::active_group(state, group_id)?;
        let period = group.current_period;
        Self::ensure_unsettled(state, group)?;

        let payout = PayoutCalculator.calculate(group, period, bid, winner, &state.transactions)?;
        let log = self.audit().collect_log(group, winner, bid, &payout);
        let transaction = Transaction::collection(
            self.ids.next_id("TX"),
            group_id.clone(),
            winner.clone(),
            period,
            bid,
        )
        .with_amounts(payout.total_pot, payout.net_received)
        .with_date(self.clock.today().to_string());
        let transaction_id = transaction.id.clone();

        state.transactions.push(transaction);
        state.audit_logs.push(log);

        tracing::info!(
            group = %group_id,
            period,
            winner = %winner,
            bid = %bid,
            net_received = %payout.net_received,
            "Recorded settlement"
        );
        self.events.publish(&LedgerEvent::CollectionExecuted {
            group: group_id.clone(),
            winner: winner.clone(),
            period,
            net_received: payout.net_received,
        });

        Ok(SettlementReceipt {
            transaction_id,
            period,
            payout,
        })
    }

    /// Moves a settled group to its next period. Returns the new period.
    pub fn close_period(&self, state: &mut AppState, group_id: &GroupId) -> Result<u32, LedgerError> {
        let period = Self::active_group(state, group_id)?.current_period;
        if Self::settlement(state, group_id, period).is_none() {
            return Err(LedgerError::PeriodNotSettled {
                group: group_id.clone(),
                period,
            });
        }

        let group = state
            .group_mut(group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.clone()))?;
        group.current_period = period + 1;
        let completed = group.current_period > group.slot_count();
        if completed {
            group.status = GroupStatus::Completed;
        }

        tracing::info!(group = %group_id, period, completed, "Closed period");
        self.events.publish(&LedgerEvent::PeriodClosed {
            group: group_id.clone(),
            period,
        });
        if completed {
            self.events.publish(&LedgerEvent::GroupCompleted {
                group: group_id.clone(),
            });
        }

        Ok(period + 1)
    }

    /// Records a contribution for the current period and returns the member's
    /// updated plan line.
    pub fn record_payment(
        &self,
        state: &mut AppState,
        group_id: &GroupId,
        member: &MemberId,
        amount: Money,
    ) -> Result<ContributionDetail, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidPayment(amount));
        }
        let group = Self::active_group(state, group_id)?;
        let period = group.current_period;
        let entry = self
            .contribution_plan(state, group_id, Some(period))?
            .into_iter()
            .find(|entry| entry.member_id == *member)
            .ok_or_else(|| ValidationError::UnknownMember {
                group: group_id.clone(),
                member: member.clone(),
            })?;

        let log = self.audit().payment_log(group, &entry, amount);
        let transaction = Transaction::contribution(
            self.ids.next_id("TX"),
            group_id.clone(),
            member.clone(),
            period,
            amount,
        )
        .with_date(self.clock.today().to_string());

        state.transactions.push(transaction);
        state.audit_logs.push(log);

        tracing::info!(group = %group_id, period, member = %member, amount = %amount, "Recorded payment");
        self.events.publish(&LedgerEvent::PaymentMade {
            group: group_id.clone(),
            member: member.clone(),
            period,
            amount,
        });

        let paid = entry.paid_amount + amount;
        Ok(ContributionDetail {
            paid_amount: paid,
            remaining_amount: entry.required_amount - paid,
            status: ContributionStatus::classify(entry.required_amount, paid),
            ..entry
        })
    }

    /// Registers a group that may already be under way, importing the
    /// settlements of its earlier periods.
    pub fn open_group(
        &self,
        state: &mut AppState,
        group: Group,
        past_winners: &[PastWinner],
    ) -> Result<(), LedgerError> {
        if state.group(&group.id).is_some() {
            return Err(LedgerError::DuplicateGroup(group.id));
        }
        SettlementValidator::validate_group(&group, &state.members)?;

        let mut history = Vec::with_capacity(past_winners.len());
        for past in past_winners {
            if past.period == 0 || past.period >= group.current_period {
                return Err(ValidationError::PeriodOutOfRange {
                    group: group.id.clone(),
                    period: past.period,
                    max: group.current_period.saturating_sub(1),
                }
                .into());
            }
            SettlementValidator::validate_bid(&group, past.bid)?;
            history.push(
                Transaction::collection(
                    self.ids.next_id("TX"),
                    group.id.clone(),
                    past.member_id.clone(),
                    past.period,
                    past.bid,
                )
                .with_date(self.clock.today().to_string())
                .with_note("imported settlement"),
            );
        }
        Self::check_history(&group, &history)?;

        tracing::info!(
            group = %group.id,
            slots = group.slot_count(),
            current_period = group.current_period,
            imported = history.len(),
            "Opened group"
        );
        let group_id = group.id.clone();
        state.groups.push(group);
        state.transactions.extend(history);
        self.events.publish(&LedgerEvent::GroupOpened { group: group_id });
        Ok(())
    }

    fn check_history(group: &Group, history: &[Transaction]) -> Result<(), ValidationError> {
        let ledger = SlotLedger::new(group, history);
        if let Some(period) = ledger.duplicate_settlement() {
            return Err(ValidationError::DuplicateCollect {
                group: group.id.clone(),
                period,
            });
        }
        for tx in history {
            let slots = ledger.slots_of(&tx.member_id);
            if slots == 0 {
                return Err(ValidationError::UnknownMember {
                    group: group.id.clone(),
                    member: tx.member_id.clone(),
                });
            }
            if ledger.member_dead_slots_before(&tx.member_id, group.current_period) > slots {
                return Err(ValidationError::NoLiveSlot {
                    group: group.id.clone(),
                    member: tx.member_id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn member_debt(&self, state: &AppState, member: &MemberId) -> Money {
        DebtLedger.member_total_debt(member, &state.groups, &state.transactions)
    }

    pub fn debt_breakdown(&self, state: &AppState, member: &MemberId) -> Vec<PeriodShortfall> {
        DebtLedger.shortfalls(member, &state.groups, &state.transactions)
    }

    pub fn cashflow(&self, state: &AppState) -> Vec<CashflowBucket> {
        CashflowProjector.project(&state.groups, self.clock.today())
    }

    pub fn dashboard(&self, state: &AppState) -> DashboardTotals {
        let total_contributed = state
            .transactions
            .iter()
            .filter(|tx| tx.is_contribution())
            .map(|tx| tx.amount)
            .sum();
        let total_paid_out = state
            .transactions
            .iter()
            .filter(|tx| tx.is_collect())
            .map(|tx| tx.net_amount.filter(|net| !net.is_zero()).unwrap_or(tx.amount))
            .sum();

        DashboardTotals {
            active_groups: state.active_groups().count(),
            total_groups: state.groups.len(),
            members: state.members.len(),
            total_contributed,
            total_paid_out,
            outstanding_debt: DebtLedger.outstanding_total(&state.groups, &state.transactions),
        }
    }
}
