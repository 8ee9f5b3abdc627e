use crate::cli::{Command, GroupCommand, MemberChanges, MemberCommand, NewGroup, NewMember};
use hui_application::{
    AppState, Clock, EventBus, EventKind, IdGenerator, LedgerError, LedgerService, MemberDraft,
    MemberError, MemberRegistry, SnapshotStore,
};
use hui_domain::{Group, GroupId, GroupStatus, Member, MemberId, Money};
use hui_i18n as i18n;
use hui_presentation::{AuditPresenter, LedgerPresenter, MemberPresenter, format_money};
use std::{
    borrow::Cow,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

pub type CliResult<T> = Result<T, Cow<'static, str>>;

fn describe(err: impl fmt::Display) -> Cow<'static, str> {
    Cow::Owned(err.to_string())
}

/// Runs one command against a freshly loaded snapshot, saving it back when
/// the command changed anything.
pub struct App<'a> {
    store: &'a dyn SnapshotStore,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    events: &'a EventBus,
    ledger: LedgerService<'a>,
    registry: MemberRegistry<'a>,
}

impl<'a> App<'a> {
    pub fn new(
        store: &'a dyn SnapshotStore,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
        events: &'a EventBus,
    ) -> Self {
        Self {
            store,
            clock,
            ids,
            events,
            ledger: LedgerService::new(clock, ids, events),
            registry: MemberRegistry::new(clock, ids, events),
        }
    }

    pub fn execute(&self, command: Command) -> CliResult<String> {
        let mut state = self.store.load().map_err(describe)?;
        let mutates = is_mutating(&command);

        let output = match command {
            Command::Payout { group, winner, bid } => {
                self.payout(&state, group.into(), winner.into(), Money::from_decimal(bid))
            }
            Command::Plan { group, period } => self.plan(&state, group.into(), period),
            Command::Debt { member } => self.debt(&state, member.into()),
            Command::Cashflow => Ok(LedgerPresenter::cashflow(&self.ledger.cashflow(&state))),
            Command::Dashboard => Ok(LedgerPresenter::dashboard(&self.ledger.dashboard(&state))),
            Command::Settle { group, winner, bid } => {
                self.settle(&mut state, group.into(), winner.into(), Money::from_decimal(bid))
            }
            Command::Close { group } => self.close(&mut state, group.into()),
            Command::Pay {
                group,
                member,
                amount,
            } => self.pay(
                &mut state,
                group.into(),
                member.into(),
                Money::from_decimal(amount),
            ),
            Command::Members { action } => self.members(&mut state, action),
            Command::Groups { action } => self.groups(&mut state, action),
            Command::Logs { limit } => {
                let skip = limit.map_or(0, |limit| state.audit_logs.len().saturating_sub(limit));
                Ok(AuditPresenter::list(&state.audit_logs[skip..], &state))
            }
        }?;

        if mutates {
            self.store.save(&state).map_err(describe)?;
        }
        Ok(output)
    }

    fn payout(
        &self,
        state: &AppState,
        group_id: GroupId,
        winner: MemberId,
        bid: Money,
    ) -> CliResult<String> {
        let detail = self
            .ledger
            .preview_payout(state, &group_id, &winner, bid)
            .map_err(describe)?;
        let group = find_group(state, &group_id)?;
        Ok(LedgerPresenter::payout(group, group.current_period, &detail))
    }

    fn plan(&self, state: &AppState, group_id: GroupId, period: Option<u32>) -> CliResult<String> {
        let group = find_group(state, &group_id)?;
        let period = period.unwrap_or(group.current_period);
        let plan = self
            .ledger
            .contribution_plan(state, &group_id, Some(period))
            .map_err(describe)?;
        Ok(LedgerPresenter::plan(group, period, &plan, state))
    }

    fn debt(&self, state: &AppState, member_id: MemberId) -> CliResult<String> {
        find_member(state, &member_id)?;
        let breakdown = self.ledger.debt_breakdown(state, &member_id);
        Ok(LedgerPresenter::debt(&member_id, &breakdown, state))
    }

    fn settle(
        &self,
        state: &mut AppState,
        group_id: GroupId,
        winner: MemberId,
        bid: Money,
    ) -> CliResult<String> {
        let receipt = self
            .ledger
            .settle_round(state, &group_id, &winner, bid)
            .map_err(describe)?;
        let group = find_group(state, &group_id)?;
        let winner = display_member(state, &winner);
        Ok(format!(
            "{}\n{}",
            i18n::settled(receipt.period, winner),
            LedgerPresenter::payout(group, receipt.period, &receipt.payout)
        ))
    }

    fn close(&self, state: &mut AppState, group_id: GroupId) -> CliResult<String> {
        let completed = Arc::new(AtomicBool::new(false));
        let _subscription = {
            let completed = Arc::clone(&completed);
            self.events.subscribe(EventKind::GroupCompleted, move |_| {
                completed.store(true, Ordering::Relaxed);
            })
        };

        let next_period = self
            .ledger
            .close_period(state, &group_id)
            .map_err(describe)?;
        let name = &find_group(state, &group_id)?.name;

        let mut out = i18n::period_closed(name, next_period);
        out.push('\n');
        if completed.load(Ordering::Relaxed) {
            out.push_str(&i18n::group_completed(name));
            out.push('\n');
        }
        Ok(out)
    }

    fn pay(
        &self,
        state: &mut AppState,
        group_id: GroupId,
        member_id: MemberId,
        amount: Money,
    ) -> CliResult<String> {
        let line = self
            .ledger
            .record_payment(state, &group_id, &member_id, amount)
            .map_err(describe)?;
        let remaining = line.remaining_amount.max(Money::ZERO);
        Ok(format!(
            "{}\n",
            i18n::payment_recorded(display_member(state, &member_id), format_money(remaining))
        ))
    }

    fn groups(&self, state: &mut AppState, action: Option<GroupCommand>) -> CliResult<String> {
        match action.unwrap_or(GroupCommand::List) {
            GroupCommand::List => Ok(LedgerPresenter::groups(&state.groups)),
            GroupCommand::Open(mut new_group) => {
                let past = std::mem::take(&mut new_group.past);
                let group = new_group.into_group(self.ids, self.clock);
                let (id, name) = (group.id.clone(), group.name.clone());
                self.ledger
                    .open_group(state, group, &past)
                    .map_err(describe)?;
                Ok(format!(
                    "{}\n",
                    i18n::group_opened(format!("{name} ({id})"), past.len())
                ))
            }
        }
    }

    fn members(&self, state: &mut AppState, action: Option<MemberCommand>) -> CliResult<String> {
        let default = MemberCommand::List {
            query: None,
            risky: false,
            trusted: false,
        };
        match action.unwrap_or(default) {
            MemberCommand::List {
                query,
                risky,
                trusted,
            } => {
                let found = if risky {
                    self.registry.high_risk(state)
                } else if trusted {
                    self.registry.trusted(state)
                } else {
                    self.registry.search(state, query.as_deref().unwrap_or(""))
                };
                Ok(MemberPresenter::list(&found))
            }
            MemberCommand::Show { id } => {
                let id = MemberId::from(id);
                let member = find_member(state, &id)?;
                Ok(MemberPresenter::stats(member, &self.registry.stats(state, &id)))
            }
            MemberCommand::Add(new_member) => {
                let id = self
                    .registry
                    .create(state, new_member.into_draft())
                    .map_err(describe)?;
                Ok(format!("{}\n", i18n::member_saved(id)))
            }
            MemberCommand::Edit { id, changes } => {
                let id = MemberId::from(id);
                let draft = changes.merge_into(find_member(state, &id)?);
                self.registry.update(state, &id, draft).map_err(describe)?;
                Ok(format!("{}\n", i18n::member_saved(id)))
            }
            MemberCommand::Remove { id } => {
                let removed = self
                    .registry
                    .delete(state, &MemberId::from(id))
                    .map_err(describe)?;
                Ok(format!("{}\n", i18n::member_deleted(removed.name)))
            }
        }
    }
}

fn is_mutating(command: &Command) -> bool {
    match command {
        Command::Settle { .. } | Command::Close { .. } | Command::Pay { .. } => true,
        Command::Members { action } => matches!(
            action,
            Some(MemberCommand::Add(_) | MemberCommand::Edit { .. } | MemberCommand::Remove { .. })
        ),
        Command::Groups { action } => matches!(action, Some(GroupCommand::Open(_))),
        Command::Payout { .. }
        | Command::Plan { .. }
        | Command::Debt { .. }
        | Command::Cashflow
        | Command::Logs { .. }
        | Command::Dashboard => false,
    }
}

fn find_group<'s>(state: &'s AppState, id: &GroupId) -> CliResult<&'s Group> {
    state
        .group(id)
        .ok_or_else(|| describe(LedgerError::GroupNotFound(id.clone())))
}

fn find_member<'s>(state: &'s AppState, id: &MemberId) -> CliResult<&'s Member> {
    state
        .member(id)
        .ok_or_else(|| describe(MemberError::NotFound(id.clone())))
}

fn display_member(state: &AppState, id: &MemberId) -> String {
    match state.member(id) {
        Some(member) => format!("{} ({id})", member.name),
        None => id.to_string(),
    }
}

impl NewGroup {
    fn into_group(self, ids: &dyn IdGenerator, clock: &dyn Clock) -> Group {
        Group {
            id: self
                .id
                .map_or_else(|| GroupId::from(ids.next_id("HUI")), GroupId::from),
            name: self.name,
            cadence: self.cadence.into(),
            share_amount: Money::from_decimal(self.share),
            commission_type: self.commission_type.into(),
            commission_rate: self.commission,
            start_date: clock.today().to_string(),
            status: GroupStatus::Active,
            bidding_rule: self.bidding.into(),
            max_bid_limit: Money::from_decimal(self.max_bid),
            members: self.members.into_iter().map(MemberId::from).collect(),
            current_period: self.period,
        }
    }
}

impl NewMember {
    fn into_draft(self) -> MemberDraft {
        MemberDraft {
            name: self.name,
            phone: self.phone,
            address: self.address,
            chat_handle: self.chat,
            note: self.note,
            status: self.status.into(),
        }
    }
}

impl MemberChanges {
    fn merge_into(self, member: &Member) -> MemberDraft {
        MemberDraft {
            name: self.name.unwrap_or_else(|| member.name.clone()),
            phone: self.phone.unwrap_or_else(|| member.phone.clone()),
            address: self.address.unwrap_or_else(|| member.address.clone()),
            chat_handle: self.chat.or_else(|| member.chat_handle.clone()),
            note: self.note.or_else(|| member.note.clone()),
            status: self.status.map_or(member.status, Into::into),
        }
    }
}
