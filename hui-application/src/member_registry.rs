use crate::{
    error::MemberError,
    event_bus::{EventBus, LedgerEvent},
    model::{AppState, MemberStats},
    ports::{Clock, IdGenerator},
};
use hui_domain::{DebtLedger, Member, MemberId, MemberStatus};

/// Editable member fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub chat_handle: Option<String>,
    pub note: Option<String>,
    pub status: MemberStatus,
}

impl MemberDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    fn validate(&self, state: &AppState, editing: Option<&MemberId>) -> Result<(), MemberError> {
        if self.name.trim().is_empty() {
            return Err(MemberError::MissingField("name"));
        }
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(MemberError::MissingField("phone"));
        }
        let taken = state
            .members
            .iter()
            .any(|member| member.phone == phone && Some(&member.id) != editing);
        if taken {
            return Err(MemberError::DuplicatePhone(phone.to_owned()));
        }
        Ok(())
    }

    fn apply(self, member: &mut Member) {
        member.name = self.name.trim().to_owned();
        member.phone = self.phone.trim().to_owned();
        member.address = self.address;
        member.chat_handle = self.chat_handle.filter(|handle| !handle.is_empty());
        member.note = self.note.filter(|note| !note.is_empty());
        member.status = self.status;
    }
}

#[derive(Clone, Copy)]
pub struct MemberRegistry<'a> {
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    events: &'a EventBus,
}

impl<'a> MemberRegistry<'a> {
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator, events: &'a EventBus) -> Self {
        Self { clock, ids, events }
    }

    /// Case-insensitive match on name, substring match on phone.
    pub fn search<'s>(&self, state: &'s AppState, query: &str) -> Vec<&'s Member> {
        let needle = query.trim().to_lowercase();
        state
            .members
            .iter()
            .filter(|member| {
                member.name.to_lowercase().contains(&needle) || member.phone.contains(&needle)
            })
            .collect()
    }

    /// Members on the watchlist or blacklist.
    pub fn high_risk<'s>(&self, state: &'s AppState) -> Vec<&'s Member> {
        state
            .members
            .iter()
            .filter(|member| member.is_high_risk())
            .collect()
    }

    pub fn trusted<'s>(&self, state: &'s AppState) -> Vec<&'s Member> {
        state
            .members
            .iter()
            .filter(|member| member.is_trusted())
            .collect()
    }

    pub fn create(&self, state: &mut AppState, draft: MemberDraft) -> Result<MemberId, MemberError> {
        draft.validate(state, None)?;

        let mut member = Member::new(self.ids.next_id("MEM"), "");
        member.join_date = self.clock.today().to_string();
        draft.apply(&mut member);
        let id = member.id.clone();
        state.members.push(member);

        tracing::info!(member = %id, "Created member");
        self.events
            .publish(&LedgerEvent::MemberCreated { member: id.clone() });
        Ok(id)
    }

    pub fn update(
        &self,
        state: &mut AppState,
        id: &MemberId,
        draft: MemberDraft,
    ) -> Result<(), MemberError> {
        if state.member(id).is_none() {
            return Err(MemberError::NotFound(id.clone()));
        }
        draft.validate(state, Some(id))?;
        let member = state
            .member_mut(id)
            .ok_or_else(|| MemberError::NotFound(id.clone()))?;
        draft.apply(member);

        tracing::info!(member = %id, "Updated member");
        self.events
            .publish(&LedgerEvent::MemberUpdated { member: id.clone() });
        Ok(())
    }

    /// Refused while the member still holds a slot in an active group.
    pub fn delete(&self, state: &mut AppState, id: &MemberId) -> Result<Member, MemberError> {
        let position = state
            .members
            .iter()
            .position(|member| member.id == *id)
            .ok_or_else(|| MemberError::NotFound(id.clone()))?;
        let groups = state
            .active_groups()
            .filter(|group| group.holds_slot(id))
            .count();
        if groups > 0 {
            return Err(MemberError::ActiveMembership {
                member: id.clone(),
                groups,
            });
        }

        let removed = state.members.remove(position);
        tracing::info!(member = %id, "Deleted member");
        self.events
            .publish(&LedgerEvent::MemberDeleted { member: id.clone() });
        Ok(removed)
    }

    pub fn stats(&self, state: &AppState, id: &MemberId) -> MemberStats {
        MemberStats {
            groups_joined: state
                .groups
                .iter()
                .filter(|group| group.holds_slot(id))
                .count(),
            collections: state
                .transactions
                .iter()
                .filter(|tx| tx.is_collect() && tx.member_id == *id)
                .count(),
            total_debt: DebtLedger.member_total_debt(id, &state.groups, &state.transactions),
        }
    }
}
