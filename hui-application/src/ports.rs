use crate::{error::StoreError, model::AppState};
use chrono::{NaiveDate, NaiveDateTime};
use hui_domain::MemberId;

pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<AppState, StoreError>;
    fn save(&self, state: &AppState) -> Result<(), StoreError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
}

pub trait MemberDirectory {
    fn display_name(&self, member_id: &MemberId) -> Option<&str>;
}

impl MemberDirectory for AppState {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.member(member_id).map(|member| member.name.as_str())
    }
}
