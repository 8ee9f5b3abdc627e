use hui_application::{AppState, SnapshotStore, StoreError};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Keeps the whole ledger in one pretty-printed JSON document.
///
/// A missing file loads as the configured seed state. A file that exists but
/// cannot be parsed is reported instead of being replaced, so a bad edit never
/// silently wipes the ledger.
pub struct JsonSnapshotStore {
    path: PathBuf,
    seed: AppState,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>, seed: AppState) -> Self {
        Self {
            path: path.into(),
            seed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        let err = StoreError::Io {
            path: self.display_path(),
            source,
        };
        tracing::error!(error = %err, "Snapshot I/O failed");
        err
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<AppState, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.display_path(), "No snapshot yet; using seed data");
                return Ok(self.seed.clone());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let state: AppState = serde_json::from_str(&raw).map_err(|err| {
            let err = StoreError::Malformed {
                path: self.display_path(),
                detail: err.to_string(),
            };
            tracing::error!(error = %err, "Snapshot could not be parsed");
            err
        })?;
        tracing::debug!(
            path = %self.display_path(),
            members = state.members.len(),
            groups = state.groups.len(),
            transactions = state.transactions.len(),
            "Loaded snapshot"
        );
        Ok(state)
    }

    fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state).map_err(|err| StoreError::Malformed {
            path: self.display_path(),
            detail: err.to_string(),
        })?;

        // Write beside the target and rename so a crash never leaves half a file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        tracing::debug!(path = %self.display_path(), "Saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_state;
    use chrono::NaiveDate;
    use hui_domain::{GroupId, Money, Transaction};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn seed() -> AppState {
        sample_state(NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"))
    }

    #[rstest]
    fn missing_file_loads_seed(dir: TempDir) {
        let store = JsonSnapshotStore::new(dir.path().join("data.json"), seed());
        let state = store.load().expect("seed state");
        assert_eq!(state, seed());
        assert!(!store.path().exists());
    }

    #[rstest]
    fn save_then_load_preserves_state(dir: TempDir) {
        let store = JsonSnapshotStore::new(dir.path().join("data.json"), AppState::default());
        let mut state = seed();
        state.transactions.push(
            Transaction::contribution("t7", "g1", "m5", 2, Money::new(80_000_050, 2))
                .with_date("2024-02-03"),
        );

        store.save(&state).expect("saved");
        let loaded = store.load().expect("loaded");

        assert_eq!(loaded, state);
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[rstest]
    fn writes_camel_case_document(dir: TempDir) {
        let path = dir.path().join("data.json");
        let store = JsonSnapshotStore::new(&path, AppState::default());
        store.save(&seed()).expect("saved");

        let raw = fs::read_to_string(&path).expect("readable");
        assert!(raw.contains("\"huiGroupId\""));
        assert!(raw.contains("\"amountPerShare\""));
        assert!(raw.contains("\"currentPeriod\""));
        assert!(raw.contains("\"auditLogs\""));
        assert!(raw.contains('\n'));
    }

    #[rstest]
    fn corrupt_file_is_an_error(dir: TempDir) {
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").expect("written");
        let store = JsonSnapshotStore::new(&path, seed());

        let err = store.load().expect_err("corrupt snapshot");
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert_eq!(fs::read_to_string(&path).expect("untouched"), "{ not json");
    }

    #[rstest]
    fn loads_legacy_document(dir: TempDir) {
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{
              "members": [
                {"id": "m1", "name": "An", "phone": "0912", "address": "", "joinDate": "2024-01-01",
                 "zalo": null, "reputationScore": 95, "status": "Uy tín", "note": null}
              ],
              "groups": [
                {"id": "g1", "name": "Legacy", "type": "Tháng", "amountPerShare": 2000000.0,
                 "commissionRate": 2, "totalMembers": 2, "startDate": "2024-01-01",
                 "status": "Đang chạy", "members": ["m1", "m1"], "currentPeriod": 2,
                 "commissionType": "PERCENT", "biddingRule": "Đấu công khai",
                 "minBidStep": 10000, "maxBidLimit": 0, "totalPeriods": 0}
              ],
              "transactions": [
                {"id": "t1", "huiGroupId": "g1", "memberId": "m1", "type": "COLLECT",
                 "amount": 1900000, "date": "2024-01-02", "period": 1,
                 "bidAmount": 100000, "netAmount": 1860000, "note": "Period 1"}
              ],
              "auditLogs": []
            }"#,
        )
        .expect("written");
        let store = JsonSnapshotStore::new(&path, AppState::default());

        let state = store.load().expect("legacy document");
        assert_eq!(state.groups[0].slot_count(), 2);
        assert!(state.groups[0].is_active());
        assert_eq!(state.groups[0].share_amount, Money::from_i64(2_000_000));
        assert!(state.members[0].is_trusted());
        assert_eq!(
            state.group_transactions(&GroupId::new("g1")).count(),
            1
        );
    }
}
