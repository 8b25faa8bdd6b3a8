use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::{
    model::{
        income::IncomeRecord,
        labels::{FIELD_LABELS, KEY_LABELS},
    },
    stats::aggregate::{IncomeSummary, compute_summary},
    store::{IncomeStore, error::StoreError},
    view::{
        DashboardCharts, build_charts,
        summary::{StatLine, stat_lines},
        table::{IncomeTable, build_table, time_range},
    },
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Nothing fetched yet.
    Idle,
    Ready,
    Failed,
}

/// Records of one load plus everything derived from them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: LoadStatus,
    pub error: Option<String>,
    /// As delivered by the store: newest first.
    pub records: Vec<IncomeRecord>,
    /// `None` for an empty record list.
    pub summary: Option<IncomeSummary>,
    pub stats: Vec<StatLine>,
    pub time_range: Option<String>,
    pub charts: DashboardCharts,
    pub table: IncomeTable,
}

impl Snapshot {
    pub fn build(records: Vec<IncomeRecord>) -> Self {
        let summary = (!records.is_empty()).then(|| compute_summary(&records));
        let stats = summary
            .as_ref()
            .map(|s| stat_lines(s, &KEY_LABELS))
            .unwrap_or_default();

        Self {
            status: LoadStatus::Ready,
            error: None,
            summary,
            stats,
            time_range: time_range(&records),
            charts: build_charts(&records, &FIELD_LABELS),
            table: build_table(&records, &FIELD_LABELS, &[]),
            records,
        }
    }

    pub fn idle() -> Self {
        Self {
            status: LoadStatus::Idle,
            ..Self::build(Vec::new())
        }
    }

    /// A failed load shows like an empty table, but says why.
    pub fn failed(err: &StoreError) -> Self {
        Self {
            status: LoadStatus::Failed,
            error: Some(err.to_string()),
            ..Self::build(Vec::new())
        }
    }
}

#[derive(Debug)]
pub enum RefreshError {
    /// A fetch is already in flight.
    InProgress,
    Store(StoreError),
}

/// Owns the loading flag and the current snapshot.
pub struct DashboardState {
    store: IncomeStore,
    loading: AtomicBool,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl DashboardState {
    pub fn new(store: IncomeStore) -> Self {
        Self {
            store,
            loading: AtomicBool::new(false),
            snapshot: RwLock::new(Arc::new(Snapshot::idle())),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace(&self, snapshot: Snapshot) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(snapshot);
    }

    /// Fetch everything and rebuild the snapshot. Only one fetch runs at a time.
    ///
    /// The loading flag is released even when the returned future is dropped
    /// mid-fetch.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, RefreshError> {
        let _loading = LoadingGuard::acquire(&self.loading).ok_or(RefreshError::InProgress)?;

        let result = self.store.fetch_all().await;
        match result {
            Ok(records) => {
                info!(
                    backend = self.store.backend_name(),
                    count = records.len(),
                    "Income records loaded"
                );
                self.replace(Snapshot::build(records));
                Ok(self.snapshot())
            }
            Err(e) => {
                error!(error = %e, backend = self.store.backend_name(), "Failed to load income records");
                self.replace(Snapshot::failed(&e));
                Err(RefreshError::Store(e))
            }
        }
    }
}

/// Holds the loading flag until dropped.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::income::{PayrollField::*, record};
    use futures_util::FutureExt;

    fn rows() -> Vec<IncomeRecord> {
        vec![
            record("2024-02-01T00:00:00Z", &[(BaseSalary, 10000.0), (Tax, -1000.0), (Rent, -2000.0)]),
            record("2024-01-01T00:00:00Z", &[(BaseSalary, 10000.0), (Tax, -1000.0), (Rent, -2000.0)]),
        ]
    }

    #[test]
    fn empty_snapshot_skips_summary() {
        let snapshot = Snapshot::build(Vec::new());
        assert_eq!(snapshot.status, LoadStatus::Ready);
        assert!(snapshot.summary.is_none());
        assert!(snapshot.stats.is_empty());
        assert!(snapshot.time_range.is_none());
        assert!(snapshot.table.placeholder.is_some());
    }

    #[test]
    fn snapshot_keeps_store_order_for_records() {
        let snapshot = Snapshot::build(rows());
        assert_eq!(snapshot.records[0].time, "2024-02-01T00:00:00Z");
        assert_eq!(snapshot.table.rows[0][0], "2024年02月");
        assert_eq!(snapshot.charts.trend.labels, vec!["2024-01", "2024-02"]);
        assert_eq!(snapshot.summary.unwrap().total_post_tax, 14000.0);
        assert_eq!(snapshot.stats.len(), 6);
    }

    #[actix_web::test]
    async fn refresh_replaces_the_snapshot() {
        let state = DashboardState::new(IncomeStore::Fixture(Ok(rows())));
        assert_eq!(state.snapshot().status, LoadStatus::Idle);

        let snapshot = state.refresh().await.unwrap();
        assert_eq!(snapshot.status, LoadStatus::Ready);
        assert_eq!(snapshot.records.len(), 2);
        assert!(!state.is_loading());
    }

    #[actix_web::test]
    async fn failed_fetch_is_not_reported_as_no_data() {
        let state = DashboardState::new(IncomeStore::Fixture(Err(503)));
        let err = state.refresh().await.err().unwrap();
        assert!(matches!(err, RefreshError::Store(StoreError::Status(503))));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.status, LoadStatus::Failed);
        assert!(snapshot.error.as_deref().unwrap().contains("503"));
        assert!(snapshot.records.is_empty());
        assert!(!state.is_loading());
    }

    #[actix_web::test]
    async fn second_fetch_is_refused_while_loading() {
        let state = DashboardState::new(IncomeStore::Fixture(Ok(rows())));
        state.loading.store(true, Ordering::SeqCst);
        assert!(matches!(state.refresh().await, Err(RefreshError::InProgress)));
        assert_eq!(state.snapshot().status, LoadStatus::Idle);
    }

    #[actix_web::test]
    async fn abandoned_fetch_releases_the_loading_flag() {
        let state = DashboardState::new(IncomeStore::Stalled);

        let mut pending = Box::pin(state.refresh());
        assert!((&mut pending).now_or_never().is_none());
        assert!(state.is_loading());
        assert!(matches!(state.refresh().now_or_never(), Some(Err(RefreshError::InProgress))));

        drop(pending);
        assert!(!state.is_loading());
        assert_eq!(state.snapshot().status, LoadStatus::Idle);

        let timed_out =
            actix_web::rt::time::timeout(std::time::Duration::from_millis(50), state.refresh())
                .await;
        assert!(timed_out.is_err());
        assert!(!state.is_loading());
    }
}
