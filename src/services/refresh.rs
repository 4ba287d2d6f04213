use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::models::gp_record::GpRecord;
use crate::models::order::CombinedOrder;
use crate::models::reserve_order::ReserveOrder;

use super::ingest::IngestService;

/// Fixed polling cadence for background refresh cycles.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// One internally consistent result of a full fetch cycle. Readers only ever
/// see a wholly-replaced snapshot, never a partially updated one.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub reserve_orders: Vec<ReserveOrder>,
    pub gp_records: Vec<GpRecord>,
    pub combined_orders: Vec<CombinedOrder>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefreshStatus {
    /// No cycle has succeeded yet.
    Loading,
    /// The snapshot reflects the most recent cycle.
    Ready,
    /// A snapshot exists but the latest cycle failed; data is stale.
    StaleError,
}

/// Loading/error/last-updated tuple exposed to the presentation layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusReport {
    pub status: RefreshStatus,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Refreshed,
    Failed,
    /// A cycle was already running; this trigger was dropped, not queued.
    AlreadyInFlight,
}

struct RefreshState {
    snapshot: Option<Arc<DashboardSnapshot>>,
    status: RefreshStatus,
    last_error: Option<String>,
}

/// Owns the current snapshot and drives fetch cycles.
///
/// Overlapping triggers are coalesced: whichever arrives while a cycle is in
/// flight is ignored, so at most one cycle runs at a time and the displayed
/// state never depends on settle order.
pub struct RefreshService {
    ingest: IngestService,
    state: RwLock<RefreshState>,
    cycle_guard: Mutex<()>,
}

impl RefreshService {
    pub fn new(ingest: IngestService) -> Self {
        Self {
            ingest,
            state: RwLock::new(RefreshState {
                snapshot: None,
                status: RefreshStatus::Loading,
                last_error: None,
            }),
            cycle_guard: Mutex::new(()),
        }
    }

    /// Run one full fetch cycle unless one is already in flight.
    ///
    /// On failure the previous snapshot stays in place (stale-but-available);
    /// only the status and error message change.
    #[instrument(skip(self))]
    pub async fn refresh_once(&self) -> RefreshOutcome {
        let Ok(_guard) = self.cycle_guard.try_lock() else {
            warn!("refresh requested while a cycle is in flight; ignoring");
            return RefreshOutcome::AlreadyInFlight;
        };

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    reserve_orders = snapshot.reserve_orders.len(),
                    gp_records = snapshot.gp_records.len(),
                    combined_orders = snapshot.combined_orders.len(),
                    "refresh cycle completed"
                );
                let mut state = self.state.write().await;
                state.snapshot = Some(Arc::new(snapshot));
                state.status = RefreshStatus::Ready;
                state.last_error = None;
                RefreshOutcome::Refreshed
            }
            Err(err) => {
                error!("refresh cycle failed: {err}");
                let mut state = self.state.write().await;
                if state.snapshot.is_some() {
                    state.status = RefreshStatus::StaleError;
                }
                state.last_error = Some(err.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<DashboardSnapshot, ServiceError> {
        let (reserve_orders, gp_records, combined_orders) = tokio::try_join!(
            self.ingest.fetch_reserve_orders(),
            self.ingest.fetch_gp_records(),
            self.ingest.fetch_combined_orders(),
        )?;
        Ok(DashboardSnapshot {
            reserve_orders,
            gp_records,
            combined_orders,
            fetched_at: Utc::now(),
        })
    }

    /// Current snapshot, or `NotReady` before the first successful cycle.
    pub async fn snapshot(&self) -> Result<Arc<DashboardSnapshot>, ServiceError> {
        let state = self.state.read().await;
        state.snapshot.clone().ok_or_else(|| {
            ServiceError::NotReady(
                state
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "initial data load has not completed".to_string()),
            )
        })
    }

    pub async fn status(&self) -> StatusReport {
        let state = self.state.read().await;
        StatusReport {
            status: state.status,
            last_updated: state.snapshot.as_ref().map(|snapshot| snapshot.fetched_at),
            last_error: state.last_error.clone(),
        }
    }

    /// Background polling loop. The first tick completes immediately, which
    /// gives the startup refresh; subsequent ticks follow the fixed interval.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.refresh_once().await;
        }
    }
}
