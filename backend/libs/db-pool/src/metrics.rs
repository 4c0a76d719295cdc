//! Pool occupancy gauges
//!
//! Query timing belongs to the callers, who know which statement ran. This
//! module only reports how full the pool is.

use prometheus::{register_int_gauge_vec, IntGaugeVec};
use sqlx::PgPool;

lazy_static::lazy_static! {
    /// Connections by state (idle/active/max)
    static ref DB_POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Database pool connection count by state",
        &["service", "state"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

/// Point-in-time view of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub size: u32,
    pub idle: u32,
    pub max: u32,
}

impl PoolSnapshot {
    pub fn capture(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: u32::try_from(pool.num_idle()).unwrap_or(u32::MAX),
            max: pool.options().get_max_connections(),
        }
    }

    /// Connections checked out right now
    ///
    /// `size` and `num_idle` are read separately, so idle can briefly exceed size.
    pub fn active(&self) -> u32 {
        self.size.saturating_sub(self.idle)
    }

    pub(crate) fn record(&self, service: &str) {
        for (state, value) in [
            ("idle", self.idle),
            ("active", self.active()),
            ("max", self.max),
        ] {
            DB_POOL_CONNECTIONS
                .with_label_values(&[service, state])
                .set(i64::from(value));
        }
    }
}

/// Capture and publish the pool's occupancy
pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) -> PoolSnapshot {
    let snapshot = PoolSnapshot::capture(pool);
    snapshot.record(service);
    snapshot
}
