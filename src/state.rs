use dashmap::DashMap;
use uuid::Uuid;

use crate::engine::tables::PricingTables;
use crate::models::delivery::Delivery;
use crate::models::quote::Quote;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub quotes: DashMap<Uuid, Quote>,
    pub deliveries: DashMap<Uuid, Delivery>,
    /// Built once at startup, read-only afterwards. Safe to share across
    /// request handlers without locking.
    pub tables: PricingTables,
    pub overhead_per_trip: f64,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(tables: PricingTables, overhead_per_trip: f64) -> Self {
        Self {
            quotes: DashMap::new(),
            deliveries: DashMap::new(),
            tables,
            overhead_per_trip,
            metrics: Metrics::new(),
        }
    }
}
