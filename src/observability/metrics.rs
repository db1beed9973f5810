use prometheus::{
    Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub quotes_total: IntCounterVec,
    pub active_deliveries: IntGauge,
    pub status_transitions_total: IntCounterVec,
    pub quoted_price_dollars: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let quotes_total = IntCounterVec::new(
            Opts::new("quotes_total", "Total priced requests by source"),
            &["source"],
        )
        .expect("valid quotes_total metric");

        let active_deliveries =
            IntGauge::new("active_deliveries", "Deliveries not yet delivered or failed")
                .expect("valid active_deliveries metric");

        let status_transitions_total = IntCounterVec::new(
            Opts::new(
                "status_transitions_total",
                "Driver status transition attempts by outcome",
            ),
            &["outcome"],
        )
        .expect("valid status_transitions_total metric");

        let quoted_price_dollars = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "quoted_price_dollars",
                "Distribution of quoted client prices in dollars",
            ),
            &["service_level"],
        )
        .expect("valid quoted_price_dollars metric");

        registry
            .register(Box::new(quotes_total.clone()))
            .expect("register quotes_total");
        registry
            .register(Box::new(active_deliveries.clone()))
            .expect("register active_deliveries");
        registry
            .register(Box::new(status_transitions_total.clone()))
            .expect("register status_transitions_total");
        registry
            .register(Box::new(quoted_price_dollars.clone()))
            .expect("register quoted_price_dollars");

        Self {
            registry,
            quotes_total,
            active_deliveries,
            status_transitions_total,
            quoted_price_dollars,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
