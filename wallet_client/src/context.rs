use rand::Rng;

/// Correlation identifiers generated fresh for every provider call. They are
/// sent as the `trace-id`/`span-id` headers and inside the request bodies
/// that carry them, and exist purely so two systems can line their logs up.
#[derive(Debug, Clone)]
pub struct CorrelationContext {
    pub trace_id: String,
    pub span_id: String,
}

impl CorrelationContext {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self { trace_id: format!("{:032x}", rng.gen::<u128>()), span_id: format!("{:016x}", rng.gen::<u64>()) }
    }
}
