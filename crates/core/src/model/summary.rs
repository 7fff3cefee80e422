/// Aggregate result of one finished batch, as reported by the service.
///
/// `avg` arrives already rounded server-side; the client displays it as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    count: u32,
    total: u32,
    avg: f64,
}

impl BatchSummary {
    #[must_use]
    pub fn new(count: u32, total: u32, avg: f64) -> Self {
        Self { count, total, avg }
    }

    /// Number of questions answered in the batch.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sum of the scores across the batch.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Average score as reported by the service.
    #[must_use]
    pub fn avg(&self) -> f64 {
        self.avg
    }

    /// Highest achievable total for the batch (10 points per question).
    #[must_use]
    pub fn max_total(&self) -> u32 {
        self.count * 10
    }
}
