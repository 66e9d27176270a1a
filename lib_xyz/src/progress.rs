use std::time::Duration;

/// Remaining-time estimate for a batch: average seconds per finished item
/// times the number of items left. With nothing processed yet there is no
/// estimate, reported as 0 seconds.
pub fn eta_seconds(elapsed: Duration, processed: usize, total: usize) -> f64 {
    if processed == 0 {
        return 0.0;
    }
    let time_per_item = elapsed.as_secs_f64() / processed as f64;
    time_per_item * total.saturating_sub(processed) as f64
}
