/// Collapse a raw distraction-event stream into meaningfully distinct events.
///
/// The input is a non-decreasing sequence of elapsed-seconds timestamps. The
/// first event is always kept; every subsequent kept event is at least
/// `min_gap` seconds after the previously kept one. Events are never
/// reordered. A negative `min_gap` behaves as zero.
pub fn debounce(timestamps: &[f64], min_gap: f64) -> Vec<f64> {
    let gap = min_gap.max(0.0);
    let mut kept = Vec::new();
    let mut last_kept: Option<f64> = None;

    for &t in timestamps {
        match last_kept {
            Some(prev) if t - prev < gap => {}
            _ => {
                kept.push(t);
                last_kept = Some(t);
            }
        }
    }

    kept
}
