use anyhow::{bail, Result};

use crate::models::{AlignedRecord, TranscriptSegment};

/// Map each distraction timestamp to the transcript segment active at that
/// instant.
///
/// Both inputs must already be sorted (non-decreasing) with non-negative
/// times; violations are errors rather than silent fixes. Every input event
/// produces exactly one record: matched, or explicitly unmatched when no
/// segment contains it (a coverage gap, or an event past the last segment).
///
/// Containment is half-open: `segment.start <= t < segment.end`. When
/// segments overlap (a tolerated transcriber irregularity) the
/// earlier-starting segment wins; that tie-break is deliberate, not an
/// iteration-order accident.
///
/// Pure over its inputs: no I/O, no state, identical output on identical
/// input.
pub fn align_events(
    timestamps: &[f64],
    segments: &[TranscriptSegment],
) -> Result<Vec<AlignedRecord>> {
    validate_timestamps(timestamps)?;
    validate_segments(segments)?;

    // One linear pass decides the lookup strategy. An overlap-free sorted
    // list admits a binary search per event; any overlap forces the forward
    // scan so the earliest-start tie-break holds exactly.
    let overlap_free = segments
        .windows(2)
        .all(|pair| pair[0].end() <= pair[1].start());

    let mut records = Vec::with_capacity(timestamps.len());
    for &t in timestamps {
        let hit = if overlap_free {
            find_bisect(segments, t)
        } else {
            find_forward(segments, t)
        };
        records.push(AlignedRecord {
            timestamp: t,
            segment: hit.cloned(),
        });
    }

    Ok(records)
}

/// Point lookup used for single timestamps. Same containment and tie-break
/// rules as [`align_events`].
pub fn find_segment(segments: &[TranscriptSegment], t: f64) -> Option<&TranscriptSegment> {
    let overlap_free = segments
        .windows(2)
        .all(|pair| pair[0].end() <= pair[1].start());
    if overlap_free {
        find_bisect(segments, t)
    } else {
        find_forward(segments, t)
    }
}

/// Binary search over start times. Only valid for overlap-free input, where
/// the sole candidate containing `t` is the last segment starting at or
/// before it.
fn find_bisect(segments: &[TranscriptSegment], t: f64) -> Option<&TranscriptSegment> {
    let idx = segments.partition_point(|s| s.start() <= t);
    let candidate = segments[..idx].last()?;
    if t < candidate.end() {
        Some(candidate)
    } else {
        None
    }
}

/// First match in scan order; with sorted starts this is the
/// earliest-starting containing segment.
fn find_forward(segments: &[TranscriptSegment], t: f64) -> Option<&TranscriptSegment> {
    segments.iter().find(|s| s.interval.contains(t))
}

fn validate_timestamps(timestamps: &[f64]) -> Result<()> {
    if let Some(bad) = timestamps.iter().find(|t| !t.is_finite()) {
        bail!("distraction timestamp is not a finite number: {bad}");
    }
    for pair in timestamps.windows(2) {
        if pair[1] < pair[0] {
            bail!(
                "distraction timestamps out of order: {} follows {}",
                pair[1],
                pair[0]
            );
        }
    }
    if let Some(&first) = timestamps.first() {
        if first < 0.0 {
            bail!("distraction timestamps must be non-negative, got {first}");
        }
    }
    Ok(())
}

pub(crate) fn validate_segments(segments: &[TranscriptSegment]) -> Result<()> {
    for (i, s) in segments.iter().enumerate() {
        if !s.start().is_finite() || !s.end().is_finite() {
            bail!("segment {i} has a non-finite bound");
        }
        if s.start() < 0.0 {
            bail!("segment {i} starts before zero ({})", s.start());
        }
        if s.end() < s.start() {
            bail!(
                "segment {i} ends before it starts ({} > {})",
                s.start(),
                s.end()
            );
        }
    }
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[1].start() < pair[0].start() {
            bail!("segments out of order at index {}", i + 1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[(f64, f64, &str)]) -> Vec<TranscriptSegment> {
        parts
            .iter()
            .map(|&(start, end, text)| TranscriptSegment::new(start, end, text))
            .collect()
    }

    #[test]
    fn matched_records_satisfy_containment() {
        let segments = segs(&[(0.0, 10.0, "intro"), (10.0, 25.0, "body")]);
        let records = align_events(&[0.0, 4.2, 9.99, 12.0, 24.9], &segments).unwrap();
        for record in &records {
            let segment = record.segment.as_ref().expect("all inside coverage");
            assert!(segment.start() <= record.timestamp);
            assert!(record.timestamp < segment.end());
        }
    }

    #[test]
    fn timestamp_at_segment_end_matches_next_segment() {
        let segments = segs(&[(0.0, 10.0, "intro"), (10.0, 25.0, "body")]);
        let records = align_events(&[10.0], &segments).unwrap();
        assert_eq!(records[0].segment.as_ref().unwrap().text, "body");
    }

    #[test]
    fn timestamp_past_last_segment_is_unmatched_not_an_error() {
        let segments = segs(&[(0.0, 10.0, "intro"), (10.0, 25.0, "body")]);
        let records = align_events(&[30.0], &segments).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].segment.is_none());
    }

    #[test]
    fn timestamp_in_coverage_gap_is_unmatched() {
        let segments = segs(&[(0.0, 10.0, "intro"), (12.0, 25.0, "body")]);
        let records = align_events(&[11.0], &segments).unwrap();
        assert!(records[0].segment.is_none());
    }

    #[test]
    fn every_event_produces_exactly_one_record() {
        let segments = segs(&[(0.0, 10.0, "intro")]);
        let events = [1.0, 2.0, 50.0, 60.0];
        let records = align_events(&events, &segments).unwrap();
        assert_eq!(records.len(), events.len());
    }

    #[test]
    fn debounce_then_align_scenario() {
        let segments = segs(&[(0.0, 10.0, "intro"), (10.0, 25.0, "body")]);
        let kept = crate::alignment::debounce(&[5.0, 5.5, 20.0], 5.0);
        assert_eq!(kept, vec![5.0, 20.0]);
        let records = align_events(&kept, &segments).unwrap();
        assert_eq!(records[0].segment.as_ref().unwrap().text, "intro");
        assert_eq!(records[1].segment.as_ref().unwrap().text, "body");
    }

    #[test]
    fn overlapping_segments_resolve_to_earlier_start() {
        let segments = segs(&[(0.0, 20.0, "long"), (10.0, 15.0, "inner")]);
        let records = align_events(&[12.0], &segments).unwrap();
        assert_eq!(records[0].segment.as_ref().unwrap().text, "long");
    }

    #[test]
    fn aligning_twice_yields_identical_output() {
        let segments = segs(&[(0.0, 10.0, "a"), (10.0, 30.0, "b"), (35.0, 40.0, "c")]);
        let events = [0.0, 9.0, 10.0, 31.0, 35.0, 39.9, 99.0];
        let first = align_events(&events, &segments).unwrap();
        let second = align_events(&events, &segments).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_inputs_are_fine() {
        assert!(align_events(&[], &[]).unwrap().is_empty());
        let segments = segs(&[(0.0, 10.0, "a")]);
        assert!(align_events(&[], &segments).unwrap().is_empty());
        let records = align_events(&[1.0], &[]).unwrap();
        assert!(records[0].segment.is_none());
    }

    #[test]
    fn out_of_order_timestamps_are_rejected() {
        let segments = segs(&[(0.0, 10.0, "a")]);
        assert!(align_events(&[5.0, 3.0], &segments).is_err());
    }

    #[test]
    fn negative_timestamps_are_rejected() {
        assert!(align_events(&[-1.0, 2.0], &[]).is_err());
    }

    #[test]
    fn inverted_segment_is_rejected() {
        let segments = segs(&[(5.0, 2.0, "bad")]);
        assert!(align_events(&[1.0], &segments).is_err());
    }

    #[test]
    fn out_of_order_segments_are_rejected() {
        let segments = segs(&[(10.0, 20.0, "b"), (0.0, 10.0, "a")]);
        assert!(align_events(&[1.0], &segments).is_err());
    }

    #[test]
    fn find_segment_point_lookup() {
        let segments = segs(&[(0.0, 10.0, "a"), (10.0, 25.0, "b")]);
        assert_eq!(find_segment(&segments, 9.99).unwrap().text, "a");
        assert_eq!(find_segment(&segments, 10.0).unwrap().text, "b");
        assert!(find_segment(&segments, 25.0).is_none());
        assert!(find_segment(&segments, 0.0).is_some());
    }

    #[test]
    fn zero_length_segment_matches_nothing() {
        // [5, 5) is empty under half-open semantics.
        let segments = segs(&[(5.0, 5.0, "blip"), (5.0, 10.0, "real")]);
        let records = align_events(&[5.0], &segments).unwrap();
        assert_eq!(records[0].segment.as_ref().unwrap().text, "real");
    }
}
