use anyhow::{bail, Result};

use crate::models::TranscriptSegment;

/// Word-count bucketing: the legacy fallback for transcripts that carry no
/// per-segment timestamps.
///
/// Splits `total_duration` into `ceil(duration / bucket_size)` consecutive
/// half-open intervals of `bucket_size` seconds (the last one clipped to the
/// lecture end) and assigns each interval a contiguous slice of the word
/// sequence proportional to its position. Word count does not correlate
/// uniformly with elapsed time, so this is an approximation, never the
/// primary alignment path.
pub fn bucket_transcript(
    text: &str,
    total_duration: f64,
    bucket_size: f64,
) -> Result<Vec<TranscriptSegment>> {
    if !bucket_size.is_finite() || bucket_size <= 0.0 {
        bail!("bucket size must be a positive number of seconds, got {bucket_size}");
    }
    if !total_duration.is_finite() || total_duration < 0.0 {
        bail!("lecture duration must be non-negative, got {total_duration}");
    }
    if total_duration == 0.0 {
        return Ok(Vec::new());
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let bucket_count = (total_duration / bucket_size).ceil() as usize;

    let mut segments = Vec::with_capacity(bucket_count);
    for i in 0..bucket_count {
        let start = i as f64 * bucket_size;
        let end = ((i + 1) as f64 * bucket_size).min(total_duration);
        let lo = i * words.len() / bucket_count;
        let hi = (i + 1) * words.len() / bucket_count;
        segments.push(TranscriptSegment::new(start, end, words[lo..hi].join(" ")));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_count_is_ceiling_of_duration_over_size() {
        let segments = bucket_transcript("one two three", 130.0, 60.0).unwrap();
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn last_bucket_is_clipped_to_lecture_end() {
        let segments = bucket_transcript("a b c", 130.0, 60.0).unwrap();
        let last = segments.last().unwrap();
        assert_eq!(last.start(), 120.0);
        assert_eq!(last.end(), 130.0);
    }

    #[test]
    fn buckets_tile_the_duration_without_gaps() {
        let segments = bucket_transcript("w ".repeat(40).as_str(), 300.0, 60.0).unwrap();
        assert_eq!(segments.first().unwrap().start(), 0.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(segments.last().unwrap().end(), 300.0);
    }

    #[test]
    fn word_slices_are_contiguous_and_cover_all_words() {
        let text = "w0 w1 w2 w3 w4 w5 w6 w7 w8 w9";
        let segments = bucket_transcript(text, 180.0, 60.0).unwrap();
        let rejoined: Vec<String> = segments
            .iter()
            .filter(|s| !s.text.is_empty())
            .map(|s| s.text.clone())
            .collect();
        assert_eq!(rejoined.join(" "), text);
    }

    #[test]
    fn more_buckets_than_words_leaves_empty_buckets() {
        let segments = bucket_transcript("only two", 240.0, 60.0).unwrap();
        assert_eq!(segments.len(), 4);
        let words: usize = segments.iter().map(|s| s.text.split_whitespace().count()).sum();
        assert_eq!(words, 2);
    }

    #[test]
    fn zero_duration_yields_no_buckets() {
        assert!(bucket_transcript("words", 0.0, 60.0).unwrap().is_empty());
    }

    #[test]
    fn invalid_bucket_size_is_rejected() {
        assert!(bucket_transcript("words", 60.0, 0.0).is_err());
        assert!(bucket_transcript("words", 60.0, -5.0).is_err());
    }

    #[test]
    fn bucketed_segments_feed_the_aligner() {
        let segments = bucket_transcript("intro material body material", 120.0, 60.0).unwrap();
        let records = crate::alignment::align_events(&[61.0], &segments).unwrap();
        assert_eq!(records[0].segment.as_ref().unwrap().text, "body material");
    }
}
