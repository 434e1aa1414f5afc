pub mod json;
pub mod pdf;
pub mod text;

/// Output serialization for the aligned analysis. All three render the same
/// record sequence and must agree on content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Pdf,
}

/// Clock rendering used by the human-readable outputs: whole minutes and
/// zero-padded seconds by integer division/modulo.
pub fn format_clock(elapsed_secs: f64) -> String {
    let whole = elapsed_secs as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_minutes_and_padded_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(5.9), "0:05");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(3723.4), "62:03");
    }
}
