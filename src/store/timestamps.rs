use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

/// Read the distraction timestamp store: plain text, one elapsed-seconds
/// value per line.
///
/// A missing file means no distractions were recorded and yields an empty
/// list. A malformed line fails the whole load; silently skipping lines
/// would desynchronize the ordering assumptions downstream.
pub fn read_timestamps(path: &Path) -> Result<Vec<f64>> {
    if !path.exists() {
        info!("timestamp store {} does not exist; treating as no distractions", path.display());
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read timestamp store {}", path.display()))?;

    let mut timestamps = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: f64 = line.parse().with_context(|| {
            format!(
                "malformed timestamp '{}' at {}:{}",
                line,
                path.display(),
                idx + 1
            )
        })?;
        if !value.is_finite() {
            bail!(
                "timestamp at {}:{} is not a finite number",
                path.display(),
                idx + 1
            );
        }
        if value < 0.0 {
            bail!(
                "negative timestamp {} at {}:{}",
                value,
                path.display(),
                idx + 1
            );
        }
        if let Some(&prev) = timestamps.last() {
            if value < prev {
                bail!(
                    "timestamps out of order at {}:{} ({} after {})",
                    path.display(),
                    idx + 1,
                    value,
                    prev
                );
            }
        }
        timestamps.push(value);
    }

    Ok(timestamps)
}

/// Event writer used by the sampler. Each distraction event is written
/// through as it happens so a crashed session still leaves a usable store.
/// Creating the log starts a fresh store; elapsed times restart at zero per
/// session, so carrying old lines over would break the ordering contract.
pub struct TimestampLog {
    file: File,
    path: PathBuf,
    written: u64,
}

impl TimestampLog {
    pub fn create(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory {}", parent.display())
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open timestamp store {}", path.display()))?;
        Ok(Self {
            file,
            path,
            written: 0,
        })
    }

    pub fn append(&mut self, elapsed_secs: f64) -> Result<()> {
        writeln!(self.file, "{elapsed_secs:.2}")
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("lectern-ts-{}.txt", Uuid::new_v4()))
    }

    #[test]
    fn reads_one_value_per_line() {
        let path = temp_path();
        fs::write(&path, "1.25\n5.00\n\n12.75\n").unwrap();
        let timestamps = read_timestamps(&path).unwrap();
        assert_eq!(timestamps, vec![1.25, 5.0, 12.75]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_means_no_distractions() {
        let path = temp_path();
        assert!(read_timestamps(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_line_fails_the_whole_load() {
        let path = temp_path();
        fs::write(&path, "1.0\nnot-a-number\n3.0\n").unwrap();
        let err = read_timestamps(&path).unwrap_err();
        assert!(format!("{err:#}").contains(":2"), "error should name line 2: {err:#}");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn negative_values_are_rejected() {
        let path = temp_path();
        fs::write(&path, "-0.5\n").unwrap();
        assert!(read_timestamps(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn out_of_order_values_are_rejected() {
        let path = temp_path();
        fs::write(&path, "5.0\n3.0\n").unwrap();
        assert!(read_timestamps(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let path = temp_path();
        fs::write(&path, "inf\n").unwrap();
        assert!(read_timestamps(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn creating_a_log_starts_a_fresh_store() {
        let path = temp_path();
        fs::write(&path, "999.00\n").unwrap();
        {
            let mut log = TimestampLog::create(path.clone()).unwrap();
            log.append(0.5).unwrap();
        }
        assert_eq!(read_timestamps(&path).unwrap(), vec![0.5]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn log_appends_round_trip_through_reader() {
        let path = temp_path();
        {
            let mut log = TimestampLog::create(path.clone()).unwrap();
            log.append(1.234).unwrap();
            log.append(7.0).unwrap();
            assert_eq!(log.written(), 2);
        }
        let timestamps = read_timestamps(&path).unwrap();
        assert_eq!(timestamps, vec![1.23, 7.0]);
        fs::remove_file(&path).unwrap();
    }
}
