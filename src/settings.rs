use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    pub sample_interval_secs: f64,
    pub capture_timeout_secs: f64,
    /// Hamming distance below which a frame counts as unchanged.
    pub frame_change_threshold: u32,
    /// Capture device passed to the transcoder (platform default when unset).
    pub device: Option<String>,
    pub classifier_program: Option<PathBuf>,
    pub classifier_args: Vec<String>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            sample_interval_secs: 1.0,
            capture_timeout_secs: 10.0,
            frame_change_threshold: 8,
            device: None,
            classifier_program: None,
            classifier_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub ffmpeg_path: Option<PathBuf>,
    pub whisper_bin: Option<PathBuf>,
    pub whisper_model: Option<PathBuf>,
    pub language: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            whisper_bin: None,
            whisper_model: None,
            language: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub min_event_gap_secs: f64,
    pub bucket_seconds: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let defaults = crate::alignment::AlignmentConfig::default();
        Self {
            min_event_gap_secs: defaults.min_event_gap_secs,
            bucket_seconds: defaults.bucket_seconds,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    sampler: SamplerSettings,
    tools: ToolSettings,
    analysis: AnalysisSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let existed = path.exists();
        let data = if existed {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        let store = Self {
            path,
            data: RwLock::new(data),
        };

        // First run: leave an editable file behind.
        if !existed {
            let guard = store.data.read().unwrap();
            store.persist(&guard)?;
        }

        Ok(store)
    }

    pub fn sampler(&self) -> SamplerSettings {
        self.data.read().unwrap().sampler.clone()
    }

    pub fn tools(&self) -> ToolSettings {
        self.data.read().unwrap().tools.clone()
    }

    pub fn analysis(&self) -> AnalysisSettings {
        self.data.read().unwrap().analysis.clone()
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory {}", parent.display())
                })?;
            }
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

pub fn default_settings_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "lectern")
        .context("could not determine a configuration directory")?;
    Ok(dirs.config_dir().join("settings.json"))
}
