//! Lectern command-line interface.
//!
//! Drives the attentiveness pipeline end to end: `watch` samples the webcam
//! and logs distraction timestamps, `transcribe` turns a lecture video into
//! a segment transcript, `analyze` joins the two timelines into a report,
//! and `export` re-renders a saved analysis.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use lectern::alignment::{align_events, bucket_transcript, debounce, AlignmentConfig};
use lectern::models::record::to_entries;
use lectern::models::AnalysisEntry;
use lectern::report::{self, ReportFormat};
use lectern::sensing::{CommandClassifier, FfmpegFrameSource, SamplerController, SamplerOptions};
use lectern::settings::{default_settings_path, SettingsStore};
use lectern::store::{load_transcript, read_timestamps, save_transcript, TimestampLog};
use lectern::transcription::{extract_audio, resolve_binary, Transcriber, WhisperAdapter};

const DEFAULT_TIMESTAMP_STORE: &str = "inattentive_timestamps.txt";
const DEFAULT_ANALYSIS_PDF: &str = "distraction_analysis.pdf";

/// Lectern - lecture attentiveness pipeline
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an attention-sampling session against the webcam
    Watch {
        /// Stop automatically after this many seconds (otherwise Ctrl-C ends
        /// the session)
        #[arg(long)]
        duration: Option<f64>,

        /// Capture device (platform default when omitted)
        #[arg(long)]
        device: Option<String>,

        /// Classifier command; the frame path is appended as its last
        /// argument
        #[arg(long)]
        classifier: Option<PathBuf>,

        /// Extra argument for the classifier command (repeatable)
        #[arg(long = "classifier-arg")]
        classifier_args: Vec<String>,

        /// Seconds between samples
        #[arg(long)]
        interval: Option<f64>,

        /// Timestamp store to append to
        #[arg(long, default_value = DEFAULT_TIMESTAMP_STORE)]
        out: PathBuf,
    },
    /// Extract a lecture video's audio and transcribe it into timed segments
    Transcribe {
        /// Lecture video file
        video: PathBuf,

        /// Where to write the transcript JSON
        #[arg(long, default_value = "transcript.json")]
        out: PathBuf,

        /// whisper.cpp model file
        #[arg(long)]
        model: Option<PathBuf>,

        /// whisper.cpp binary
        #[arg(long)]
        whisper_bin: Option<PathBuf>,

        /// Spoken language hint (e.g. "en"; "auto" to detect)
        #[arg(long)]
        language: Option<String>,

        /// Keep the intermediate WAV next to the transcript
        #[arg(long)]
        keep_audio: bool,
    },
    /// Join distraction timestamps with a transcript and render a report
    Analyze {
        /// Timestamp store written by `watch`
        #[arg(long, default_value = DEFAULT_TIMESTAMP_STORE)]
        timestamps: PathBuf,

        /// Transcript JSON produced by `transcribe`
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Plain-text transcript for the word-count bucketing fallback
        /// (requires --duration)
        #[arg(long, conflicts_with = "transcript")]
        plain_transcript: Option<PathBuf>,

        /// Lecture duration in seconds (bucketing fallback only)
        #[arg(long)]
        duration: Option<f64>,

        /// Bucket width in seconds (bucketing fallback only)
        #[arg(long)]
        bucket_size: Option<f64>,

        /// Minimum gap between kept distraction events
        #[arg(long)]
        gap: Option<f64>,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Output file (stdout for text/json when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Re-render a saved analysis JSON as text or PDF
    Export {
        /// Analysis JSON written by `analyze --format json`
        analysis: PathBuf,

        #[arg(long, value_enum, default_value_t = ReportFormat::Pdf)]
        format: ReportFormat,

        /// Output file (stdout for text when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => default_settings_path()?,
    };
    let settings = SettingsStore::new(settings_path)?;

    match cli.command {
        Commands::Watch {
            duration,
            device,
            classifier,
            classifier_args,
            interval,
            out,
        } => watch(&settings, duration, device, classifier, classifier_args, interval, out).await,
        Commands::Transcribe {
            video,
            out,
            model,
            whisper_bin,
            language,
            keep_audio,
        } => transcribe(&settings, video, out, model, whisper_bin, language, keep_audio),
        Commands::Analyze {
            timestamps,
            transcript,
            plain_transcript,
            duration,
            bucket_size,
            gap,
            format,
            out,
        } => analyze(
            &settings,
            timestamps,
            transcript,
            plain_transcript,
            duration,
            bucket_size,
            gap,
            format,
            out,
        ),
        Commands::Export { analysis, format, out } => export(analysis, format, out),
    }
}

async fn watch(
    settings: &SettingsStore,
    duration: Option<f64>,
    device: Option<String>,
    classifier: Option<PathBuf>,
    classifier_args: Vec<String>,
    interval: Option<f64>,
    out: PathBuf,
) -> Result<()> {
    let sampler = settings.sampler();
    let tools = settings.tools();

    let ffmpeg = resolve_binary(tools.ffmpeg_path.as_deref(), "ffmpeg")?;
    let source = FfmpegFrameSource::new(ffmpeg, device.or(sampler.device.clone()));

    let program = classifier
        .or(sampler.classifier_program.clone())
        .context("no classifier configured; pass --classifier or set sampler.classifier_program in the settings file")?;
    let args = if classifier_args.is_empty() {
        sampler.classifier_args.clone()
    } else {
        classifier_args
    };

    let options = SamplerOptions {
        interval: std::time::Duration::from_secs_f64(
            interval.unwrap_or(sampler.sample_interval_secs).max(0.05),
        ),
        capture_timeout: std::time::Duration::from_secs_f64(sampler.capture_timeout_secs),
        frame_change_threshold: sampler.frame_change_threshold,
    };

    let event_log = TimestampLog::create(out.clone())?;

    let mut controller = SamplerController::new();
    controller.start_sampling(
        Arc::new(source),
        Arc::new(CommandClassifier::new(program, args)),
        event_log,
        options,
    )?;

    println!("Sampling attention; press Ctrl-C to stop.");

    let session = match duration {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(std::time::Duration::from_secs_f64(secs.max(0.0))) => {
                    controller.stop_sampling().await?
                }
                _ = tokio::signal::ctrl_c() => {
                    controller.cancel_sampling().await?
                }
            }
        }
        None => {
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for Ctrl-C")?;
            controller.stop_sampling().await?
        }
    };

    println!(
        "Session {} {}: {} distraction event(s) logged to {}",
        session.id,
        session.status.as_str().to_ascii_lowercase(),
        session.events_logged,
        out.display()
    );
    Ok(())
}

fn transcribe(
    settings: &SettingsStore,
    video: PathBuf,
    out: PathBuf,
    model: Option<PathBuf>,
    whisper_bin: Option<PathBuf>,
    language: Option<String>,
    keep_audio: bool,
) -> Result<()> {
    let tools = settings.tools();

    let ffmpeg = resolve_binary(tools.ffmpeg_path.as_deref(), "ffmpeg")?;
    let bin = match whisper_bin.or(tools.whisper_bin.clone()) {
        Some(path) => resolve_binary(Some(path.as_path()), "whisper")?,
        None => resolve_binary(None, "whisper-cli")?,
    };
    let model = model
        .or(tools.whisper_model.clone())
        .context("no whisper model configured; pass --model or set tools.whisper_model in the settings file")?;
    let language = language.unwrap_or(tools.language.clone());

    let wav = if keep_audio {
        out.with_extension("wav")
    } else {
        std::env::temp_dir().join(format!("lectern-audio-{}.wav", uuid::Uuid::new_v4()))
    };

    extract_audio(&ffmpeg, &video, &wav)?;

    let adapter = WhisperAdapter::new(bin, model, language)?;
    info!("transcribing {} with {}", video.display(), adapter.name());
    let segments = adapter.transcribe(&wav)?;

    if !keep_audio {
        let _ = fs::remove_file(&wav);
    }

    save_transcript(&out, &segments)?;
    println!(
        "Transcribed {} segment(s) spanning {:.1}s into {}",
        segments.len(),
        segments.last().map(|s| s.end()).unwrap_or(0.0),
        out.display()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    settings: &SettingsStore,
    timestamps: PathBuf,
    transcript: Option<PathBuf>,
    plain_transcript: Option<PathBuf>,
    duration: Option<f64>,
    bucket_size: Option<f64>,
    gap: Option<f64>,
    format: ReportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let analysis = settings.analysis();
    let config = AlignmentConfig {
        min_event_gap_secs: gap.unwrap_or(analysis.min_event_gap_secs),
        bucket_seconds: bucket_size.unwrap_or(analysis.bucket_seconds),
    };

    let raw = read_timestamps(&timestamps)?;
    if raw.is_empty() {
        println!("No distractions recorded; nothing to analyze.");
        return Ok(());
    }

    let segments = match (transcript, plain_transcript) {
        (Some(path), None) => load_transcript(&path)?,
        (None, Some(path)) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read transcript text {}", path.display()))?;
            let total = duration.context(
                "--duration is required with --plain-transcript (bucketing cannot infer lecture length)",
            )?;
            warn!("using word-count bucketing; timings are approximate");
            bucket_transcript(&text, total, config.bucket_seconds)?
        }
        (None, None) => bail!(
            "a transcript is required: --transcript segments.json, or --plain-transcript text.txt with --duration"
        ),
        (Some(_), Some(_)) => unreachable!("clap rejects conflicting transcript flags"),
    };

    let kept = debounce(&raw, config.min_event_gap_secs);
    info!(
        "debounced {} raw event(s) down to {} (gap {}s)",
        raw.len(),
        kept.len(),
        config.min_event_gap_secs
    );

    let records = align_events(&kept, &segments)?;
    let unmatched = records.iter().filter(|r| !r.is_matched()).count();
    if unmatched > 0 {
        warn!("{unmatched} distraction event(s) had no containing transcript segment");
    }

    let entries = to_entries(&records);
    write_report(&entries, format, out)
}

fn export(analysis: PathBuf, format: ReportFormat, out: Option<PathBuf>) -> Result<()> {
    let entries = report::json::load(&analysis)?;
    write_report(&entries, format, out)
}

fn write_report(
    entries: &[AnalysisEntry],
    format: ReportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    match format {
        ReportFormat::Text => {
            let rendered = report::text::render(entries);
            match out {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write report {}", path.display()))?;
                    println!("Wrote {} record(s) to {}", entries.len(), path.display());
                }
                None => print!("{rendered}"),
            }
        }
        ReportFormat::Json => {
            let rendered = report::json::render(entries)?;
            match out {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("failed to write report {}", path.display()))?;
                    println!("Wrote {} record(s) to {}", entries.len(), path.display());
                }
                None => println!("{rendered}"),
            }
        }
        ReportFormat::Pdf => {
            let path = out.unwrap_or_else(|| PathBuf::from(DEFAULT_ANALYSIS_PDF));
            let bytes = report::pdf::render(entries)?;
            fs::write(&path, bytes)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            println!("Wrote {} record(s) to {}", entries.len(), path.display());
        }
    }
    Ok(())
}
