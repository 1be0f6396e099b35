//! Batch driver: walks the working directory and runs each file's pipeline.

use crate::config::TagfetchConfig;
use crate::error::PipelineError;
use crate::extract;
use crate::fetch;
use crate::organize;
use crate::resolver;
use crate::tags::{self, MetadataRecord};
use anyhow::{Context, Result};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one file's pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Processed,
    SkippedNoUrl,
    Error,
}

/// One audio file queued for processing, with its resolved source URL.
#[derive(Debug)]
pub struct FileTask {
    pub path: PathBuf,
    pub file_name: String,
    pub url: Option<String>,
}

/// End-of-run tallies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchCounters {
    pub processed: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl BatchCounters {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Processed => self.processed += 1,
            Outcome::SkippedNoUrl => self.skipped += 1,
            Outcome::Error => self.errors += 1,
        }
    }
}

/// True if the file name carries one of the configured audio extensions.
fn is_audio_file(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Processes every audio file in `work_dir`, strictly sequentially.
///
/// Per-file failures are reported and tallied; the batch keeps going. Only an
/// unenumerable working directory aborts the run. Returns the final counters
/// after printing the summary.
pub fn run(
    work_dir: &Path,
    cfg: &TagfetchConfig,
    fallback_url: Option<&str>,
) -> Result<BatchCounters> {
    let mut tasks: Vec<FileTask> = Vec::new();
    let entries = fs::read_dir(work_dir)
        .with_context(|| format!("cannot list directory {}", work_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read {}", work_dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_audio_file(&file_name, &cfg.audio_extensions) {
            continue;
        }
        let url = resolver::resolve_source_url(&file_name, fallback_url);
        tasks.push(FileTask {
            path: entry.path(),
            file_name,
            url,
        });
    }
    // Directory order is platform-dependent; fix it so collision suffixes
    // land deterministically.
    tasks.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::info!(
        dir = %work_dir.display(),
        files = tasks.len(),
        "starting batch"
    );

    let dest_root = work_dir.join(&cfg.destination_dir);
    let mut counters = BatchCounters::default();
    for task in &tasks {
        counters.record(process_task(task, cfg, &dest_root));
    }

    println!();
    println!("Processing summary:");
    println!("  processed: {}", counters.processed);
    println!("  errors:    {}", counters.errors);
    println!("  skipped:   {}", counters.skipped);

    Ok(counters)
}

fn process_task(task: &FileTask, cfg: &TagfetchConfig, dest_root: &Path) -> Outcome {
    let Some(url) = task.url.as_deref() else {
        eprintln!("Skipping {}: no URL found", task.file_name);
        return Outcome::SkippedNoUrl;
    };

    match process_file(task, url, cfg, dest_root) {
        Ok(()) => Outcome::Processed,
        Err(err) => {
            eprintln!("Error processing {}: {err}", task.file_name);
            tracing::warn!(file = %task.file_name, error = %err, "pipeline failed");
            Outcome::Error
        }
    }
}

/// One file's pipeline: fetch, extract, merge, write-back, organize. Fails
/// atomically with respect to the move; the move is the last step.
fn process_file(
    task: &FileTask,
    url: &str,
    cfg: &TagfetchConfig,
    dest_root: &Path,
) -> Result<(), PipelineError> {
    tracing::debug!(file = %task.file_name, url, "fetching source page");
    let body = fetch::fetch_page(url, &cfg.user_agent)?;
    let html = Html::parse_document(&body);
    let extraction = extract::extract(&html, &cfg.selectors)?;

    let stem = Path::new(&task.file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(&task.file_name);

    let mut record = MetadataRecord::load(&task.path);
    let changed = tags::merge(&mut record, &extraction, &cfg.selectors, stem);

    if changed.is_empty() {
        tracing::debug!(file = %task.file_name, "no new fields; skipping tag write");
    } else {
        record.save(&task.path)?;
        println!("Updated tags for {}:", task.file_name);
        for field in &changed {
            if let Some(value) = record.get(*field) {
                println!("  {}: {}", field.name().to_uppercase(), value);
            }
        }
    }

    let album = record.album.as_deref().unwrap_or(tags::UNKNOWN_ALBUM);
    let dest = organize::place(&task.path, dest_root, album)?;
    println!("Moved {} to {}", task.file_name, dest.display());

    Ok(())
}
