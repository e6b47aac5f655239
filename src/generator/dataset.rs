use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::foundation::error::{ChromergeError, ChromergeResult};
use crate::generator::task_gen::{TaskGenerator, TaskPair};
use crate::task::record::TaskRecord;

pub const FIRST_FRAME_FILE: &str = "first_frame.png";
pub const FINAL_FRAME_FILE: &str = "final_frame.png";
pub const PROMPT_FILE: &str = "prompt.txt";
pub const RUBRIC_FILE: &str = "rubric.txt";
pub const METADATA_FILE: &str = "metadata.json";
pub const VIDEO_FILE: &str = "ground_truth.mp4";

/// Options for [`generate_dataset`].
#[derive(Clone, Debug)]
pub struct DatasetOpts {
    /// Root directory; bundles land in `<out_dir>/<domain>_task/<task_id>/`.
    pub out_dir: PathBuf,
    /// Number of tasks to generate.
    pub num_samples: usize,
    /// Base seed. Task `i` uses its own stream derived from `(seed, i)`.
    pub seed: u64,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Counts reported after a dataset run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub tasks_dir: PathBuf,
    pub written: usize,
    pub videos: usize,
    pub fallbacks: usize,
}

#[derive(Serialize)]
struct BundleMetadata<'a> {
    task_id: &'a str,
    domain: &'a str,
    has_video: bool,
    task: &'a TaskRecord,
}

/// Seed for task `index` of a run seeded with `base`.
///
/// splitmix64 over `base + index`, so neighbouring tasks get unrelated streams.
pub fn task_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Task id for task `index` of `domain`.
pub fn task_id(domain: &str, index: usize) -> String {
    format!("{domain}_{index:04}")
}

/// Directory holding every bundle of `domain` under `out_dir`.
pub fn tasks_dir(out_dir: &Path, domain: &str) -> PathBuf {
    out_dir.join(format!("{domain}_task"))
}

/// Write one bundle to `<out_dir>/<domain>_task/<task_id>/` and return that directory.
///
/// Existing files are overwritten. When the pair carries a video it is copied in as
/// `ground_truth.mp4`.
pub fn write_task_pair(pair: &TaskPair, out_dir: &Path) -> ChromergeResult<PathBuf> {
    let dir = tasks_dir(out_dir, &pair.domain).join(&pair.task_id);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create bundle dir '{}'", dir.display()))?;

    pair.first_image.save_png(&dir.join(FIRST_FRAME_FILE))?;
    pair.final_image.save_png(&dir.join(FINAL_FRAME_FILE))?;
    write_text(&dir.join(PROMPT_FILE), &pair.prompt)?;
    write_text(&dir.join(RUBRIC_FILE), &pair.rubric)?;

    let mut has_video = false;
    if let Some(video) = pair.ground_truth_video.as_deref() {
        let dst = dir.join(VIDEO_FILE);
        std::fs::copy(video, &dst)
            .with_context(|| format!("copy video '{}' -> '{}'", video.display(), dst.display()))?;
        has_video = true;
    }

    let meta = BundleMetadata {
        task_id: &pair.task_id,
        domain: &pair.domain,
        has_video,
        task: &pair.task,
    };
    let meta_path = dir.join(METADATA_FILE);
    let f = File::create(&meta_path)
        .with_context(|| format!("create metadata '{}'", meta_path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &meta)
        .map_err(|e| ChromergeError::serde(format!("write metadata: {e}")))?;
    w.flush()
        .with_context(|| format!("flush metadata '{}'", meta_path.display()))?;

    Ok(dir)
}

fn write_text(path: &Path, text: &str) -> ChromergeResult<()> {
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

/// Generate and write `opts.num_samples` bundles in parallel.
///
/// Each task seeds its own `StdRng` from [`task_seed`], so a run is reproducible for a given
/// base seed whatever the thread count.
#[tracing::instrument(skip(generator), fields(domain = %generator.config().domain))]
pub fn generate_dataset(
    generator: &TaskGenerator,
    opts: &DatasetOpts,
) -> ChromergeResult<DatasetSummary> {
    let pool = build_thread_pool(opts.threads)?;
    let domain = generator.config().domain.as_str();

    let outcomes = pool.install(|| {
        (0..opts.num_samples)
            .into_par_iter()
            .map(|i| -> ChromergeResult<(bool, bool)> {
                let id = task_id(domain, i);
                let mut rng = StdRng::seed_from_u64(task_seed(opts.seed, i as u64));
                let pair = generator.generate_task_pair(&id, &mut rng)?;
                write_task_pair(&pair, &opts.out_dir)?;
                Ok((pair.ground_truth_video.is_some(), pair.task.used_fallback))
            })
            .collect::<ChromergeResult<Vec<_>>>()
    })?;

    let summary = DatasetSummary {
        tasks_dir: tasks_dir(&opts.out_dir, domain),
        written: outcomes.len(),
        videos: outcomes.iter().filter(|(video, _)| *video).count(),
        fallbacks: outcomes.iter().filter(|(_, fallback)| *fallback).count(),
    };
    tracing::info!(
        written = summary.written,
        videos = summary.videos,
        fallbacks = summary.fallbacks,
        "dataset generated"
    );
    Ok(summary)
}

fn build_thread_pool(threads: Option<usize>) -> ChromergeResult<rayon::ThreadPool> {
    if let Some(0) = threads {
        return Err(ChromergeError::validation("threads must be >= 1"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ChromergeError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/generator/dataset.rs"]
mod tests;
