//! Data-parallel maps over caller-owned buffers.
//!
//! Every op in this crate is a per-element (or per-column) map. Buffers at
//! or above [`ParallelConfig::parallel_threshold`] elements are split across
//! the rayon pool; smaller ones run inline on the calling thread. Results are
//! identical either way since no element depends on another.
//!
//! # Environment
//!
//! - `ML_PRIMS_PARALLEL_THRESHOLD`: minimum element count for rayon dispatch
//! - `ML_PRIMS_MIN_CHUNK`: minimum elements handed to a single rayon task

use std::sync::OnceLock;

use rayon::prelude::*;

pub const PARALLEL_THRESHOLD_ENV: &str = "ML_PRIMS_PARALLEL_THRESHOLD";
pub const MIN_CHUNK_ENV: &str = "ML_PRIMS_MIN_CHUNK";

pub const DEFAULT_PARALLEL_THRESHOLD: usize = 32 * 1024;
pub const DEFAULT_MIN_CHUNK_LEN: usize = 4 * 1024;

/// Process-wide dispatch settings, read once from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Buffers with fewer elements run sequentially.
    pub parallel_threshold: usize,
    /// Lower bound on the elements processed by one rayon task.
    pub min_chunk_len: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
        }
    }
}

static CONFIG: OnceLock<ParallelConfig> = OnceLock::new();

impl ParallelConfig {
    /// Build a config from `ML_PRIMS_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            parallel_threshold: Self::from_env_value(
                PARALLEL_THRESHOLD_ENV,
                std::env::var(PARALLEL_THRESHOLD_ENV).ok().as_deref(),
                DEFAULT_PARALLEL_THRESHOLD,
            ),
            min_chunk_len: Self::from_env_value(
                MIN_CHUNK_ENV,
                std::env::var(MIN_CHUNK_ENV).ok().as_deref(),
                DEFAULT_MIN_CHUNK_LEN,
            )
            .max(1),
        }
    }

    /// Parse one variable; unset falls back silently, garbage falls back with a warning.
    pub fn from_env_value(name: &str, value: Option<&str>, default: usize) -> usize {
        match value.map(str::trim) {
            None | Some("") => default,
            Some(raw) => match raw.parse::<usize>() {
                Ok(v) => v,
                Err(err) => {
                    log::warn!("ignoring {name}={raw:?} ({err}), using default {default}");
                    default
                }
            },
        }
    }

    /// The config used by all ops, initialized on first use.
    pub fn global() -> &'static ParallelConfig {
        CONFIG.get_or_init(|| {
            let config = Self::from_env();
            log::debug!(
                "ml-prims dispatch: parallel_threshold={} min_chunk_len={} threads={}",
                config.parallel_threshold,
                config.min_chunk_len,
                rayon::current_num_threads()
            );
            config
        })
    }

    #[inline]
    pub fn use_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold && rayon::current_num_threads() > 1
    }
}

/// `data[i] = f(data[i])` for every element.
#[inline]
pub(crate) fn map_inplace<T, F>(data: &mut [T], f: F)
where
    T: Copy + Send + Sync,
    F: Fn(T) -> T + Sync + Send,
{
    let config = ParallelConfig::global();
    if config.use_parallel(data.len()) {
        log::trace!("map_inplace: rayon over {} elements", data.len());
        data.par_iter_mut()
            .with_min_len(config.min_chunk_len)
            .for_each(|x| *x = f(*x));
    } else {
        for x in data.iter_mut() {
            *x = f(*x);
        }
    }
}

/// `dst[i] = f(src[i])` for every element of the shorter of the two buffers.
#[inline]
pub(crate) fn map_into<T, F>(src: &[T], dst: &mut [T], f: F)
where
    T: Copy + Send + Sync,
    F: Fn(T) -> T + Sync + Send,
{
    let config = ParallelConfig::global();
    if config.use_parallel(dst.len()) {
        log::trace!("map_into: rayon over {} elements", dst.len());
        dst.par_iter_mut()
            .zip(src.par_iter())
            .with_min_len(config.min_chunk_len)
            .for_each(|(d, &s)| *d = f(s));
    } else {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = f(s);
        }
    }
}

/// Run `f(run_index, run)` over consecutive runs of `run_len` elements.
///
/// Used for per-row and per-column work; a trailing partial run is passed
/// through as-is.
#[inline]
pub(crate) fn for_each_run_mut<T, F>(data: &mut [T], run_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if run_len == 0 || data.is_empty() {
        return;
    }
    let config = ParallelConfig::global();
    let num_runs = data.len().div_ceil(run_len);
    if num_runs > 1 && config.use_parallel(data.len()) {
        let runs_per_task = (config.min_chunk_len / run_len).max(1);
        log::trace!(
            "for_each_run_mut: rayon over {} runs of {} ({} runs per task)",
            num_runs,
            run_len,
            runs_per_task
        );
        data.par_chunks_mut(run_len)
            .enumerate()
            .with_min_len(runs_per_task)
            .for_each(|(idx, run)| f(idx, run));
    } else {
        data.chunks_mut(run_len)
            .enumerate()
            .for_each(|(idx, run)| f(idx, run));
    }
}
