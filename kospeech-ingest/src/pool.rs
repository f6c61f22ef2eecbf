//! Chunked fan-out over independent items.
//!
//! One generic helper serves both the metadata scanner and the manifest
//! builder: partition the input into contiguous chunks, run every chunk
//! concurrently with its own worker state, then merge single-threaded after
//! the join-all barrier. Tasks are side-effect-free and never depend on each
//! other, so no further synchronization exists.

use rayon::prelude::*;

/// Partition `items` into at most `parallelism` contiguous chunks.
///
/// Chunks get `len / parallelism` items each; the last chunk absorbs the
/// remainder.
pub fn partition<T>(items: &[T], parallelism: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }

    let workers = parallelism.clamp(1, items.len());
    let chunk_len = items.len() / workers;

    (0..workers)
        .map(|i| {
            let lo = i * chunk_len;
            let hi = if i == workers - 1 {
                items.len()
            } else {
                lo + chunk_len
            };
            &items[lo..hi]
        })
        .collect()
}

/// Map every item through `task`, fanning chunks out across the rayon pool.
///
/// `init` builds one worker state per chunk (this is where per-worker
/// normalizers come from). `task` may drop an item (`Ok(None)`) or abort the
/// whole run (`Err`). With `parallelism <= 1` the input is processed
/// synchronously without partitioning.
pub fn chunked_try_map<T, S, R, E, Init, Task>(
    items: &[T],
    parallelism: usize,
    init: Init,
    task: Task,
) -> Result<Vec<R>, E>
where
    T: Sync,
    S: Send,
    R: Send,
    E: Send,
    Init: Fn() -> S + Sync,
    Task: Fn(&mut S, &T) -> Result<Option<R>, E> + Sync,
{
    let run_chunk = |chunk: &[T]| -> Result<Vec<R>, E> {
        let mut state = init();
        let mut local = Vec::with_capacity(chunk.len());
        for item in chunk {
            if let Some(result) = task(&mut state, item)? {
                local.push(result);
            }
        }
        Ok(local)
    };

    if parallelism <= 1 {
        return run_chunk(items);
    }

    let partials: Vec<Result<Vec<R>, E>> = partition(items, parallelism)
        .into_par_iter()
        .map(run_chunk)
        .collect();

    let mut merged = Vec::with_capacity(items.len());
    for partial in partials {
        merged.extend(partial?);
    }
    Ok(merged)
}
