//! Full-image traversal driver.
//!
//! [`run`] walks every pixel of a source raster, applies one [`Filter`],
//! and fills a freshly allocated output raster of identical dimensions.
//! Progress is reported and cancellation polled once per image column, so
//! both stay responsive when the caller drives the engine from a worker
//! thread. [`run_parallel`] is the rayon row-parallel variant of the same
//! contract.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use rastermill_image::{Raster, Rgb8};

use crate::filter::Filter;

/// Receives traversal progress as an integer percentage in `[0, 100]`.
///
/// Reports must be cheap and non-blocking; they may arrive from whatever
/// thread executes the traversal, so implementations use interior
/// mutability where they accumulate state.
pub trait ProgressSink: Sync {
    /// Record that `percent` of the traversal is complete.
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// A polled probe for cooperative cancellation.
///
/// The engine checks the probe at a fixed granularity (per column, or per
/// row in the parallel path); up to one column or row of pixel work may
/// complete after a cancel request before it is observed.
pub trait CancelProbe: Sync {
    /// Whether the caller has requested an abort.
    fn is_cancelled(&self) -> bool;
}

impl<F> CancelProbe for F
where
    F: Fn() -> bool + Sync,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A shareable cancellation flag.
///
/// Clone the token into whatever thread owns the abort decision and pass
/// the original to the engine as its [`CancelProbe`].
///
/// # Examples
///
/// ```
/// use rastermill_filters::engine::{CancelProbe, CancelToken};
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the traversal's next poll.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl CancelProbe for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Signal that a run was aborted through its [`CancelProbe`].
///
/// Cancellation is a normal outcome of a user-requested abort, not a
/// failure; all partial work is discarded and the caller's previous image
/// state remains valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "filter run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Apply `filter` to every pixel of `src`, producing a new raster of the
/// same dimensions.
///
/// Columns are traversed in the outer loop and rows in the inner loop.
/// Before each column the sink receives `floor((column / width) * 100)`
/// and the cancel probe is polled; a final 100 is reported after the last
/// column. The source raster is never mutated.
///
/// # Errors
///
/// Returns [`Cancelled`] when the probe reports an abort; no partial
/// raster escapes.
///
/// # Examples
///
/// ```
/// use rastermill_filters::engine;
/// use rastermill_filters::filter::FilterKind;
/// use rastermill_image::{Raster, Rgb8};
///
/// let src = Raster::from_size_val([2, 2].into(), Rgb8::new(255, 0, 0));
/// let filter = FilterKind::Invert.build().unwrap();
///
/// let result = engine::run(&src, filter.as_ref(), &|_pct: u8| {}, &|| false).unwrap();
/// assert_eq!(result.pixel(0, 0), Rgb8::new(0, 255, 255));
/// ```
pub fn run<P, C>(
    src: &Raster,
    filter: &dyn Filter,
    progress: &P,
    cancel: &C,
) -> Result<Raster, Cancelled>
where
    P: ProgressSink,
    C: CancelProbe,
{
    let size = src.size();
    log::debug!("filter run over {}x{} raster", size.width, size.height);

    let mut out = Raster::from_size_val(size, Rgb8::default());
    let data = out.as_slice_mut();

    for x in 0..size.width {
        progress.report((x as f32 / size.width as f32 * 100.0).floor() as u8);
        if cancel.is_cancelled() {
            log::debug!("filter run cancelled at column {x}");
            return Err(Cancelled);
        }
        for y in 0..size.height {
            data[y * size.width + x] = filter.color_at(src, x, y);
        }
    }
    progress.report(100);

    Ok(out)
}

/// Row-parallel variant of [`run`] built on the rayon thread pool.
///
/// Output rows are computed independently; every row reads only the
/// immutable source, so no synchronization is needed for the pixel work.
/// Cancellation is polled once per row. Progress is reported at row
/// granularity through an atomic high-water mark: every reported value
/// exceeds all values recorded before it, and duplicates are dropped.
///
/// # Errors
///
/// Returns [`Cancelled`] when the probe reports an abort; all partial
/// work is discarded.
pub fn run_parallel<P, C>(
    src: &Raster,
    filter: &dyn Filter,
    progress: &P,
    cancel: &C,
) -> Result<Raster, Cancelled>
where
    P: ProgressSink,
    C: CancelProbe,
{
    let size = src.size();
    log::debug!(
        "parallel filter run over {}x{} raster",
        size.width,
        size.height
    );

    if cancel.is_cancelled() {
        return Err(Cancelled);
    }

    let mut out = Raster::from_size_val(size, Rgb8::default());
    let rows_done = AtomicUsize::new(0);
    let high_water = AtomicU8::new(0);

    out.as_slice_mut()
        .par_chunks_exact_mut(size.width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            if cancel.is_cancelled() {
                return;
            }
            for (x, px) in row.iter_mut().enumerate() {
                *px = filter.color_at(src, x, y);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            let percent = (done as f32 / size.height as f32 * 100.0).floor() as u8;
            let seen = high_water.fetch_max(percent, Ordering::Relaxed);
            if percent > seen {
                progress.report(percent);
            }
        });

    if cancel.is_cancelled() {
        log::debug!("parallel filter run cancelled");
        return Err(Cancelled);
    }

    Ok(out)
}
