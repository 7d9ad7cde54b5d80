//! Row-parallel iteration over pixel buffers.
//!
//! With the `parallel` feature (default) rows are distributed over the
//! rayon pool; without it the same closures run sequentially. Closures see
//! one row at a time and never another row's bytes, so results are
//! identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for each `stride`-byte row of `data`.
pub(crate) fn for_each_row<F>(data: &mut [u8], stride: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if stride == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(stride).enumerate().for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(stride).enumerate().for_each(|(y, row)| f(y, row));
}

/// Calls `f(px)` for each `bpp`-byte pixel of `data`, one row per task.
pub(crate) fn for_each_pixel<F>(data: &mut [u8], width: usize, bpp: usize, f: F)
where
    F: Fn(&mut [u8]) + Send + Sync,
{
    for_each_row(data, width * bpp, |_, row| {
        row.chunks_exact_mut(bpp).for_each(&f);
    });
}
