use rayon::prelude::*;

use crate::{
    foundation::error::{GradientError, GradientResult},
    render::buffer::PixelBuffer,
    synth::{field::GradientField, noise::Grain},
};

/// Row partitioning for the raster renderer.
#[derive(Clone, Debug)]
pub struct RasterOpts {
    /// Split rows across rayon workers.
    pub parallel: bool,
    /// Dedicated pool size. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Rows handed to a worker at a time.
    pub rows_per_chunk: usize,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            rows_per_chunk: 64,
        }
    }
}

impl RasterOpts {
    /// Single-threaded rendering.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Reject zero-sized chunks and pools.
    pub fn validate(&self) -> GradientResult<()> {
        if self.rows_per_chunk == 0 {
            return Err(GradientError::invalid_target("rows_per_chunk must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(GradientError::invalid_target(
                "threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Fill a fresh opaque buffer from `field`, then apply `grain` if present.
///
/// Workers own disjoint row ranges of the output; nothing else is shared.
#[tracing::instrument(skip(field, grain, opts))]
pub fn rasterize(
    field: &GradientField,
    grain: Option<&Grain>,
    width: u32,
    height: u32,
    opts: &RasterOpts,
) -> GradientResult<PixelBuffer> {
    opts.validate()?;
    let mut buf = PixelBuffer::opaque(width, height)?;
    let stride = buf.stride();
    let chunk_bytes = stride
        .checked_mul(opts.rows_per_chunk)
        .ok_or_else(|| GradientError::invalid_target("row chunk size overflow"))?;

    let fill = |(chunk_i, rows): (usize, &mut [u8])| {
        let first_row = chunk_i * opts.rows_per_chunk;
        for (dy, row) in rows.chunks_exact_mut(stride).enumerate() {
            fill_row(field, grain, (first_row + dy) as u32, row);
        }
    };

    match (opts.parallel, opts.threads) {
        (false, _) => buf.data.chunks_mut(chunk_bytes).enumerate().for_each(fill),
        (true, None) => buf.data.par_chunks_mut(chunk_bytes).enumerate().for_each(fill),
        (true, Some(n)) => {
            let pool = build_thread_pool(n)?;
            pool.install(|| buf.data.par_chunks_mut(chunk_bytes).enumerate().for_each(fill));
        }
    }
    tracing::debug!(width, height, "rasterized gradient");
    Ok(buf)
}

fn fill_row(field: &GradientField, grain: Option<&Grain>, y: u32, row: &mut [u8]) {
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let x = x as u32;
        px.copy_from_slice(&field.color_at(x, y).to_rgba8());
        if let Some(g) = grain {
            g.apply(px, x, y);
        }
    }
}

fn build_thread_pool(threads: usize) -> GradientResult<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| GradientError::Other(anyhow::anyhow!("build raster thread pool: {e}")))
}
