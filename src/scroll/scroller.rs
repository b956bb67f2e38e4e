use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::raster::VectorRasterizer;
use crate::scroll::cache::FrameCache;
use crate::scroll::config::{CacheMode, ScrollConfig};
use crate::scroll::export::export_area;
use crate::scroll::sequence::FrameSequence;

/// Where a [`Scroller`] is in its render run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Configured,
    Validating,
    Caching,
    Exporting,
    Done,
    Failed,
}

/// Run-time knobs that do not change the output.
#[derive(Clone, Debug, Default)]
pub struct RenderOpts {
    /// Export frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of worker threads. `None` uses rayon defaults (one per core).
    pub threads: Option<usize>,
}

/// Summary of a finished render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    /// Number of frames written (`000000.png` .. `frames-1`).
    pub frames: u64,
    pub drawing_height_px: f64,
    pub advance_px: f64,
    pub cache: CacheMode,
    pub outdir: PathBuf,
}

/// Renders the frames of one scroll into an output directory.
pub struct Scroller<'r> {
    config: ScrollConfig,
    rasterizer: &'r dyn VectorRasterizer,
    opts: RenderOpts,
    state: RenderState,
}

impl<'r> Scroller<'r> {
    pub fn new(config: ScrollConfig, rasterizer: &'r dyn VectorRasterizer) -> Self {
        Self::with_opts(config, rasterizer, RenderOpts::default())
    }

    pub fn with_opts(
        config: ScrollConfig,
        rasterizer: &'r dyn VectorRasterizer,
        opts: RenderOpts,
    ) -> Self {
        Self {
            config,
            rasterizer,
            opts,
            state: RenderState::Configured,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Measure the drawing and build its frame sequence.
    pub fn sequence(&self) -> ScrollResult<FrameSequence> {
        let height = self.rasterizer.drawing_height(self.config.svg())?;
        FrameSequence::new(self.config.viewport(), height, self.config.advance_px())
    }

    /// Render every frame. Any failure aborts the remaining frames.
    #[tracing::instrument(
        skip_all,
        fields(svg = %self.config.svg().display(), cache = %self.config.cache())
    )]
    pub fn render(&mut self) -> ScrollResult<RenderReport> {
        match self.render_inner() {
            Ok(report) => {
                self.transition(RenderState::Done);
                Ok(report)
            }
            Err(e) => {
                self.transition(RenderState::Failed);
                tracing::error!(error = %e, "render failed");
                Err(e)
            }
        }
    }

    fn render_inner(&mut self) -> ScrollResult<RenderReport> {
        self.transition(RenderState::Validating);
        let svg = self.config.svg();
        if !svg.exists() {
            return Err(ScrollError::SourceNotFound(svg.to_path_buf()));
        }
        let outdir = self.config.outdir();
        std::fs::create_dir_all(outdir)
            .with_context(|| format!("create output dir '{}'", outdir.display()))?;
        let seq = self.sequence()?;

        if self.config.cache() != CacheMode::None {
            self.transition(RenderState::Caching);
        }
        // Released at the end of this call, on success or failure.
        let cache = FrameCache::build(
            self.config.cache(),
            self.config.svg(),
            &seq.cover_rect()?,
            self.rasterizer,
        )?;

        self.transition(RenderState::Exporting);
        tracing::debug!(
            source = cache.source().kind(),
            frames = seq.estimated_frame_count(),
            advance_px = seq.advance_px(),
            "exporting frames"
        );
        if self.opts.parallel {
            self.export_parallel(&seq, &cache)?;
        } else {
            self.export_sequential(&seq, &cache)?;
        }

        Ok(RenderReport {
            frames: seq.estimated_frame_count(),
            drawing_height_px: seq.drawing_height_px(),
            advance_px: seq.advance_px(),
            cache: cache.mode(),
            outdir: self.config.outdir().to_path_buf(),
        })
    }

    fn export_sequential(&self, seq: &FrameSequence, cache: &FrameCache) -> ScrollResult<()> {
        let total = seq.estimated_frame_count();
        for (frame, rect) in seq.iter() {
            tracing::info!("Rendering frame {}/{}", frame.0 + 1, total);
            export_area(
                &rect,
                cache.source(),
                &self.config.frame_path(frame),
                self.rasterizer,
            )?;
        }
        Ok(())
    }

    fn export_parallel(&self, seq: &FrameSequence, cache: &FrameCache) -> ScrollResult<()> {
        let pool = build_thread_pool(self.opts.threads)?;
        let total = seq.estimated_frame_count();
        let done = AtomicU64::new(0);
        tracing::debug!(threads = pool.current_num_threads(), "exporting in parallel");

        pool.install(|| {
            (0..total).into_par_iter().try_for_each(|f| {
                let frame = FrameIndex(f);
                let rect = seq.frame_rect(frame)?;
                export_area(
                    &rect,
                    cache.source(),
                    &self.config.frame_path(frame),
                    self.rasterizer,
                )?;
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::info!("Rendering frame {n}/{total}");
                Ok(())
            })
        })
    }

    fn transition(&mut self, next: RenderState) {
        tracing::debug!(from = ?self.state, to = ?next, "render state");
        self.state = next;
    }
}

fn build_thread_pool(threads: Option<usize>) -> ScrollResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ScrollError::invalid_config(
            "'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrollError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scroller.rs"]
mod tests;
