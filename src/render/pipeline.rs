use std::collections::HashMap;

use rayon::prelude::*;

use crate::composition::registry::RenderTarget;
use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, Renderer};
use crate::render::cpu::{CpuRenderer, CpuRendererOptions};
use crate::view::VisualDescription;

/// Evaluate and render a single frame of `target`.
///
/// Frames past the target's duration are still evaluated. Returns **premultiplied** RGBA8.
#[tracing::instrument(level = "debug", skip(target, renderer), fields(target = %target.id))]
pub fn render_frame(
    target: &RenderTarget,
    frame: FrameIndex,
    renderer: &mut dyn Renderer,
) -> ReelResult<FrameRGBA> {
    target.params.validate()?;
    let desc = target.evaluate(frame);
    renderer.render(&desc, target.canvas)
}

/// Render a range of frames (inclusive start, exclusive end) into memory.
pub fn render_frames(
    target: &RenderTarget,
    range: FrameRange,
    renderer: &mut dyn Renderer,
) -> ReelResult<Vec<FrameRGBA>> {
    render_frames_with_stats(target, range, renderer, &RenderThreading::default())
        .map(|(frames, _)| frames)
}

/// Threading and chunking controls for multi-frame rendering.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Render each distinct visual description once per chunk and reuse the pixels.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames that were actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

impl RenderStats {
    fn add(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Render a frame range and return both frame data and rendering stats.
pub fn render_frames_with_stats(
    target: &RenderTarget,
    range: FrameRange,
    renderer: &mut dyn Renderer,
    threading: &RenderThreading,
) -> ReelResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut sink = InMemorySink::new();
    let stats = render_range(target, range, renderer, threading, &mut sink)?;
    let frames = sink.into_frames().into_iter().map(|(_, f)| f).collect();
    Ok((frames, stats))
}

/// Render `range` of `target` and stream the frames to `sink` in timeline order.
///
/// The range must be non-empty and lie within `[0, duration_in_frames)`. Parallel rendering
/// builds one [`CpuRenderer`] per worker from [`Renderer::worker_options`].
#[tracing::instrument(
    level = "info",
    skip(target, renderer, threading, sink),
    fields(target = %target.id, start = range.start.0, end = range.end.0, parallel = threading.parallel)
)]
pub fn render_range(
    target: &RenderTarget,
    range: FrameRange,
    renderer: &mut dyn Renderer,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> ReelResult<RenderStats> {
    if range.is_empty() {
        return Err(ReelError::validation("render range must be non-empty"));
    }
    if range.end.0 > target.duration_in_frames {
        return Err(ReelError::validation(format!(
            "render range end {} exceeds composition duration {}",
            range.end.0, target.duration_in_frames
        )));
    }
    target.params.validate()?;

    let mut workers = None;
    if threading.parallel {
        let opts = renderer.worker_options().ok_or_else(|| {
            ReelError::render("parallel render requires renderer worker options (CpuRenderer)")
        })?;
        workers = Some((opts, build_thread_pool(threading.threads)?));
    }

    sink.begin(SinkConfig {
        width: target.canvas.width,
        height: target.canvas.height,
        fps: target.fps,
    })?;

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut stats = RenderStats::default();
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| ReelError::render(format!("invalid chunk range: {e}")))?;

        let chunk_out = render_chunk(target, chunk, renderer, threading, workers.as_ref())?;
        for (offset, &u) in chunk_out.frame_to_unique.iter().enumerate() {
            let frame = chunk_out.unique_frames.get(u).ok_or_else(|| {
                ReelError::render("internal error: unique frame index out of range")
            })?;
            sink.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
        }

        stats.add(chunk_out.stats);
        tracing::debug!(
            chunk_start,
            chunk_end,
            rendered = chunk_out.stats.frames_rendered,
            elided = chunk_out.stats.frames_elided,
            "chunk done"
        );
        chunk_start = chunk_end;
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render complete"
    );
    Ok(stats)
}

struct ChunkOut {
    unique_frames: Vec<FrameRGBA>,
    frame_to_unique: Vec<usize>,
    stats: RenderStats,
}

fn render_chunk(
    target: &RenderTarget,
    range: FrameRange,
    renderer: &mut dyn Renderer,
    threading: &RenderThreading,
    workers: Option<&(CpuRendererOptions, rayon::ThreadPool)>,
) -> ReelResult<ChunkOut> {
    let descs = (range.start.0..range.end.0)
        .map(|f| target.evaluate(FrameIndex(f)))
        .collect::<Vec<_>>();
    let (unique_indices, frame_to_unique) = dedupe(&descs, threading.static_frame_elision)?;

    let unique_frames = match workers {
        Some((opts, pool)) => {
            let rendered = pool.install(|| {
                unique_indices
                    .par_iter()
                    .map_init(
                        || CpuRenderer::new(opts.clone()),
                        |worker, &i| worker.render(&descs[i], target.canvas),
                    )
                    .collect::<Vec<_>>()
            });
            rendered.into_iter().collect::<ReelResult<Vec<_>>>()?
        }
        None => unique_indices
            .iter()
            .map(|&i| renderer.render(&descs[i], target.canvas))
            .collect::<ReelResult<Vec<_>>>()?,
    };

    let total = descs.len() as u64;
    let rendered = unique_frames.len() as u64;
    Ok(ChunkOut {
        unique_frames,
        frame_to_unique,
        stats: RenderStats {
            frames_total: total,
            frames_rendered: rendered,
            frames_elided: total.saturating_sub(rendered),
        },
    })
}

/// Map each frame to the first frame in the chunk with an identical description.
fn dedupe(
    descs: &[VisualDescription],
    elide: bool,
) -> ReelResult<(Vec<usize>, Vec<usize>)> {
    let mut unique_indices = Vec::<usize>::with_capacity(descs.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(descs.len());
    if !elide {
        for idx in 0..descs.len() {
            unique_indices.push(idx);
            frame_to_unique.push(idx);
        }
        return Ok((unique_indices, frame_to_unique));
    }

    let mut first = HashMap::<String, usize>::new();
    for (idx, desc) in descs.iter().enumerate() {
        let fingerprint = serde_json::to_string(desc)
            .map_err(|e| ReelError::serde(format!("fingerprint visual description: {e}")))?;
        if let Some(&slot) = first.get(&fingerprint) {
            frame_to_unique.push(slot);
        } else {
            let slot = unique_indices.len();
            unique_indices.push(idx);
            first.insert(fingerprint, slot);
            frame_to_unique.push(slot);
        }
    }
    Ok((unique_indices, frame_to_unique))
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
