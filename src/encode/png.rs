use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// File name used for frame `idx` inside a PNG sequence directory.
pub fn frame_file_name(idx: FrameIndex) -> String {
    format!("frame_{:06}.png", idx.0)
}

/// Sink writing one straight-alpha RGBA PNG per frame into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    overwrite: bool,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Write frames into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of frames written since the last `begin`.
    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation("png sink width/height must be non-zero"));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ReelError::encode(format!(
                "failed to create png output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::encode("png sink received out-of-order frame index"));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last_idx = Some(idx);

        let path = self.dir.join(frame_file_name(idx));
        write_png(&path, frame, self.overwrite)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.cfg.take().is_none() {
            return Err(ReelError::encode("png sink not started"));
        }
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

/// Write a single frame as an RGBA PNG, converting premultiplied data to straight alpha.
pub fn write_png(path: &Path, frame: &FrameRGBA, overwrite: bool) -> ReelResult<()> {
    if !overwrite && path.exists() {
        return Err(ReelError::validation(format!(
            "output file '{}' already exists",
            path.display()
        )));
    }
    ensure_parent_dir(path)?;

    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, data)
        .ok_or_else(|| ReelError::encode("frame.data size mismatch with width*height*4"))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ReelError::encode(format!("failed to write '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
