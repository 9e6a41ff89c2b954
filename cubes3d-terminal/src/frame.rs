//! RGBA frames and the sinks they are published to
//!
//! A sink stands in for the shared-memory region an external viewer reads:
//! it receives one fixed-size RGBA buffer per rendered frame.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::error::AppError;

pub const BYTES_PER_PIXEL: usize = 4;

/// A tightly packed, row-major RGBA8 image, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; Self::byte_len(width, height)],
        }
    }

    pub fn byte_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * BYTES_PER_PIXEL
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    pub fn fill(&mut self, color: [u8; 4]) {
        for pixel in self.rgba.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let i = self.offset(x, y);
        self.rgba[i..i + BYTES_PER_PIXEL].copy_from_slice(&color);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

/// Destination for rendered frames.
pub trait FrameSink {
    fn publish(&mut self, frame: &Frame) -> Result<(), AppError>;
}

fn check_size(expected: usize, frame: &Frame) -> Result<(), AppError> {
    let actual = frame.as_bytes().len();
    if actual != expected {
        return Err(AppError::FrameSize { expected, actual });
    }
    Ok(())
}

/// In-process latest-frame slot; readers always see the most recent publish.
pub struct SharedFrame {
    expected_len: usize,
    slot: Arc<Mutex<Option<Frame>>>,
}

/// Read side of a [`SharedFrame`], safe to move to another thread.
#[derive(Clone)]
pub struct FrameReader {
    slot: Arc<Mutex<Option<Frame>>>,
}

impl SharedFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            expected_len: Frame::byte_len(width, height),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn reader(&self) -> FrameReader {
        FrameReader {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl FrameSink for SharedFrame {
    fn publish(&mut self, frame: &Frame) -> Result<(), AppError> {
        check_size(self.expected_len, frame)?;
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(existing) => existing.rgba.copy_from_slice(&frame.rgba),
            None => *slot = Some(frame.clone()),
        }
        Ok(())
    }
}

impl FrameReader {
    /// Copy of the last published frame, if any.
    pub fn latest(&self) -> Option<Frame> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Overwrites a file with each frame's raw bytes, the on-disk version of a
/// mapped region.
pub struct RawFileSink {
    path: PathBuf,
    expected_len: usize,
}

impl RawFileSink {
    pub fn new(path: impl AsRef<Path>, width: u32, height: u32) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            expected_len: Frame::byte_len(width, height),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for RawFileSink {
    fn publish(&mut self, frame: &Frame) -> Result<(), AppError> {
        check_size(self.expected_len, frame)?;
        let mut file = File::create(&self.path)?;
        file.write_all(frame.as_bytes())?;
        trace!(path = %self.path.display(), bytes = self.expected_len, "frame written");
        Ok(())
    }
}
