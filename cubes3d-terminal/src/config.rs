//! Command-line configuration
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use crate::error::AppError;

/// Pixel size of the published RGBA frame, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FromStr for FrameSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
        let height = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "cubes3d-terminal", about = "Four spinning cubes under an orbiting camera")]
pub struct Config {
    /// Target frames per second
    #[arg(long, default_value_t = 120)]
    pub fps: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    pub fov: f32,

    /// Near clip plane
    #[arg(long, default_value_t = 0.1)]
    pub near: f32,

    /// Far clip plane
    #[arg(long, default_value_t = 100.0)]
    pub far: f32,

    /// Base orbit distance of the camera
    #[arg(long, default_value_t = 3.0)]
    pub distance: f32,

    /// Start with an orthographic projection
    #[arg(long)]
    pub orthographic: bool,

    /// Size of the published RGBA frame
    #[arg(long, default_value = "800x600")]
    pub size: FrameSize,

    /// Overwrite this file with every frame's raw RGBA bytes
    #[arg(long)]
    pub frame_dump: Option<PathBuf>,

    /// Write logs here instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Render without a terminal
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 120,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            distance: 3.0,
            orthographic: false,
            size: FrameSize {
                width: 800,
                height: 600,
            },
            frame_dump: None,
            log_file: None,
            headless: false,
            frames: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.fps == 0 {
            return Err(AppError::InvalidConfig("fps must be positive".into()));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(AppError::InvalidConfig(format!(
                "fov must be in (0, 180) degrees, got {}",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(AppError::InvalidConfig(format!(
                "need 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(self.distance > 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "distance must be positive, got {}",
                self.distance
            )));
        }
        if self.size.width == 0 || self.size.height == 0 {
            return Err(AppError::InvalidConfig(format!("empty frame size {}", self.size)));
        }
        Ok(())
    }
}
