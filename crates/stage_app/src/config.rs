//! Frame loop configuration.

/// Configuration for the frame loop.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Target frames per second.
    pub frame_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 0,
        }
    }
}
