pub mod shader;
pub mod shape;
pub mod system;
pub mod texture;
pub mod uniforms;

use glium::{DrawError, SwapBuffersError};
use std::fmt;

/// Failure while producing a single frame. The loop logs it and carries on.
#[derive(Debug)]
pub enum FrameError {
    Draw(DrawError),
    Swap(SwapBuffersError),
}

impl From<DrawError> for FrameError {
    fn from(err: DrawError) -> Self {
        FrameError::Draw(err)
    }
}

impl From<SwapBuffersError> for FrameError {
    fn from(err: SwapBuffersError) -> Self {
        FrameError::Swap(err)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Draw(err) => write!(f, "draw failed: {}", err),
            FrameError::Swap(err) => write!(f, "swap failed: {:?}", err),
        }
    }
}

impl std::error::Error for FrameError {}
