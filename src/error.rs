use crate::geometry::GeometryError;

/// Failures reported by the frame pool, the registry and the views.
///
/// None of these are fatal: the shell prints them and returns to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    InvalidGeometry(#[from] GeometryError),
    #[error("Process ID {0} is already in use")]
    DuplicateProcessId(i32),
    #[error("Insufficient physical memory: {requested} frames requested, {available} free")]
    InsufficientPhysicalMemory { requested: usize, available: usize },
    #[error("Process with ID {0} not found")]
    ProcessNotFound(i32),
    #[error("No processes available to display")]
    NoProcesses,
    #[error("Cannot write {len} bytes to frame {frame}")]
    PageWriteOutOfBounds { frame: usize, len: usize },
}
