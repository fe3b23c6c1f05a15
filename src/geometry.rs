//! Memory geometry validation.
//!
//! Every size the simulator accepts (physical memory, page/frame, maximum
//! process size, process size) is checked here before it reaches the frame
//! pool. A [`Geometry`] can only be built from values that pass all checks.

use crate::constants::MAX_SIZE_BYTES;

/// Why a candidate size was rejected.
///
/// The messages are the ones the shell prints after `Error: `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Size must be a power of 2.")]
    MemoryNotPowerOfTwo(i64),
    #[error("Page size must be a power of 2.")]
    PageNotPowerOfTwo(i64),
    #[error("Page size cannot exceed total memory size.")]
    PageExceedsMemory { page: usize, memory: usize },
    #[error("Maximum process size must be a power of 2.")]
    MaxProcessNotPowerOfTwo(i64),
    #[error("Maximum process size cannot exceed total memory size.")]
    MaxProcessExceedsMemory { max: usize, memory: usize },
    #[error("Process size must be a power of 2.")]
    ProcessNotPowerOfTwo(i64),
    #[error("Process size must be greater than zero.")]
    EmptyProcess,
    #[error("Process size exceeds the maximum allowed size of {max} bytes.")]
    ProcessExceedsMax { size: usize, max: usize },
    #[error("Size cannot exceed {} bytes.", MAX_SIZE_BYTES)]
    TooLarge(i64),
}

/// True iff `n` is positive and has exactly one bit set.
#[inline]
pub fn is_power_of_two(n: i64) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

fn power_of_two(value: i64, err: GeometryError) -> Result<usize, GeometryError> {
    if !is_power_of_two(value) {
        return Err(err);
    }
    if value > MAX_SIZE_BYTES {
        return Err(GeometryError::TooLarge(value));
    }
    usize::try_from(value).map_err(|_| err)
}

pub fn validate_memory_size(memory: i64) -> Result<usize, GeometryError> {
    power_of_two(memory, GeometryError::MemoryNotPowerOfTwo(memory))
}

pub fn validate_page_size(page: i64, memory: usize) -> Result<usize, GeometryError> {
    let page = power_of_two(page, GeometryError::PageNotPowerOfTwo(page))?;
    if page > memory {
        return Err(GeometryError::PageExceedsMemory { page, memory });
    }
    Ok(page)
}

pub fn validate_max_process_size(max: i64, memory: usize) -> Result<usize, GeometryError> {
    let max = power_of_two(max, GeometryError::MaxProcessNotPowerOfTwo(max))?;
    if max > memory {
        return Err(GeometryError::MaxProcessExceedsMemory { max, memory });
    }
    Ok(max)
}

/// Shell-side check for a new process: power of two and within `max`.
pub fn validate_process_size(size: i64, max: usize) -> Result<usize, GeometryError> {
    let size = power_of_two(size, GeometryError::ProcessNotPowerOfTwo(size))?;
    check_process_bounds(size, max)
}

/// Bounds every process size must satisfy, power of two or not.
pub fn check_process_bounds(size: usize, max: usize) -> Result<usize, GeometryError> {
    if size == 0 {
        return Err(GeometryError::EmptyProcess);
    }
    if size > max {
        return Err(GeometryError::ProcessExceedsMax { size, max });
    }
    Ok(size)
}

/// Validated memory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    memory_size: usize,
    page_size: usize,
    max_process_size: usize,
}

impl Geometry {
    pub fn new(memory: i64, page: i64, max_process: i64) -> Result<Self, GeometryError> {
        let memory_size = validate_memory_size(memory)?;
        let page_size = validate_page_size(page, memory_size)?;
        let max_process_size = validate_max_process_size(max_process, memory_size)?;
        Ok(Geometry {
            memory_size,
            page_size,
            max_process_size,
        })
    }

    #[inline]
    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn max_process_size(&self) -> usize {
        self.max_process_size
    }

    pub fn frame_count(&self) -> usize {
        self.memory_size / self.page_size
    }

    /// Number of pages needed to hold `size` bytes (last page may be partial).
    pub fn pages_for(&self, size: usize) -> usize {
        size.div_ceil(self.page_size)
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "memory={}B page={}B frames={} max_process={}B",
            self.memory_size,
            self.page_size,
            self.frame_count(),
            self.max_process_size
        )
    }
}
