use log::{debug, warn};

use crate::constants::ZERO_BYTE;
use crate::error::SimError;
use crate::geometry::Geometry;

/// Tracks which frames are available for allocation.
///
/// Kept as a stack: the initial population is `0..n` in order and
/// allocation pops from the top, so the highest free index goes first.
#[derive(Debug, Clone)]
pub struct FreeFrameList {
    frames: Vec<usize>,
}

impl FreeFrameList {
    /// Create a list holding every frame in `0..frame_count`
    pub fn new(frame_count: usize) -> Self {
        FreeFrameList {
            frames: (0..frame_count).collect(),
        }
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.frames.len()
    }

    /// Linear lookup, no per-frame owner metadata is kept
    pub fn contains(&self, frame: usize) -> bool {
        self.frames.contains(&frame)
    }

    /// Pop `count` frames, or nothing at all if fewer are free
    pub fn take(&mut self, count: usize) -> Option<Vec<usize>> {
        if self.frames.len() < count {
            return None;
        }
        let split = self.frames.len() - count;
        let mut taken = self.frames.split_off(split);
        taken.reverse();
        Some(taken)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.frames
    }
}

/// The simulated physical memory: a byte buffer split into fixed-size
/// frames plus the free-frame list that arbitrates ownership of them.
///
/// The pool never decides what goes into a frame; callers copy their own
/// bytes in with [`PhysicalMemory::write_page`].
#[derive(Debug, Clone)]
pub struct PhysicalMemory {
    data: Box<[u8]>,
    page_size: usize,
    number_of_frames: usize,
    free: FreeFrameList,
}

impl PhysicalMemory {
    /// Create a new physical memory initialized to all zeros
    pub fn new(total_size: usize, page_size: usize) -> Self {
        let number_of_frames = total_size / page_size;
        debug!(
            "physical memory: {} bytes, {} frames of {} bytes",
            total_size, number_of_frames, page_size
        );
        PhysicalMemory {
            data: vec![ZERO_BYTE; total_size].into_boxed_slice(),
            page_size,
            number_of_frames,
            free: FreeFrameList::new(number_of_frames),
        }
    }

    pub fn from_geometry(geometry: &Geometry) -> Self {
        Self::new(geometry.memory_size(), geometry.page_size())
    }

    #[inline]
    pub fn total_size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.number_of_frames
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.free_count()
    }

    /// Currently free frame indices, in stack order (bottom first)
    pub fn free_frames(&self) -> &[usize] {
        self.free.as_slice()
    }

    pub fn is_free(&self, frame: usize) -> bool {
        self.free.contains(frame)
    }

    /// Remove exactly `required_frames` indices from the free list.
    ///
    /// On failure nothing changes: no frame is taken and the buffer is not
    /// touched.
    pub fn allocate(&mut self, required_frames: usize) -> Result<Vec<usize>, SimError> {
        let available = self.free.free_count();
        match self.free.take(required_frames) {
            Some(frames) => {
                debug!("allocated frames {:?}, {} left", frames, self.free.free_count());
                Ok(frames)
            }
            None => {
                warn!(
                    "cannot allocate {} frames, only {} free",
                    required_frames, available
                );
                Err(SimError::InsufficientPhysicalMemory {
                    requested: required_frames,
                    available,
                })
            }
        }
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(&self, frame: usize) -> usize {
        frame * self.page_size
    }

    /// Copy `bytes` to the start of `frame`.
    ///
    /// `bytes` may be shorter than a page; the rest of the frame keeps
    /// whatever it held before. A write that would leave the frame is
    /// refused without touching the buffer.
    pub fn write_page(&mut self, frame: usize, bytes: &[u8]) -> Result<(), SimError> {
        if frame >= self.number_of_frames || bytes.len() > self.page_size {
            return Err(SimError::PageWriteOutOfBounds {
                frame,
                len: bytes.len(),
            });
        }
        let start = self.frame_to_address(frame);
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Bytes currently held by `frame`
    pub fn frame(&self, frame: usize) -> &[u8] {
        let start = self.frame_to_address(frame);
        &self.data[start..start + self.page_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pm_initialization() {
        let pm = PhysicalMemory::new(1024, 256);
        assert_eq!(pm.total_size(), 1024);
        assert_eq!(pm.frame_count(), 4);
        assert_eq!(pm.free_count(), 4);
        // All memory should be zeroed
        for frame in 0..pm.frame_count() {
            assert!(pm.frame(frame).iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_allocate_pops_highest_first() {
        let mut pm = PhysicalMemory::new(1024, 256);
        assert_eq!(pm.allocate(2).unwrap(), vec![3, 2]);
        assert_eq!(pm.allocate(1).unwrap(), vec![1]);
        assert_eq!(pm.free_frames(), &[0]);
    }

    #[test]
    fn test_allocate_exactly_all_frames() {
        let mut pm = PhysicalMemory::new(1024, 256);
        let frames = pm.allocate(4).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(pm.free_count(), 0);

        // One more than what is free fails and changes nothing
        assert_eq!(
            pm.allocate(1),
            Err(SimError::InsufficientPhysicalMemory { requested: 1, available: 0 })
        );
        assert_eq!(pm.free_count(), 0);
    }

    #[test]
    fn test_failed_allocation_is_not_partial() {
        let mut pm = PhysicalMemory::new(2048, 512);
        pm.allocate(3).unwrap();
        assert_eq!(
            pm.allocate(2),
            Err(SimError::InsufficientPhysicalMemory { requested: 2, available: 1 })
        );
        assert_eq!(pm.free_count(), 1);
        assert!(pm.is_free(0));
    }

    #[test]
    fn test_allocations_never_overlap() {
        let mut pm = PhysicalMemory::new(4096, 64);
        let mut seen = HashSet::new();
        for request in [1, 3, 7, 2, 11, 5, 35] {
            for frame in pm.allocate(request).unwrap() {
                assert!(frame < pm.frame_count());
                assert!(seen.insert(frame), "frame {} handed out twice", frame);
            }
        }
        assert_eq!(pm.free_count(), 0);
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_allocate_zero_frames() {
        let mut pm = PhysicalMemory::new(1024, 256);
        assert_eq!(pm.allocate(0).unwrap(), Vec::<usize>::new());
        assert_eq!(pm.free_count(), 4);
    }

    #[test]
    fn test_frame_to_address() {
        let pm = PhysicalMemory::new(4096, 512);
        assert_eq!(pm.frame_to_address(0), 0);
        assert_eq!(pm.frame_to_address(1), 512);
        assert_eq!(pm.frame_to_address(4), 2048);
    }

    #[test]
    fn test_write_partial_page_keeps_tail() {
        let mut pm = PhysicalMemory::new(1024, 256);
        pm.write_page(2, &[0xAA; 256]).unwrap();
        pm.write_page(2, &[0x11; 44]).unwrap();

        let frame = pm.frame(2);
        assert!(frame[..44].iter().all(|&b| b == 0x11));
        assert!(frame[44..].iter().all(|&b| b == 0xAA));
        // Neighbouring frames untouched
        assert!(pm.frame(1).iter().all(|&b| b == 0));
        assert!(pm.frame(3).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_page_rejects_overflow() {
        let mut pm = PhysicalMemory::new(1024, 256);
        assert_eq!(
            pm.write_page(1, &[0xFF; 257]),
            Err(SimError::PageWriteOutOfBounds { frame: 1, len: 257 })
        );
        assert_eq!(
            pm.write_page(4, &[0xFF; 8]),
            Err(SimError::PageWriteOutOfBounds { frame: 4, len: 8 })
        );
        // Nothing spilled into frame 1 or its neighbour
        assert!(pm.frame(1).iter().all(|&b| b == 0));
        assert!(pm.frame(2).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_free_frame_list_take() {
        let mut ffl = FreeFrameList::new(3);
        assert!(ffl.contains(2));
        assert_eq!(ffl.take(4), None);
        assert_eq!(ffl.free_count(), 3);
        assert_eq!(ffl.take(3), Some(vec![2, 1, 0]));
        assert!(!ffl.contains(0));
    }
}
