//! Read-only snapshots of the simulator state.
//!
//! The core hands these back as values; rendering is their `Display` impl so
//! the shell only has to print them.

use std::fmt;

use crate::memory::PhysicalMemory;
use crate::process::Process;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Free,
    Occupied,
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameStatus::Free => f.write_str("Free"),
            FrameStatus::Occupied => f.write_str("Occupied"),
        }
    }
}

/// Occupancy of every frame in physical memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryView {
    pub total_size: usize,
    pub page_size: usize,
    pub frame_count: usize,
    pub free_count: usize,
    pub frames: Vec<FrameStatus>,
}

impl MemoryView {
    pub fn capture(pm: &PhysicalMemory) -> Self {
        let frames = (0..pm.frame_count())
            .map(|frame| {
                if pm.is_free(frame) {
                    FrameStatus::Free
                } else {
                    FrameStatus::Occupied
                }
            })
            .collect();

        MemoryView {
            total_size: pm.total_size(),
            page_size: pm.page_size(),
            frame_count: pm.frame_count(),
            free_count: pm.free_count(),
            frames,
        }
    }

    pub fn free_percentage(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.free_count as f64 / self.frame_count as f64 * 100.0
    }
}

impl fmt::Display for MemoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Physical Memory Status ===")?;
        writeln!(f, "Total Physical Memory: {} bytes", self.total_size)?;
        writeln!(f, "Page Size: {} bytes", self.page_size)?;
        writeln!(f, "Total Number of Frames: {}", self.frame_count)?;
        writeln!(
            f,
            "Free Frames: {} ({:.2}%)",
            self.free_count,
            self.free_percentage()
        )?;
        writeln!(f)?;
        writeln!(f, "Frame Status:")?;
        writeln!(f, "Frame\tStatus")?;
        for (frame, status) in self.frames.iter().enumerate() {
            writeln!(f, "{}\t{}", frame, status)?;
        }
        Ok(())
    }
}

/// What the shell reports after a process is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    pub process_id: i32,
    pub process_size: usize,
    pub number_of_pages: usize,
}

impl From<&Process> for ProcessSummary {
    fn from(process: &Process) -> Self {
        ProcessSummary {
            process_id: process.id(),
            process_size: process.size(),
            number_of_pages: process.number_of_pages(),
        }
    }
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Process created successfully!")?;
        writeln!(f, "Process ID: {}", self.process_id)?;
        writeln!(f, "Process Size: {} bytes", self.process_size)?;
        writeln!(f, "Number of Pages: {}", self.number_of_pages)
    }
}

/// One process's page table, page order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTableView {
    pub process_id: i32,
    pub process_size: usize,
    pub frames: Vec<usize>,
}

impl PageTableView {
    pub fn capture(process: &Process) -> Self {
        PageTableView {
            process_id: process.id(),
            process_size: process.size(),
            frames: process.page_table().to_vec(),
        }
    }

    pub fn number_of_pages(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for PageTableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page Table for Process ID {}:", self.process_id)?;
        writeln!(f, "Process Size: {} bytes", self.process_size)?;
        writeln!(f, "Number of Pages: {}", self.number_of_pages())?;
        writeln!(f, "Page\tFrame")?;
        for (page, frame) in self.frames.iter().enumerate() {
            writeln!(f, "{}\t{}", page, frame)?;
        }
        Ok(())
    }
}
