use log::{debug, info, warn};

use crate::content::ContentGenerator;
use crate::error::SimError;
use crate::geometry::{Geometry, check_process_bounds};
use crate::memory::PhysicalMemory;
use crate::process::{Process, ProcessRegistry};
use crate::views::{MemoryView, PageTableView, ProcessSummary};

/// Owns the frame pool, the process list and the content source, and
/// keeps page tables consistent with the free-frame list.
///
/// Frames are never returned to the pool: there is no way to remove a
/// process. Everything is released when the simulator is dropped.
pub struct PagingSimulator {
    geometry: Geometry,
    pm: PhysicalMemory,
    processes: ProcessRegistry,
    content: Box<dyn ContentGenerator>,
}

impl PagingSimulator {
    pub fn new(geometry: Geometry, content: Box<dyn ContentGenerator>) -> Self {
        info!("initializing simulator: {}", geometry);
        PagingSimulator {
            geometry,
            pm: PhysicalMemory::from_geometry(&geometry),
            processes: ProcessRegistry::new(),
            content,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.pm
    }

    pub fn processes(&self) -> &ProcessRegistry {
        &self.processes
    }

    pub fn has_processes(&self) -> bool {
        !self.processes.is_empty()
    }

    pub fn contains_process(&self, pid: i32) -> bool {
        self.processes.contains(pid)
    }

    /// Create process `pid` of `size` bytes and back it with free frames.
    ///
    /// The id and size are checked before any frame is taken, and a failed
    /// allocation leaves both the pool and the process list untouched.
    pub fn create_process(&mut self, pid: i32, size: usize) -> Result<ProcessSummary, SimError> {
        if self.processes.contains(pid) {
            warn!("rejecting duplicate process id {}", pid);
            return Err(SimError::DuplicateProcessId(pid));
        }
        let size = check_process_bounds(size, self.geometry.max_process_size())?;

        let pages_needed = self.geometry.pages_for(size);
        let frames = self.pm.allocate(pages_needed)?;

        // Every page slice gets fully written even if the generator
        // returns the wrong number of bytes: pad with zeros or cut.
        let mut logical = self.content.generate(size);
        if logical.len() != size {
            warn!(
                "content generator returned {} bytes for a {} byte process",
                logical.len(),
                size
            );
            logical.resize(size, 0);
        }

        let page_size = self.geometry.page_size();
        for (page, (&frame, bytes)) in frames.iter().zip(logical.chunks(page_size)).enumerate() {
            debug!(
                "pid {}: page {} -> frame {} ({} bytes at {:#x})",
                pid,
                page,
                frame,
                bytes.len(),
                self.pm.frame_to_address(frame)
            );
            // Frames came from the pool and chunks are at most a page
            self.pm.write_page(frame, bytes)?;
        }

        let process = Process::new(pid, size, frames);
        let summary = ProcessSummary::from(&process);
        self.processes.insert(process)?;

        info!(
            "created process {} ({} bytes, {} pages), {} frames free",
            pid,
            size,
            pages_needed,
            self.pm.free_count()
        );
        Ok(summary)
    }

    pub fn memory_view(&self) -> MemoryView {
        MemoryView::capture(&self.pm)
    }

    pub fn page_table_view(&self, pid: i32) -> Result<PageTableView, SimError> {
        if self.processes.is_empty() {
            return Err(SimError::NoProcesses);
        }
        self.processes
            .find(pid)
            .map(PageTableView::capture)
            .ok_or(SimError::ProcessNotFound(pid))
    }
}
