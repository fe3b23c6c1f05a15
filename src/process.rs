use log::debug;

use crate::constants::{INITIAL_PROCESS_LIST_CAPACITY, PROCESS_LIST_GROWTH_FACTOR};
use crate::error::SimError;

/// A simulated process and the frames backing its pages.
///
/// `page_table[i]` is the physical frame holding logical page `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    process_id: i32,
    process_size: usize,
    page_table: Vec<usize>,
}

impl Process {
    pub fn new(process_id: i32, process_size: usize, page_table: Vec<usize>) -> Self {
        Process {
            process_id,
            process_size,
            page_table,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.process_id
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.process_size
    }

    #[inline]
    pub fn number_of_pages(&self) -> usize {
        self.page_table.len()
    }

    pub fn page_table(&self) -> &[usize] {
        &self.page_table
    }
}

/// Insertion-ordered list of processes with unique ids.
#[derive(Debug)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        ProcessRegistry {
            processes: Vec::with_capacity(INITIAL_PROCESS_LIST_CAPACITY),
        }
    }

    pub fn contains(&self, pid: i32) -> bool {
        self.processes.iter().any(|p| p.id() == pid)
    }

    pub fn find(&self, pid: i32) -> Option<&Process> {
        self.processes.iter().find(|p| p.id() == pid)
    }

    /// Append `process`, doubling the storage when it is full.
    ///
    /// Allocation failure while growing aborts, like any other `Vec` growth.
    pub fn insert(&mut self, process: Process) -> Result<(), SimError> {
        if self.contains(process.id()) {
            return Err(SimError::DuplicateProcessId(process.id()));
        }
        if self.processes.len() == self.processes.capacity() {
            let grow_by = self.processes.capacity() * (PROCESS_LIST_GROWTH_FACTOR - 1);
            self.processes.reserve_exact(grow_by.max(1));
            debug!("process list grown to capacity {}", self.processes.capacity());
        }
        self.processes.push(process);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.processes.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_accessors() {
        let p = Process::new(7, 300, vec![3, 1]);
        assert_eq!(p.id(), 7);
        assert_eq!(p.size(), 300);
        assert_eq!(p.number_of_pages(), 2);
        assert_eq!(p.page_table(), &[3, 1]);
    }

    #[test]
    fn test_registry_starts_empty() {
        let reg = ProcessRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.capacity() >= INITIAL_PROCESS_LIST_CAPACITY);
        assert!(!reg.contains(1));
        assert!(reg.find(1).is_none());
    }

    #[test]
    fn test_insert_and_find() {
        let mut reg = ProcessRegistry::new();
        reg.insert(Process::new(1, 1024, vec![3, 2])).unwrap();
        reg.insert(Process::new(-5, 512, vec![1])).unwrap();

        assert!(reg.contains(1));
        assert!(reg.contains(-5));
        assert_eq!(reg.find(-5).unwrap().page_table(), &[1]);
        assert_eq!(reg.iter().map(Process::id).collect::<Vec<_>>(), vec![1, -5]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut reg = ProcessRegistry::new();
        reg.insert(Process::new(1, 1024, vec![3, 2])).unwrap();
        assert_eq!(
            reg.insert(Process::new(1, 512, vec![1])),
            Err(SimError::DuplicateProcessId(1))
        );
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find(1).unwrap().size(), 1024);
    }

    #[test]
    fn test_capacity_doubles_when_full() {
        let mut reg = ProcessRegistry::new();
        let initial = reg.capacity();
        for pid in 0..initial as i32 {
            reg.insert(Process::new(pid, 1, vec![pid as usize])).unwrap();
        }
        assert_eq!(reg.capacity(), initial);

        reg.insert(Process::new(initial as i32, 1, vec![initial])).unwrap();
        assert!(reg.capacity() >= initial * 2);
        assert_eq!(reg.len(), initial + 1);
    }
}
