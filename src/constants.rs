pub const INITIAL_PROCESS_LIST_CAPACITY: usize = 10;
pub const PROCESS_LIST_GROWTH_FACTOR: usize = 2;

/// Largest size (in bytes) the shell accepts for any geometry value.
pub const MAX_SIZE_BYTES: i64 = i32::MAX as i64;

pub const MENU_VIEW_MEMORY: i64 = 1;
pub const MENU_VIEW_PAGE_TABLE: i64 = 2;
pub const MENU_CREATE_PROCESS: i64 = 3;
pub const MENU_EXIT: i64 = 4;

/// Byte value of physical memory before any process writes to it.
pub const ZERO_BYTE: u8 = 0;
