pub mod constants;
pub mod content;
pub mod error;
pub mod geometry;
pub mod io;
pub mod logger;
pub mod memory;
pub mod process;
pub mod views;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use error::SimError;
pub use geometry::{Geometry, GeometryError, is_power_of_two};
pub use vm_manager::PagingSimulator;
