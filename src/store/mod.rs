#[cfg(feature = "file-store")]
pub mod file;

mod memory;
mod noop;
mod store_trait;

pub use memory::*;
pub use noop::*;
pub use store_trait::*;
