pub mod extensions;
pub mod loader;

pub use extensions::*;
pub use loader::*;
