pub mod errors;
pub mod mount;

pub use errors::*;
pub use mount::*;
