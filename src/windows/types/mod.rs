//! Owned Windows resources

pub mod handle;
pub mod library;

pub use handle::TokenHandle;
pub use library::LibraryGuard;
