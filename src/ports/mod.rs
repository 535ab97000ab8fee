//! Port traits defining external boundaries.
//!
//! The generator core never calls `std::fs` or the glob engine directly; it
//! goes through these traits so runs can be recorded and replayed.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{FileSystem, PortError};
