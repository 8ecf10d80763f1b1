//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the extraction pipeline and an
//! external system (time, filesystem, git, issue tracker).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod git;
pub mod issues;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::GitRepo;
pub use issues::IssueTracker;

/// Error type returned by every fallible port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
