//! Core engine for coordinating multi-member training sessions.
//!
//! The crate is transport-agnostic: callers implement
//! [`SessionDirectory`] over whatever wire they have, feed pushed
//! session listings into the channel handed to
//! [`SessionCoordinator::spawn`], and drive the engine entirely through
//! [`Intent`] submissions and [`SessionEvent`] observations.

pub mod availability;
pub mod config;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod events;
mod gate;
mod reconciler;

pub use availability::RoleAvailability;
pub use availability::RoleSlot;
pub use availability::classify;
pub use availability::rebuild;
pub use config::CoordinatorConfig;
pub use coordinator::CoordinatorHandle;
pub use coordinator::SessionCoordinator;
pub use directory::DirectoryError;
pub use directory::DirectoryResult;
pub use directory::SessionDirectory;
pub use error::CoordinatorError;
pub use error::Result;
pub use events::Intent;
pub use events::Mode;
pub use events::SessionEvent;
