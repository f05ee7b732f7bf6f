//! Shared data model for the muster team-session coordination engine.
//!
//! These types cross the boundary between the engine (`muster-core`), the
//! directory service that hosts sessions, and whatever front end renders the
//! lobby. They carry no behavior beyond structural queries and invariant
//! checks.

mod notice;
mod session;
mod team;

pub use notice::Notice;
pub use session::DomainSessionId;
pub use session::SessionListing;
pub use session::SessionMember;
pub use session::SessionSnapshot;
pub use session::SnapshotError;
pub use team::MemberSlot;
pub use team::Team;
pub use team::TeamUnit;
