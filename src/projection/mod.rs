//! # Write and Read Projection
//!
//! Projection moves shared token attribute values between a resource's
//! local configuration and the remote system.
//!
//! - **Write projection** (`write`) selects the values to send on create,
//!   on update, or as a full rewrite, dropping any attribute that yields to
//!   a present resource-specific field under the resource's `ConflictPolicy`.
//! - **Read projection** (`read`) copies the nine attributes out of a remote
//!   response. The remote side is authoritative, so no conflict logic applies.
//!
//! Every function here is a pure, synchronous transformation over its inputs
//! and holds no state between calls. Callers must serialize concurrent use of
//! the same local configuration.

pub mod read;
pub mod write;

pub use read::{project, ReadBag, RemoteResponse};
pub use write::{project_all, project_for_create, project_for_update, ValueBag};
