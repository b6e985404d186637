//! # Capabilities
//!
//! The session credential is a JWT whose payload carries a `role` claim.
//! [`resolve_role`] reads it (without verifying anything) and
//! [`Capabilities::for_role`] maps the role, once, to the navigation sections
//! and row actions the console offers. Nothing else looks at the role.

pub mod policy;
pub mod role;

pub use policy::*;
pub use role::*;
