//--------------------------------------------------------------------------------------------------

mod claims;
mod codec;
mod guard;
pub mod internal;
mod role;

pub use claims::{Claims, Subject};
pub use codec::{decode, MalformedTokenError};
pub use guard::{evaluate, AccessRequirement, DenyReason, Evaluation, Fallback};
pub use role::Role;

//--------------------------------------------------------------------------------------------------
