//! Token privilege engine
//!
//! Everything here is generic over [`SecurityApi`](crate::windows::SecurityApi);
//! production code uses [`NativeSecurityApi`](crate::windows::NativeSecurityApi).

pub mod codec;
pub mod elevation;
pub mod probe;
pub mod resolver;
pub mod store;

pub use codec::{encoded_len, PrivilegeBuffer, PrivilegeSetCodec, MAX_PRIVILEGE_COUNT};
pub use elevation::{ElevationState, ScopedElevation};
pub use probe::CapabilityProbe;
pub use resolver::IdentifierResolver;
pub use store::{ResolvedPrivilege, TokenPrivilegeStore};
