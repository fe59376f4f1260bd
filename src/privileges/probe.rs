//! Runtime detection of native entry points

use crate::core::types::{PrivilegeError, PrivilegeResult};
use crate::windows::api::SecurityApi;
use std::sync::Arc;
use tracing::debug;

/// Checks that a native entry point exists before it is called.
///
/// Absent entry points turn into [`PrivilegeError::UnsupportedPlatform`]
/// instead of a failure inside the native call.
pub struct CapabilityProbe<A> {
    api: Arc<A>,
}

impl<A: SecurityApi> CapabilityProbe<A> {
    pub fn new(api: Arc<A>) -> Self {
        CapabilityProbe { api }
    }

    /// Whether `library` exports `symbol`.
    ///
    /// The library is loaded only for the duration of the check.
    pub fn has_entry_point(&self, library: &str, symbol: &str) -> bool {
        let present = self.api.has_entry_point(library, symbol);
        debug!(library, symbol, present, "Probed entry point");
        present
    }

    /// Fail with `UnsupportedPlatform` unless `library` exports `symbol`
    pub fn require(&self, library: &str, symbol: &str) -> PrivilegeResult<()> {
        if self.has_entry_point(library, symbol) {
            Ok(())
        } else {
            Err(PrivilegeError::unsupported(symbol))
        }
    }
}

impl<A> Clone for CapabilityProbe<A> {
    fn clone(&self) -> Self {
        CapabilityProbe {
            api: Arc::clone(&self.api),
        }
    }
}
