//! Scoped privilege elevation for the calling process

use crate::core::types::{PrivilegeName, PrivilegeResult, PrivilegeSet, TokenAccess};
use crate::privileges::store::TokenPrivilegeStore;
use crate::windows::api::SecurityApi;
use tracing::{debug, error, info};

/// Lifecycle of a [`ScopedElevation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationState {
    /// The privilege is enabled and a restore is owed
    Active,
    /// The previous state has been restored, or the restore was attempted
    Released,
}

/// Enables one privilege on the calling process and restores the previous
/// attributes when released.
///
/// Release happens at most once: explicitly through [`ScopedElevation::release`]
/// or when the guard is dropped, including during unwinding. A restore failure
/// during drop is logged at error level.
///
/// Two guards elevating the same privilege at the same time race on the shared
/// token; whichever releases last decides the final state.
pub struct ScopedElevation<'s, A: SecurityApi> {
    store: &'s TokenPrivilegeStore<A>,
    token: A::Token,
    privilege: PrivilegeName,
    previous: PrivilegeSet,
    state: ElevationState,
}

impl<'s, A: SecurityApi> ScopedElevation<'s, A> {
    /// Enable `privilege` on the current process token.
    ///
    /// On failure no guard exists and nothing needs restoring.
    pub fn new(store: &'s TokenPrivilegeStore<A>, privilege: PrivilegeName) -> PrivilegeResult<Self> {
        let token = store.open_current_process_token(TokenAccess::ADJUST_AND_QUERY)?;
        let previous = store.enable(&token, privilege)?;
        info!(privilege = %privilege, changed = previous.count(), "Privilege elevated");

        Ok(ScopedElevation {
            store,
            token,
            privilege,
            previous,
            state: ElevationState::Active,
        })
    }

    pub fn privilege(&self) -> PrivilegeName {
        self.privilege
    }

    pub fn state(&self) -> ElevationState {
        self.state
    }

    /// Attributes captured before the privilege was enabled
    pub fn previous_state(&self) -> &PrivilegeSet {
        &self.previous
    }

    /// Restore the captured attributes. Calling again is a no-op.
    ///
    /// The guard counts as released even when the restore fails.
    pub fn release(&mut self) -> PrivilegeResult<()> {
        if self.state == ElevationState::Released {
            return Ok(());
        }
        self.state = ElevationState::Released;

        if self.previous.is_empty() {
            debug!(privilege = %self.privilege, "Privilege was already enabled, nothing to restore");
            return Ok(());
        }

        self.store
            .adjust_privileges(&self.token, false, &self.previous)?;
        info!(privilege = %self.privilege, "Privilege restored");
        Ok(())
    }
}

impl<A: SecurityApi> Drop for ScopedElevation<'_, A> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            error!(privilege = %self.privilege, error = %e, "Failed to restore privilege state");
        }
    }
}

impl<A: SecurityApi> std::fmt::Debug for ScopedElevation<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedElevation")
            .field("privilege", &self.privilege)
            .field("state", &self.state)
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{PrivilegeAttributes, PrivilegeEntry, PrivilegeError};
    use crate::windows::fake::FakeSecurityApi;
    use crate::windows::utils::ErrorCode;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn store(api: FakeSecurityApi) -> (Arc<FakeSecurityApi>, TokenPrivilegeStore<FakeSecurityApi>) {
        let api = Arc::new(api);
        (Arc::clone(&api), TokenPrivilegeStore::new(api))
    }

    fn has(store: &TokenPrivilegeStore<FakeSecurityApi>, name: PrivilegeName) -> bool {
        let token = store.open_current_process_token(TokenAccess::QUERY).unwrap();
        store.has_privilege(None, &token, name).unwrap()
    }

    #[test]
    fn test_elevate_and_release() {
        let (_, store) = store(FakeSecurityApi::new());
        assert!(!has(&store, PrivilegeName::TimeZone));

        let mut guard = store.elevate(PrivilegeName::TimeZone).unwrap();
        assert_eq!(guard.state(), ElevationState::Active);
        assert_eq!(guard.privilege(), PrivilegeName::TimeZone);
        assert!(has(&store, PrivilegeName::TimeZone));

        guard.release().unwrap();
        assert_eq!(guard.state(), ElevationState::Released);
        assert!(!has(&store, PrivilegeName::TimeZone));
    }

    #[test]
    fn test_release_on_drop() {
        let (api, store) = store(FakeSecurityApi::new());
        let before = api.held();
        {
            let _guard = store.elevate(PrivilegeName::TimeZone).unwrap();
            assert!(has(&store, PrivilegeName::TimeZone));
        }
        assert_eq!(api.held(), before);
    }

    #[test]
    fn test_double_release_is_noop() {
        let (api, store) = store(FakeSecurityApi::new());
        let mut guard = store.elevate(PrivilegeName::TimeZone).unwrap();

        guard.release().unwrap();
        let after_first = api.held();
        let calls = api.adjust_calls();

        guard.release().unwrap();
        drop(guard);
        assert_eq!(api.held(), after_first);
        assert_eq!(api.adjust_calls(), calls);
    }

    #[test]
    fn test_previous_state_snapshot() {
        let (api, store) = store(FakeSecurityApi::new());
        let guard = store.elevate(PrivilegeName::TimeZone).unwrap();

        let id = api.identifier(PrivilegeName::TimeZone);
        let entry = guard.previous_state().find(id).copied().unwrap();
        assert_eq!(entry, PrivilegeEntry::disabled(id));
        assert!(!entry.attributes.is_enabled());
    }

    #[test]
    fn test_already_enabled_privilege_not_restored() {
        let (api, store) = store(FakeSecurityApi::new());
        let mut guard = store.elevate(PrivilegeName::ChangeNotify).unwrap();
        assert!(guard.previous_state().is_empty());

        guard.release().unwrap();
        assert_eq!(api.adjust_calls(), 1);
        assert_eq!(
            api.attributes_of(PrivilegeName::ChangeNotify),
            Some(PrivilegeAttributes::ENABLED_BY_DEFAULT | PrivilegeAttributes::ENABLED)
        );
    }

    #[test]
    fn test_construction_failure_owes_no_restore() {
        let (api, store) = store(FakeSecurityApi::new().fail_adjust(ErrorCode::AccessDenied));
        let before = api.held();

        assert!(matches!(
            store.elevate(PrivilegeName::TimeZone),
            Err(PrivilegeError::AdjustFailed { .. })
        ));
        assert_eq!(api.adjust_calls(), 1);
        assert_eq!(api.held(), before);
    }

    #[test]
    fn test_open_failure_owes_no_restore() {
        let (api, store) = store(FakeSecurityApi::new().fail_open(ErrorCode::AccessDenied));
        assert!(matches!(
            store.elevate(PrivilegeName::TimeZone),
            Err(PrivilegeError::TokenOpenFailed { .. })
        ));
        assert_eq!(api.adjust_calls(), 0);
    }

    #[test]
    fn test_unknown_privilege_cannot_elevate() {
        let (api, store) = store(FakeSecurityApi::new());
        assert!(matches!(
            store.elevate(PrivilegeName::Unknown),
            Err(PrivilegeError::ResolutionFailed { .. })
        ));
        assert_eq!(api.adjust_calls(), 0);
    }

    #[test]
    fn test_restore_failure_is_reported_once() {
        let (api, store) = store(FakeSecurityApi::new());
        let mut guard = store.elevate(PrivilegeName::TimeZone).unwrap();
        api.fail_adjust_after(1, ErrorCode::AccessDenied);

        assert!(matches!(
            guard.release(),
            Err(PrivilegeError::AdjustFailed { .. })
        ));
        assert_eq!(guard.state(), ElevationState::Released);
        assert!(guard.release().is_ok());
        drop(guard);
        assert_eq!(api.adjust_calls(), 2);
    }

    #[test]
    fn test_restore_failure_on_drop_does_not_panic() {
        let (api, store) = store(FakeSecurityApi::new());
        let guard = store.elevate(PrivilegeName::TimeZone).unwrap();
        api.fail_adjust_after(1, ErrorCode::AccessDenied);

        drop(guard);
        assert_eq!(api.adjust_calls(), 2);
        assert_eq!(
            api.attributes_of(PrivilegeName::TimeZone),
            Some(PrivilegeAttributes::ENABLED)
        );
    }

    #[test]
    fn test_release_during_unwind() {
        let (api, store) = store(FakeSecurityApi::new());
        let before = api.held();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.elevate(PrivilegeName::TimeZone).unwrap();
            panic!("elevated scope failed");
        }));
        assert!(result.is_err());
        assert_eq!(api.held(), before);
    }

    #[test]
    fn test_independent_privileges_do_not_conflict() {
        let (api, store) = store(FakeSecurityApi::new());
        let before = api.held();

        let mut time_zone = store.elevate(PrivilegeName::TimeZone).unwrap();
        let mut shutdown = store.elevate(PrivilegeName::Shutdown).unwrap();
        assert!(has(&store, PrivilegeName::TimeZone));
        assert!(has(&store, PrivilegeName::Shutdown));

        time_zone.release().unwrap();
        assert!(has(&store, PrivilegeName::Shutdown));
        shutdown.release().unwrap();
        assert_eq!(api.held(), before);
    }
}
