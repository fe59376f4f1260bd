//! Translation between privilege names and identifiers

use crate::core::types::{PrivilegeError, PrivilegeIdentifier, PrivilegeResult};
use crate::privileges::probe::CapabilityProbe;
use crate::windows::api::{
    SecurityApi, ADVAPI32, LOOKUP_PRIVILEGE_DISPLAY_NAME, LOOKUP_PRIVILEGE_NAME,
    LOOKUP_PRIVILEGE_VALUE,
};
use crate::windows::utils::wide_to_string;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

type NameCache = Mutex<HashMap<(Option<String>, PrivilegeIdentifier), String>>;

/// Treat an empty system name as the local system
pub(crate) fn normalize_scope(system_name: Option<&str>) -> Option<&str> {
    system_name.filter(|name| !name.is_empty())
}

/// Resolves privilege names to identifiers on a system and back
pub struct IdentifierResolver<A> {
    api: Arc<A>,
    probe: CapabilityProbe<A>,
    cache: Option<NameCache>,
}

impl<A: SecurityApi> IdentifierResolver<A> {
    /// Resolver that memoizes names in [`IdentifierResolver::resolve_name_cached`]
    pub fn new(api: Arc<A>) -> Self {
        Self::with_cache(api, true)
    }

    pub fn with_cache(api: Arc<A>, cache_names: bool) -> Self {
        IdentifierResolver {
            probe: CapabilityProbe::new(Arc::clone(&api)),
            api,
            cache: cache_names.then(|| Mutex::new(HashMap::new())),
        }
    }

    /// Look up the identifier of `name` on `system_name` (local when `None` or empty)
    pub fn resolve_value(
        &self,
        system_name: Option<&str>,
        name: &str,
    ) -> PrivilegeResult<PrivilegeIdentifier> {
        self.probe.require(ADVAPI32, LOOKUP_PRIVILEGE_VALUE)?;

        let identifier = self
            .api
            .lookup_privilege_value(normalize_scope(system_name), name)
            .map_err(|e| PrivilegeError::resolution_failed(name, e.message()))?;
        debug!(name, %identifier, "Resolved privilege value");
        Ok(identifier)
    }

    /// Look up the name of `identifier`. Nothing is cached.
    pub fn resolve_name(
        &self,
        system_name: Option<&str>,
        identifier: PrivilegeIdentifier,
    ) -> PrivilegeResult<String> {
        self.probe.require(ADVAPI32, LOOKUP_PRIVILEGE_NAME)?;
        let scope = normalize_scope(system_name);

        // First call only reports the required length
        let mut length = 0u32;
        let probe = self
            .api
            .lookup_privilege_name(scope, identifier, &mut [], &mut length);
        if length == 0 {
            let reason = probe.err().map(|e| e.message().to_string()).unwrap_or_default();
            return Err(PrivilegeError::resolution_failed(
                identifier.to_string(),
                format!(
                    "identifier resolved to a name length of 0 and is most probably invalid: {}",
                    reason
                ),
            ));
        }

        let mut name = vec![0u16; length as usize + 1];
        let mut length = name.len() as u32;
        self.api
            .lookup_privilege_name(scope, identifier, &mut name, &mut length)
            .map_err(|e| PrivilegeError::resolution_failed(identifier.to_string(), e.message()))?;

        let end = (length as usize).min(name.len());
        let name = wide_to_string(&name[..end]);
        trace!(%identifier, name = %name, "Resolved privilege name");
        Ok(name)
    }

    /// [`IdentifierResolver::resolve_name`] memoized per (system, identifier).
    ///
    /// Identifiers only live for one boot session, so entries never go stale
    /// within a process.
    pub fn resolve_name_cached(
        &self,
        system_name: Option<&str>,
        identifier: PrivilegeIdentifier,
    ) -> PrivilegeResult<String> {
        let Some(cache) = &self.cache else {
            return self.resolve_name(system_name, identifier);
        };

        let key = (normalize_scope(system_name).map(str::to_string), identifier);
        if let Some(name) = cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            return Ok(name.clone());
        }

        let name = self.resolve_name(system_name, identifier)?;
        cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, name.clone());
        Ok(name)
    }

    /// Look up the human-readable name of `name` and its language identifier
    pub fn resolve_display_name(
        &self,
        system_name: Option<&str>,
        name: &str,
    ) -> PrivilegeResult<(String, u32)> {
        self.probe.require(ADVAPI32, LOOKUP_PRIVILEGE_DISPLAY_NAME)?;
        let scope = normalize_scope(system_name);

        let mut length = 0u32;
        let mut language_id = 0u32;
        let probe = self
            .api
            .lookup_privilege_display_name(scope, name, &mut [], &mut length, &mut language_id);
        if length == 0 {
            let reason = probe.err().map(|e| e.message().to_string()).unwrap_or_default();
            return Err(PrivilegeError::resolution_failed(
                name,
                format!(
                    "privilege resolved to a display name length of 0 and is most probably invalid: {}",
                    reason
                ),
            ));
        }

        let mut display_name = vec![0u16; length as usize + 1];
        let mut length = display_name.len() as u32;
        self.api
            .lookup_privilege_display_name(scope, name, &mut display_name, &mut length, &mut language_id)
            .map_err(|e| PrivilegeError::resolution_failed(name, e.message()))?;

        let end = (length as usize).min(display_name.len());
        Ok((wide_to_string(&display_name[..end]), language_id))
    }

    /// Number of memoized names
    pub fn cached_names(&self) -> usize {
        self.cache
            .as_ref()
            .map_or(0, |c| c.lock().unwrap_or_else(|e| e.into_inner()).len())
    }
}
