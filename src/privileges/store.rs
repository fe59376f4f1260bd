//! Reading and adjusting the privileges held by a token

use crate::config::Config;
use crate::core::types::{
    PrivilegeAttributes, PrivilegeEntry, PrivilegeError, PrivilegeIdentifier, PrivilegeName,
    PrivilegeResult, PrivilegeSet, TokenAccess,
};
use crate::privileges::codec::{PrivilegeBuffer, PrivilegeSetCodec};
use crate::privileges::elevation::ScopedElevation;
use crate::privileges::probe::CapabilityProbe;
use crate::privileges::resolver::{normalize_scope, IdentifierResolver};
use crate::windows::api::{
    AdjustStatus, SecurityApi, ADJUST_TOKEN_PRIVILEGES, ADVAPI32, GET_TOKEN_INFORMATION,
    OPEN_PROCESS_TOKEN,
};
use crate::windows::native::NativeSecurityApi;
use std::cell::OnceCell;
use std::sync::Arc;
use tracing::{debug, warn};

/// Privilege engine over one security API
pub struct TokenPrivilegeStore<A: SecurityApi> {
    api: Arc<A>,
    probe: CapabilityProbe<A>,
    resolver: IdentifierResolver<A>,
    codec: PrivilegeSetCodec,
}

impl<A: SecurityApi> TokenPrivilegeStore<A> {
    /// Store with the default capacity ceiling and name caching on
    pub fn new(api: Arc<A>) -> Self {
        Self::from_parts(api, PrivilegeSetCodec::default(), true)
    }

    /// Store tuned by the `[codec]` and `[resolver]` configuration sections
    pub fn with_config(api: Arc<A>, config: &Config) -> Self {
        Self::from_parts(
            api,
            PrivilegeSetCodec::with_max_count(config.codec.max_privilege_count),
            config.resolver.cache_names,
        )
    }

    fn from_parts(api: Arc<A>, codec: PrivilegeSetCodec, cache_names: bool) -> Self {
        TokenPrivilegeStore {
            probe: CapabilityProbe::new(Arc::clone(&api)),
            resolver: IdentifierResolver::with_cache(Arc::clone(&api), cache_names),
            api,
            codec,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn probe(&self) -> &CapabilityProbe<A> {
        &self.probe
    }

    pub fn resolver(&self) -> &IdentifierResolver<A> {
        &self.resolver
    }

    pub fn codec(&self) -> &PrivilegeSetCodec {
        &self.codec
    }

    /// Open the token of `process` with `access`
    pub fn open_token(&self, process: &A::Process, access: TokenAccess) -> PrivilegeResult<A::Token> {
        self.probe.require(ADVAPI32, OPEN_PROCESS_TOKEN)?;

        let token = self
            .api
            .open_process_token(process, access)
            .map_err(|e| PrivilegeError::token_open_failed(e.message()))?;
        debug!(access = ?access, "Opened process token");
        Ok(token)
    }

    /// Open the token of the calling process
    pub fn open_current_process_token(&self, access: TokenAccess) -> PrivilegeResult<A::Token> {
        let process = self.api.current_process();
        self.open_token(&process, access)
    }

    /// Every privilege held by `token`, in the order the OS reports them.
    ///
    /// Names resolve lazily against `system_name`; one entry failing to
    /// resolve only turns that entry into [`PrivilegeName::Unknown`].
    pub fn query_privileges(
        &self,
        system_name: Option<&str>,
        token: &A::Token,
    ) -> PrivilegeResult<Vec<ResolvedPrivilege<'_, A>>> {
        self.probe.require(ADVAPI32, GET_TOKEN_INFORMATION)?;

        let mut needed = 0u32;
        let mut buffer = PrivilegeBuffer::empty();
        match self.api.get_token_privileges(token, &mut buffer, &mut needed) {
            // Nothing to report
            Ok(()) => return Ok(Vec::new()),
            Err(e) if e.is_insufficient_buffer() => {}
            Err(e) => return Err(PrivilegeError::query_failed(e.message())),
        }

        let mut buffer = PrivilegeBuffer::zeroed(needed as usize);
        self.api
            .get_token_privileges(token, &mut buffer, &mut needed)
            .map_err(|e| PrivilegeError::query_failed(e.message()))?;
        buffer.truncate(needed as usize);

        let set = self.codec.decode(buffer.as_bytes())?;
        debug!(count = set.count(), size = buffer.len(), "Queried token privileges");

        let scope = normalize_scope(system_name).map(str::to_string);
        Ok(set
            .iter()
            .map(|entry| ResolvedPrivilege {
                resolver: &self.resolver,
                system_name: scope.clone(),
                entry: *entry,
                name: OnceCell::new(),
            })
            .collect())
    }

    /// Apply `requested` to `token` in one native call and return the
    /// attributes the changed privileges had before.
    ///
    /// With `disable_all` the requested entries are ignored and every
    /// privilege loses its enabled flag. A failure means nothing changed.
    pub fn adjust_privileges(
        &self,
        token: &A::Token,
        disable_all: bool,
        requested: &PrivilegeSet,
    ) -> PrivilegeResult<PrivilegeSet> {
        self.probe.require(ADVAPI32, ADJUST_TOKEN_PRIVILEGES)?;

        let new_state = self.codec.encode(requested);
        let mut previous = PrivilegeBuffer::zeroed(self.codec.capacity_len());
        let mut needed = 0u32;
        let status = self
            .api
            .adjust_token_privileges(token, disable_all, &new_state, &mut previous, &mut needed)
            .map_err(|e| PrivilegeError::adjust_failed(e.message()))?;

        if status == AdjustStatus::NotAllAssigned {
            warn!(
                requested = requested.count(),
                "Token does not hold every requested privilege"
            );
        }

        previous.truncate(needed as usize);
        let previous = self.codec.decode(previous.as_bytes())?;
        debug!(
            disable_all,
            requested = requested.count(),
            changed = previous.count(),
            "Adjusted token privileges"
        );
        Ok(previous)
    }

    /// Whether `token` holds `name` with the enabled flag set.
    ///
    /// A privilege the token lacks and one it holds disabled both report false.
    pub fn has_privilege(
        &self,
        system_name: Option<&str>,
        token: &A::Token,
        name: PrivilegeName,
    ) -> PrivilegeResult<bool> {
        if name.is_unknown() {
            return Ok(false);
        }

        let held = self.query_privileges(system_name, token)?;
        Ok(held
            .iter()
            .any(|p| p.name() == name && p.attributes().is_enabled()))
    }

    /// Enable `name` on `token`, returning the previous state
    pub fn enable(&self, token: &A::Token, name: PrivilegeName) -> PrivilegeResult<PrivilegeSet> {
        self.set_enabled(token, name, PrivilegeAttributes::ENABLED)
    }

    /// Disable `name` on `token`, returning the previous state
    pub fn disable(&self, token: &A::Token, name: PrivilegeName) -> PrivilegeResult<PrivilegeSet> {
        self.set_enabled(token, name, PrivilegeAttributes::DISABLED)
    }

    fn set_enabled(
        &self,
        token: &A::Token,
        name: PrivilegeName,
        attributes: PrivilegeAttributes,
    ) -> PrivilegeResult<PrivilegeSet> {
        let identifier = self.resolver.resolve_value(None, name.as_str())?;
        let requested = PrivilegeSet::single(PrivilegeEntry::new(identifier, attributes));
        self.adjust_privileges(token, false, &requested)
    }

    /// Enable `name` on the calling process until the returned guard is released
    pub fn elevate(&self, name: PrivilegeName) -> PrivilegeResult<ScopedElevation<'_, A>> {
        ScopedElevation::new(self, name)
    }
}

impl TokenPrivilegeStore<NativeSecurityApi> {
    /// Store over the operating system's security API
    pub fn native() -> Self {
        Self::new(Arc::new(NativeSecurityApi::new()))
    }
}

/// One queried privilege whose name is resolved on first use
pub struct ResolvedPrivilege<'s, A: SecurityApi> {
    resolver: &'s IdentifierResolver<A>,
    system_name: Option<String>,
    entry: PrivilegeEntry,
    name: OnceCell<Option<String>>,
}

impl<'s, A: SecurityApi> ResolvedPrivilege<'s, A> {
    pub fn entry(&self) -> PrivilegeEntry {
        self.entry
    }

    pub fn identifier(&self) -> PrivilegeIdentifier {
        self.entry.identifier
    }

    pub fn attributes(&self) -> PrivilegeAttributes {
        self.entry.attributes
    }

    pub fn system_name(&self) -> Option<&str> {
        self.system_name.as_deref()
    }

    /// Name reported by the OS, `None` when it cannot be resolved
    pub fn raw_name(&self) -> Option<&str> {
        self.name
            .get_or_init(|| {
                match self
                    .resolver
                    .resolve_name_cached(self.system_name.as_deref(), self.entry.identifier)
                {
                    Ok(name) => Some(name),
                    Err(e) => {
                        debug!(identifier = %self.entry.identifier, error = %e, "Privilege name unresolved");
                        None
                    }
                }
            })
            .as_deref()
    }

    /// Catalog name, [`PrivilegeName::Unknown`] when unresolved or not in the catalog
    pub fn name(&self) -> PrivilegeName {
        self.raw_name()
            .map_or(PrivilegeName::Unknown, PrivilegeName::from_os_name)
    }
}

impl<A: SecurityApi> std::fmt::Debug for ResolvedPrivilege<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedPrivilege")
            .field("entry", &self.entry)
            .field("system_name", &self.system_name)
            .field("name", &self.name.get())
            .finish()
    }
}
