//! In-memory security API simulating a single process token

use crate::core::types::{
    PrivilegeAttributes, PrivilegeEntry, PrivilegeIdentifier, PrivilegeName, PrivilegeSet,
    TokenAccess,
};
use crate::privileges::codec::{encoded_len, PrivilegeBuffer, PrivilegeSetCodec};
use crate::windows::api::{AdjustStatus, SecurityApi};
use crate::windows::utils::{ErrorCode, WinError};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug)]
pub(crate) struct FakeToken {
    access: TokenAccess,
}

#[derive(Default)]
struct FakeState {
    names: Vec<(String, PrivilegeIdentifier)>,
    held: Vec<PrivilegeEntry>,
    missing: HashSet<String>,
    unnamed: HashSet<PrivilegeIdentifier>,
    fail_open: Option<ErrorCode>,
    fail_probe: Option<ErrorCode>,
    fail_adjust: Option<ErrorCode>,
    fail_adjust_after: Option<usize>,
    adjust_calls: usize,
    name_lookups: usize,
}

/// Token of a typical user session plus knobs for failure injection
pub(crate) struct FakeSecurityApi {
    state: Mutex<FakeState>,
}

fn id_of(index: usize) -> PrivilegeIdentifier {
    PrivilegeIdentifier::from_parts(index as u32 + 2, 0)
}

impl FakeSecurityApi {
    /// Every catalog name is known; the token holds a default user set
    pub fn new() -> Self {
        let names = PrivilegeName::ALL
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str().to_string(), id_of(i)))
            .collect();
        let api = FakeSecurityApi {
            state: Mutex::new(FakeState {
                names,
                ..FakeState::default()
            }),
        };
        api.hold(PrivilegeName::Shutdown, PrivilegeAttributes::DISABLED)
            .hold(
                PrivilegeName::ChangeNotify,
                PrivilegeAttributes::ENABLED_BY_DEFAULT | PrivilegeAttributes::ENABLED,
            )
            .hold(PrivilegeName::Undock, PrivilegeAttributes::DISABLED)
            .hold(PrivilegeName::IncreaseWorkingSet, PrivilegeAttributes::DISABLED)
            .hold(PrivilegeName::TimeZone, PrivilegeAttributes::DISABLED)
    }

    pub fn identifier(&self, name: PrivilegeName) -> PrivilegeIdentifier {
        let state = self.state.lock().unwrap();
        state
            .names
            .iter()
            .find(|(n, _)| n == name.as_str())
            .map(|(_, id)| *id)
            .unwrap()
    }

    /// Add (or replace) a held privilege
    pub fn hold(self, name: PrivilegeName, attributes: PrivilegeAttributes) -> Self {
        let id = self.identifier(name);
        {
            let mut state = self.state.lock().unwrap();
            state.held.retain(|e| e.identifier != id);
            state.held.push(PrivilegeEntry::new(id, attributes));
        }
        self
    }

    /// Hold a privilege whose OS name is outside the catalog
    pub fn hold_foreign(self, name: &str, attributes: PrivilegeAttributes) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = PrivilegeIdentifier::from_parts(1000 + state.names.len() as u32, 0);
            state.names.push((name.to_string(), id));
            state.held.push(PrivilegeEntry::new(id, attributes));
        }
        self
    }

    pub fn drop_privilege(self, name: PrivilegeName) -> Self {
        let id = self.identifier(name);
        self.state.lock().unwrap().held.retain(|e| e.identifier != id);
        self
    }

    /// Make name lookups for this privilege report a zero length
    pub fn unnamed(self, name: PrivilegeName) -> Self {
        let id = self.identifier(name);
        self.state.lock().unwrap().unnamed.insert(id);
        self
    }

    pub fn missing_entry_point(self, symbol: &str) -> Self {
        self.state.lock().unwrap().missing.insert(symbol.to_string());
        self
    }

    pub fn fail_open(self, code: ErrorCode) -> Self {
        self.state.lock().unwrap().fail_open = Some(code);
        self
    }

    pub fn fail_probe(self, code: ErrorCode) -> Self {
        self.state.lock().unwrap().fail_probe = Some(code);
        self
    }

    pub fn fail_adjust(self, code: ErrorCode) -> Self {
        self.state.lock().unwrap().fail_adjust = Some(code);
        self
    }

    /// Let the first `calls` adjusts succeed, then fail every later one
    pub fn fail_adjust_after(&self, calls: usize, code: ErrorCode) {
        let mut state = self.state.lock().unwrap();
        state.fail_adjust_after = Some(calls);
        state.fail_adjust = Some(code);
    }

    pub fn attributes_of(&self, name: PrivilegeName) -> Option<PrivilegeAttributes> {
        let id = self.identifier(name);
        let state = self.state.lock().unwrap();
        state
            .held
            .iter()
            .find(|e| e.identifier == id)
            .map(|e| e.attributes)
    }

    pub fn held(&self) -> Vec<PrivilegeEntry> {
        self.state.lock().unwrap().held.clone()
    }

    pub fn adjust_calls(&self) -> usize {
        self.state.lock().unwrap().adjust_calls
    }

    pub fn name_lookups(&self) -> usize {
        self.state.lock().unwrap().name_lookups
    }
}

fn copy_wide(text: &str, out: &mut [u16], length: &mut u32) -> Result<(), WinError> {
    let wide: Vec<u16> = text.encode_utf16().collect();
    if out.len() < wide.len() + 1 || (*length as usize) < wide.len() + 1 {
        *length = wide.len() as u32 + 1;
        return Err(WinError::from_code(ErrorCode::InsufficientBuffer));
    }
    out[..wide.len()].copy_from_slice(&wide);
    out[wide.len()] = 0;
    *length = wide.len() as u32;
    Ok(())
}

impl SecurityApi for FakeSecurityApi {
    type Process = ();
    type Token = FakeToken;

    fn current_process(&self) {}

    fn has_entry_point(&self, library: &str, symbol: &str) -> bool {
        library.eq_ignore_ascii_case("advapi32.dll")
            && !self.state.lock().unwrap().missing.contains(symbol)
    }

    fn lookup_privilege_value(
        &self,
        _system_name: Option<&str>,
        name: &str,
    ) -> Result<PrivilegeIdentifier, WinError> {
        let state = self.state.lock().unwrap();
        state
            .names
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
            .ok_or_else(|| WinError::from_code(ErrorCode::NoSuchPrivilege))
    }

    fn lookup_privilege_name(
        &self,
        _system_name: Option<&str>,
        identifier: PrivilegeIdentifier,
        name: &mut [u16],
        length: &mut u32,
    ) -> Result<(), WinError> {
        let mut state = self.state.lock().unwrap();
        state.name_lookups += 1;
        let found = state
            .names
            .iter()
            .find(|(_, id)| *id == identifier)
            .map(|(n, _)| n.clone());
        match found {
            Some(text) if !state.unnamed.contains(&identifier) => copy_wide(&text, name, length),
            _ => {
                *length = 0;
                Err(WinError::from_code(ErrorCode::NoneMapped))
            }
        }
    }

    fn lookup_privilege_display_name(
        &self,
        _system_name: Option<&str>,
        name: &str,
        display_name: &mut [u16],
        length: &mut u32,
        language_id: &mut u32,
    ) -> Result<(), WinError> {
        let known = self.state.lock().unwrap().names.iter().any(|(n, _)| n == name);
        if !known {
            *length = 0;
            return Err(WinError::from_code(ErrorCode::NoSuchPrivilege));
        }
        *language_id = 1033;
        copy_wide(&format!("Display name of {}", name), display_name, length)
    }

    fn open_process_token(&self, _process: &(), access: TokenAccess) -> Result<FakeToken, WinError> {
        match self.state.lock().unwrap().fail_open {
            Some(code) => Err(WinError::from_code(code)),
            None => Ok(FakeToken { access }),
        }
    }

    fn get_token_privileges(
        &self,
        token: &FakeToken,
        buffer: &mut PrivilegeBuffer,
        return_length: &mut u32,
    ) -> Result<(), WinError> {
        if !token.access.contains(TokenAccess::QUERY) {
            return Err(WinError::from_code(ErrorCode::AccessDenied));
        }
        let state = self.state.lock().unwrap();
        if buffer.is_empty() {
            if let Some(code) = state.fail_probe {
                return Err(WinError::from_code(code));
            }
        }

        let record = PrivilegeSetCodec::with_max_count(usize::MAX)
            .encode(&PrivilegeSet::from_entries(state.held.clone()));
        *return_length = record.len() as u32;
        if buffer.len() < record.len() {
            return Err(WinError::from_code(ErrorCode::InsufficientBuffer));
        }
        buffer.as_mut_bytes()[..record.len()].copy_from_slice(record.as_bytes());
        Ok(())
    }

    fn adjust_token_privileges(
        &self,
        token: &FakeToken,
        disable_all: bool,
        new_state: &PrivilegeBuffer,
        previous_state: &mut PrivilegeBuffer,
        return_length: &mut u32,
    ) -> Result<AdjustStatus, WinError> {
        if !token.access.contains(TokenAccess::ADJUST_PRIVILEGES)
            || (!previous_state.is_empty() && !token.access.contains(TokenAccess::QUERY))
        {
            return Err(WinError::from_code(ErrorCode::AccessDenied));
        }

        let mut state = self.state.lock().unwrap();
        state.adjust_calls += 1;
        let failing = match state.fail_adjust_after {
            Some(allowed) => state.adjust_calls > allowed,
            None => true,
        };
        if let (Some(code), true) = (state.fail_adjust, failing) {
            return Err(WinError::from_code(code));
        }

        // (index into held, new attributes, previous attributes)
        let mut changes: Vec<(usize, PrivilegeAttributes, PrivilegeAttributes)> = Vec::new();
        let mut not_all_assigned = false;
        if disable_all {
            for (i, entry) in state.held.iter().enumerate() {
                if entry.attributes.is_enabled() {
                    changes.push((i, entry.attributes - PrivilegeAttributes::ENABLED, entry.attributes));
                }
            }
        } else {
            let requested = PrivilegeSetCodec::with_max_count(usize::MAX)
                .decode(new_state.as_bytes())
                .map_err(|_| WinError::from_code(ErrorCode::InvalidParameter))?;
            for request in requested.iter() {
                match state.held.iter().position(|e| e.identifier == request.identifier) {
                    Some(i) => {
                        let current = state.held[i].attributes;
                        let wanted = if request.attributes.is_enabled() {
                            current | PrivilegeAttributes::ENABLED
                        } else {
                            current - PrivilegeAttributes::ENABLED
                        };
                        if wanted != current {
                            changes.push((i, wanted, current));
                        }
                    }
                    None => not_all_assigned = true,
                }
            }
        }

        let required = encoded_len(changes.len());
        *return_length = required as u32;
        if !previous_state.is_empty() && previous_state.len() < required {
            return Err(WinError::from_code(ErrorCode::InsufficientBuffer));
        }

        let previous = PrivilegeSet::from_entries(
            changes
                .iter()
                .map(|(i, _, before)| PrivilegeEntry::new(state.held[*i].identifier, *before))
                .collect(),
        );
        for (i, after, _) in &changes {
            state.held[*i].attributes = *after;
        }
        if !previous_state.is_empty() {
            let record = PrivilegeSetCodec::with_max_count(usize::MAX).encode(&previous);
            previous_state.as_mut_bytes()[..record.len()].copy_from_slice(record.as_bytes());
        }

        Ok(if not_all_assigned {
            AdjustStatus::NotAllAssigned
        } else {
            AdjustStatus::AllAssigned
        })
    }
}
