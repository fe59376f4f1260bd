//! Catalog of well-known privilege names

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

macro_rules! privilege_names {
    ($($variant:ident => $name:literal,)*) => {
        /// Well-known privilege names
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PrivilegeName {
            $($variant,)*
            /// Reserved sentinel for a name outside the catalog
            Unknown,
        }

        impl PrivilegeName {
            /// Every catalog entry, excluding [`PrivilegeName::Unknown`]
            pub const ALL: &'static [PrivilegeName] = &[$(PrivilegeName::$variant,)*];

            /// Name as known to the operating system
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(PrivilegeName::$variant => $name,)*
                    PrivilegeName::Unknown => "UnknownPrivilege",
                }
            }
        }
    };
}

privilege_names! {
    AssignPrimaryToken => "SeAssignPrimaryTokenPrivilege",
    Audit => "SeAuditPrivilege",
    Backup => "SeBackupPrivilege",
    ChangeNotify => "SeChangeNotifyPrivilege",
    CreateGlobal => "SeCreateGlobalPrivilege",
    CreatePagefile => "SeCreatePagefilePrivilege",
    CreatePermanent => "SeCreatePermanentPrivilege",
    CreateSymbolicLink => "SeCreateSymbolicLinkPrivilege",
    CreateToken => "SeCreateTokenPrivilege",
    Debug => "SeDebugPrivilege",
    EnableDelegation => "SeEnableDelegationPrivilege",
    Impersonate => "SeImpersonatePrivilege",
    IncreaseBasePriority => "SeIncreaseBasePriorityPrivilege",
    IncreaseQuota => "SeIncreaseQuotaPrivilege",
    IncreaseWorkingSet => "SeIncreaseWorkingSetPrivilege",
    LoadDriver => "SeLoadDriverPrivilege",
    LockMemory => "SeLockMemoryPrivilege",
    MachineAccount => "SeMachineAccountPrivilege",
    ManageVolume => "SeManageVolumePrivilege",
    ProfileSingleProcess => "SeProfileSingleProcessPrivilege",
    Relabel => "SeRelabelPrivilege",
    RemoteShutdown => "SeRemoteShutdownPrivilege",
    Restore => "SeRestorePrivilege",
    Security => "SeSecurityPrivilege",
    Shutdown => "SeShutdownPrivilege",
    SyncAgent => "SeSyncAgentPrivilege",
    SystemEnvironment => "SeSystemEnvironmentPrivilege",
    SystemProfile => "SeSystemProfilePrivilege",
    Systemtime => "SeSystemtimePrivilege",
    TakeOwnership => "SeTakeOwnershipPrivilege",
    Tcb => "SeTcbPrivilege",
    TimeZone => "SeTimeZonePrivilege",
    TrustedCredManAccess => "SeTrustedCredManAccessPrivilege",
    Undock => "SeUndockPrivilege",
    UnsolicitedInput => "SeUnsolicitedInputPrivilege",
}

lazy_static::lazy_static! {
    static ref NAME_LOOKUP: HashMap<&'static str, PrivilegeName> = PrivilegeName::ALL
        .iter()
        .map(|name| (name.as_str(), *name))
        .collect();
}

impl PrivilegeName {
    /// Map an OS privilege name to the catalog, or [`PrivilegeName::Unknown`]
    pub fn from_os_name(name: &str) -> Self {
        NAME_LOOKUP
            .get(name)
            .copied()
            .unwrap_or(PrivilegeName::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        *self == PrivilegeName::Unknown
    }
}

impl fmt::Display for PrivilegeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a name outside the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPrivilegeName(pub String);

impl fmt::Display for UnknownPrivilegeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown privilege name: {}", self.0)
    }
}

impl std::error::Error for UnknownPrivilegeName {}

impl FromStr for PrivilegeName {
    type Err = UnknownPrivilegeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match PrivilegeName::from_os_name(s) {
            PrivilegeName::Unknown => Err(UnknownPrivilegeName(s.to_string())),
            name => Ok(name),
        }
    }
}
