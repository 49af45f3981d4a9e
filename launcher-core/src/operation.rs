// Operations the bridge exposes and the preconditions attached to each one

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// Android 10, first level that ships `RoleManager`.
pub const SDK_Q: u32 = 29;
/// Android 13, where reading wallpaper pixels needs `READ_MEDIA_IMAGES`.
pub const SDK_TIRAMISU: u32 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetWallpaper,
    RequestLauncherRole,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::GetWallpaper, Operation::RequestLauncherRole];

    /// Method name used on the channel.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetWallpaper => "getWallpaper",
            Operation::RequestLauncherRole => "requestLauncherRole",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Operation::GetWallpaper => Capability {
                operation: *self,
                permission: Some(Permission::ReadMediaImages),
                min_sdk: None,
            },
            Operation::RequestLauncherRole => Capability {
                operation: *self,
                permission: None,
                min_sdk: Some(SDK_Q),
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| BridgeError::NotImplemented(format!("Method '{}' is not implemented", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadMediaImages,
}

impl Permission {
    pub fn android_name(&self) -> &'static str {
        match self {
            Permission::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
        }
    }

    /// Short name used in user-facing messages.
    pub fn short_name(&self) -> &'static str {
        match self {
            Permission::ReadMediaImages => "READ_MEDIA_IMAGES",
        }
    }

    /// Platform level from which the permission is enforced at runtime.
    pub fn enforced_from(&self) -> u32 {
        match self {
            Permission::ReadMediaImages => SDK_TIRAMISU,
        }
    }

    /// Whether a host reporting `sdk_level` has to hold this permission.
    /// Hosts without a platform level (desktop) never do.
    pub fn is_required(&self, sdk_level: Option<u32>) -> bool {
        sdk_level.is_some_and(|level| level >= self.enforced_from())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Home,
}

impl Role {
    pub fn android_name(&self) -> &'static str {
        match self {
            Role::Home => "android.app.role.HOME",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Role::Home => "ROLE_HOME",
        }
    }
}

/// Static description of what an operation needs before it may touch the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub operation: Operation,
    pub permission: Option<Permission>,
    pub min_sdk: Option<u32>,
}

impl Capability {
    /// True when the host is known to run below the operation's minimum level.
    pub fn is_below_min_sdk(&self, sdk_level: Option<u32>) -> bool {
        match (self.min_sdk, sdk_level) {
            (Some(min), Some(level)) => level < min,
            _ => false,
        }
    }
}
