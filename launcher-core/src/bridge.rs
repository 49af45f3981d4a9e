//! Dispatch of named calls onto host services.
//!
//! `CapabilityBridge::handle` is the only entry point a host needs: it takes
//! the raw method name from the channel and always returns an [`Envelope`].
//! Unknown names, missing permissions, host errors and host panics all come
//! back as `Envelope::Failure`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{error, info, warn};

use crate::conf::BridgeConfig;
use crate::envelope::{Envelope, Payload};
use crate::error::{BridgeError, Result};
use crate::operation::{Capability, Operation, Role};
use crate::services::{HostServices, WallpaperImage};

pub struct CapabilityBridge<H> {
    host: H,
    config: BridgeConfig,
}

impl<H: HostServices> CapabilityBridge<H> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn handle(&self, method: &str) -> Envelope {
        let operation = match method.parse::<Operation>() {
            Ok(operation) => operation,
            Err(e) => {
                warn!("Rejecting call to unknown method '{}' on {}", method, self.config.channel);
                return Envelope::failure(e);
            }
        };

        info!("Handling {} on {}", operation, self.config.channel);

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(operation)))
            .unwrap_or_else(|panic| {
                Err(BridgeError::Unexpected(format!(
                    "Error handling {}: {}",
                    operation,
                    panic_message(panic.as_ref())
                )))
            });

        if let Err(e) = &result {
            error!("{} failed with {}: {}", operation, e.code(), e);
        }
        Envelope::from(result)
    }

    pub fn dispatch(&self, operation: Operation) -> Result<Payload> {
        match operation {
            Operation::GetWallpaper => self.get_wallpaper().map(Payload::Bytes),
            Operation::RequestLauncherRole => self.request_launcher_role().map(Payload::Bool),
        }
    }

    fn get_wallpaper(&self) -> Result<Vec<u8>> {
        let unexpected = |e: anyhow::Error| {
            BridgeError::Unexpected(format!("Error retrieving wallpaper: {:#}", e))
        };

        self.check_capability(Operation::GetWallpaper.capability())
            .map_err(|e| match e {
                CheckError::Denied(e) => e,
                CheckError::Host(e) => unexpected(e),
            })?;

        match self.host.current_wallpaper().map_err(unexpected)? {
            WallpaperImage::Bitmap(bitmap) => {
                info!("Wallpaper is a {}x{} bitmap", bitmap.width(), bitmap.height());
                bitmap
                    .encode_png(self.config.png_compression)
                    .map_err(unexpected)
            }
            WallpaperImage::Other { kind } => {
                warn!("Wallpaper is a {}, not a bitmap", kind);
                Err(BridgeError::InvalidType("Wallpaper is not a bitmap".to_string()))
            }
        }
    }

    fn request_launcher_role(&self) -> Result<bool> {
        let role = Role::Home;
        let unexpected = |e: anyhow::Error| {
            BridgeError::Unexpected(format!("Error requesting {}: {:#}", role.short_name(), e))
        };

        self.check_capability(Operation::RequestLauncherRole.capability())
            .map_err(|e| match e {
                CheckError::Denied(e) => e,
                CheckError::Host(e) => unexpected(e),
            })?;

        if !self.host.is_role_available(role).map_err(unexpected)? {
            return Err(BridgeError::RoleNotAvailable(format!(
                "{} is not available",
                role.short_name()
            )));
        }

        // the grant decision happens later in system UI we never hear back from
        self.host.launch_role_request(role).map_err(unexpected)?;
        info!("Launched {} request flow", role.short_name());
        Ok(true)
    }

    fn check_capability(&self, capability: Capability) -> std::result::Result<(), CheckError> {
        let sdk_level = self.host.sdk_level().map_err(CheckError::Host)?;

        if self.config.enforce_min_sdk && capability.is_below_min_sdk(sdk_level) {
            return Err(CheckError::Denied(BridgeError::UnsupportedPlatform(format!(
                "{} requires API level {} or newer, device runs {}",
                capability.operation,
                capability.min_sdk.unwrap_or_default(),
                sdk_level.unwrap_or_default()
            ))));
        }

        if let Some(permission) = capability.permission {
            if permission.is_required(sdk_level)
                && !self.host.has_permission(permission).map_err(CheckError::Host)?
            {
                return Err(CheckError::Denied(BridgeError::PermissionDenied(format!(
                    "{} not granted",
                    permission.short_name()
                ))));
            }
        }

        Ok(())
    }
}

enum CheckError {
    Denied(BridgeError),
    Host(anyhow::Error),
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::DefaultServiceProvider;

    #[test]
    fn test_default_provider_reports_unexpected_wallpaper_error() {
        let bridge = CapabilityBridge::new(DefaultServiceProvider, BridgeConfig::default());
        match bridge.handle("getWallpaper") {
            Envelope::Failure { code, message } => {
                assert_eq!(code, ErrorCode::UnexpectedError);
                assert!(message.starts_with("Error retrieving wallpaper: "));
                assert!(message.contains("not supported on this platform"));
            }
            other => panic!("unexpected envelope {:?}", other),
        }
    }

    #[test]
    fn test_default_provider_has_no_home_role() {
        let bridge = CapabilityBridge::new(DefaultServiceProvider, BridgeConfig::default());
        let env = bridge.handle("requestLauncherRole");
        assert_eq!(env.error_code(), Some(ErrorCode::RoleNotAvailable));
    }

    #[test]
    fn test_unknown_method_names_the_method() {
        let bridge = CapabilityBridge::new(DefaultServiceProvider, BridgeConfig::default());
        match bridge.handle("setWallpaper") {
            Envelope::Failure { code, message } => {
                assert_eq!(code, ErrorCode::NotImplemented);
                assert!(message.contains("setWallpaper"));
            }
            other => panic!("unexpected envelope {:?}", other),
        }
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
