//! Android host for the launcher capability bridge.
//!
//! Built as a `cdylib` loaded by the Flutter `MainActivity`; the JNI entry
//! points live in `method_channel`. Off-device builds keep the same API with
//! fallbacks that report the platform as unsupported.

#[cfg(target_os = "android")]
mod android_context;
mod android_platform;
mod android_role;
mod android_service;
mod android_wallpaper;
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
mod java_error;
#[cfg(target_os = "android")]
mod method_channel;

pub use android_platform::{check_self_permission, get_sdk_level};
pub use android_role::{is_role_available, start_role_request};
pub use android_service::AndroidServices;
pub use android_wallpaper::get_wallpaper;
