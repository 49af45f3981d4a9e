use anyhow::Result;

#[cfg(target_os = "android")]
use jni::objects::{JObject, JValue};

#[cfg(target_os = "android")]
use crate::android_context::{with_activity, JniResultExt};

/// `PackageManager.PERMISSION_GRANTED`
#[cfg(target_os = "android")]
const PERMISSION_GRANTED: i32 = 0;

/// Get the device API level from `Build.VERSION.SDK_INT`
#[cfg(target_os = "android")]
pub fn get_sdk_level() -> Result<u32> {
    with_activity(|env, _activity| {
        let level = env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
            .java_context(env, "Failed to read Build.VERSION.SDK_INT")?
            .i()
            .java_context(env, "Failed to convert SDK_INT to int")?;
        Ok(level.max(0) as u32)
    })
}

/// Check a runtime permission with `Context.checkSelfPermission`
#[cfg(target_os = "android")]
pub fn check_self_permission(permission: &str) -> Result<bool> {
    with_activity(|env, activity| {
        let name = env
            .new_string(permission)
            .java_context(env, "Failed to create permission name string")?;
        let name = JObject::from(name);

        let status = env
            .call_method(
                activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )
            .java_context(env, "Failed to call checkSelfPermission")?
            .i()
            .java_context(env, "Failed to convert permission status to int")?;

        log::info!("Permission {} status: {}", permission, status);
        Ok(status == PERMISSION_GRANTED)
    })
}

#[cfg(not(target_os = "android"))]
pub fn get_sdk_level() -> Result<u32> {
    log::warn!("Android SDK level not available on this platform");
    Err(anyhow::anyhow!("Android SDK level not available on this platform"))
}

#[cfg(not(target_os = "android"))]
pub fn check_self_permission(_permission: &str) -> Result<bool> {
    log::warn!("Android permission checks not available on this platform");
    Err(anyhow::anyhow!("Android permission checks not available on this platform"))
}
