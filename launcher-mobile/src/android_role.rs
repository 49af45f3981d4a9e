use anyhow::Result;

#[cfg(target_os = "android")]
use anyhow::bail;
#[cfg(target_os = "android")]
use jni::objects::{JObject, JValue};
#[cfg(target_os = "android")]
use jni::JNIEnv;

#[cfg(target_os = "android")]
use crate::android_context::{with_activity, JniResultExt};

#[cfg(target_os = "android")]
fn role_manager<'local>(env: &mut JNIEnv<'local>, activity: &JObject) -> Result<JObject<'local>> {
    let class = env
        .find_class("android/app/role/RoleManager")
        .java_context(env, "Failed to find RoleManager class")?;
    let class_obj: &JObject = &class;

    let manager = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/Class;)Ljava/lang/Object;",
            &[JValue::Object(class_obj)],
        )
        .java_context(env, "Failed to get RoleManager service")?
        .l()
        .java_context(env, "Failed to convert RoleManager to object")?;

    if manager.is_null() {
        bail!("RoleManager service is not available");
    }
    Ok(manager)
}

/// Ask `RoleManager.isRoleAvailable` about `role`
#[cfg(target_os = "android")]
pub fn is_role_available(role: &str) -> Result<bool> {
    with_activity(|env, activity| {
        let manager = role_manager(env, activity)?;
        let role_name = JObject::from(
            env.new_string(role)
                .java_context(env, "Failed to create role name string")?,
        );

        let available = env
            .call_method(
                &manager,
                "isRoleAvailable",
                "(Ljava/lang/String;)Z",
                &[JValue::Object(&role_name)],
            )
            .java_context(env, "Failed to call isRoleAvailable")?
            .z()
            .java_context(env, "Failed to convert availability to boolean")?;

        log::info!("Role {} available: {}", role, available);
        Ok(available)
    })
}

/// Start the system dialog that lets the user grant `role` to this app.
/// Returns as soon as the activity is started; the answer is not observed.
#[cfg(target_os = "android")]
pub fn start_role_request(role: &str) -> Result<()> {
    with_activity(|env, activity| {
        let manager = role_manager(env, activity)?;
        let role_name = JObject::from(
            env.new_string(role)
                .java_context(env, "Failed to create role name string")?,
        );

        let intent = env
            .call_method(
                &manager,
                "createRequestRoleIntent",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&role_name)],
            )
            .java_context(env, "Failed to create role request intent")?
            .l()
            .java_context(env, "Failed to convert intent to object")?;

        env.call_method(
            activity,
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&intent)],
        )
        .java_context(env, "Failed to start role request activity")?;

        log::info!("Started role request activity for {}", role);
        Ok(())
    })
}

#[cfg(not(target_os = "android"))]
pub fn is_role_available(_role: &str) -> Result<bool> {
    log::warn!("Android role management not available on this platform");
    Err(anyhow::anyhow!("Android role management not available on this platform"))
}

#[cfg(not(target_os = "android"))]
pub fn start_role_request(_role: &str) -> Result<()> {
    log::warn!("Android role management not available on this platform");
    Err(anyhow::anyhow!("Android role management not available on this platform"))
}
