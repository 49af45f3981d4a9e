use anyhow::{Context, Result};
use jni::objects::{JObject, JString};
use jni::JNIEnv;

use crate::java_error::{java_failure, JavaException};

/// Run `f` with a JNI env attached to the current thread and the activity
/// registered through `nativeInit`.
pub(crate) fn with_activity<T>(f: impl FnOnce(&mut JNIEnv, &JObject) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm() as _) }
        .context("Expected to find JVM via ndk_context crate")?;

    let activity = unsafe { JObject::from_raw(ctx.context() as _) };
    let mut env = vm
        .attach_current_thread()
        .context("Failed to attach current thread")?;

    f(&mut env, &activity)
}

/// Clear a pending Java exception and read its messages.
pub(crate) fn take_exception(env: &mut JNIEnv) -> Option<JavaException> {
    if !env.exception_check().unwrap_or(false) {
        return None;
    }
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;

    let localized_message = string_call(env, &throwable, "getLocalizedMessage");
    let description = string_call(env, &throwable, "toString")
        .unwrap_or_else(|| "unknown Java exception".to_string());
    Some(JavaException {
        localized_message,
        description,
    })
}

fn string_call(env: &mut JNIEnv, obj: &JObject, method: &str) -> Option<String> {
    let value = env
        .call_method(obj, method, "()Ljava/lang/String;", &[])
        .ok()
        .and_then(|value| value.l().ok());
    let Some(value) = value else {
        let _ = env.exception_clear();
        return None;
    };
    if value.is_null() {
        return None;
    }
    let value = JString::from(value);
    let text: String = env.get_string(&value).ok()?.into();
    Some(text)
}

pub(crate) trait JniResultExt<T> {
    /// Turn a JNI failure into an error, using the pending Java exception's
    /// message when there is one.
    fn java_context(self, env: &mut JNIEnv, what: &str) -> Result<T>;
}

impl<T> JniResultExt<T> for jni::errors::Result<T> {
    fn java_context(self, env: &mut JNIEnv, what: &str) -> Result<T> {
        self.map_err(|e| {
            // a failed call can leave an exception behind even when jni
            // reports something else
            let exception = take_exception(env);
            java_failure(what, exception.as_ref(), &e.to_string())
        })
    }
}

/// Fully qualified Java class name of `obj`, for log and error messages.
pub(crate) fn class_name(env: &mut JNIEnv, obj: &JObject) -> Option<String> {
    let name = lookup_class_name(env, obj);
    if name.is_none() {
        let _ = take_exception(env);
    }
    name
}

fn lookup_class_name(env: &mut JNIEnv, obj: &JObject) -> Option<String> {
    let class = env
        .call_method(obj, "getClass", "()Ljava/lang/Class;", &[])
        .ok()?
        .l()
        .ok()?;
    let name = env
        .call_method(&class, "getName", "()Ljava/lang/String;", &[])
        .ok()?
        .l()
        .ok()?;
    let name = JString::from(name);
    let text: String = env.get_string(&name).ok()?.into();
    Some(text)
}
