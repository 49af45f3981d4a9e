//! JNI entry points for `com.test.custom_launcher.MainActivity`.
//!
//! The activity declares
//!
//! ```kotlin
//! private external fun nativeInit()
//! private external fun nativeChannelName(): String
//! private external fun nativeOnMethodCall(method: String, result: MethodChannel.Result)
//! ```
//!
//! calls `nativeInit()` from `configureFlutterEngine`, opens a
//! `MethodChannel` named `nativeChannelName()` and forwards every call's
//! method name and `Result` to `nativeOnMethodCall`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, OnceLock};

use anyhow::Result;
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::sys::jstring;
use jni::JNIEnv;
use launcher_core::{BridgeConfig, BridgeError, CapabilityBridge, Conf, Envelope, ErrorCode, Payload};

use crate::android_context::JniResultExt;
use crate::android_service::AndroidServices;

static ACTIVITY: Mutex<Option<GlobalRef>> = Mutex::new(None);
static CONFIG: OnceLock<BridgeConfig> = OnceLock::new();

fn config() -> &'static BridgeConfig {
    CONFIG.get_or_init(|| match Conf::new() {
        Ok(conf) => conf.bridge,
        Err(e) => {
            log::error!("Failed to load bridge config, using defaults: {:#}", e);
            BridgeConfig::default()
        }
    })
}

fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("CustomLauncher"),
    );

    panic::set_hook(Box::new(|panic_info| {
        log::error!("PANIC OCCURRED: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic location: {}:{}", location.file(), location.line());
        }
    }));
}

#[no_mangle]
pub extern "system" fn Java_com_test_custom_1launcher_MainActivity_nativeInit<'local>(
    env: JNIEnv<'local>,
    activity: JObject<'local>,
) {
    let mut slot = ACTIVITY.lock().unwrap_or_else(|e| e.into_inner());
    if slot.is_none() {
        init_logging();
        log::info!("Android logger initialized successfully");
    }

    let activity = match env.new_global_ref(&activity) {
        Ok(activity) => activity,
        Err(e) => {
            log::error!("Failed to pin activity: {}", e);
            return;
        }
    };
    let vm = match env.get_java_vm() {
        Ok(vm) => vm,
        Err(e) => {
            log::error!("Failed to get JavaVM: {}", e);
            return;
        }
    };

    // activity recreation hands us a new instance, drop the stale one
    if slot.take().is_some() {
        unsafe { ndk_context::release_android_context() };
    }
    unsafe {
        ndk_context::initialize_android_context(
            vm.get_java_vm_pointer() as _,
            activity.as_obj().as_raw() as _,
        );
    }
    *slot = Some(activity);

    log::info!("Bridge ready on channel {}", config().channel);
}

#[no_mangle]
pub extern "system" fn Java_com_test_custom_1launcher_MainActivity_nativeChannelName<'local>(
    env: JNIEnv<'local>,
    _activity: JObject<'local>,
) -> jstring {
    match env.new_string(&config().channel) {
        Ok(channel) => channel.into_raw(),
        Err(e) => {
            log::error!("Failed to create channel name string: {}", e);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_test_custom_1launcher_MainActivity_nativeOnMethodCall<'local>(
    mut env: JNIEnv<'local>,
    _activity: JObject<'local>,
    method: JString<'local>,
    result: JObject<'local>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let method: String = match env.get_string(&method) {
            Ok(method) => method.into(),
            Err(e) => {
                return Envelope::failure(BridgeError::Unexpected(format!(
                    "Failed to read method name: {}",
                    e
                )))
            }
        };
        CapabilityBridge::new(AndroidServices, config().clone()).handle(&method)
    }));
    let envelope = outcome.unwrap_or_else(|_| {
        Envelope::failure(BridgeError::Unexpected("Bridge panicked while handling call".to_string()))
    });

    if let Err(e) = reply(&mut env, &result, envelope) {
        log::error!("Failed to deliver method channel reply: {:#}", e);
    }
}

/// Deliver an envelope through `MethodChannel.Result`.
fn reply(env: &mut JNIEnv, result: &JObject, envelope: Envelope) -> Result<()> {
    match envelope {
        Envelope::Success { payload } => {
            let value = match payload {
                Payload::Bytes(bytes) => JObject::from(
                    env.byte_array_from_slice(&bytes)
                        .java_context(env, "Failed to create Java byte array")?,
                ),
                Payload::Bool(value) => env
                    .call_static_method(
                        "java/lang/Boolean",
                        "valueOf",
                        "(Z)Ljava/lang/Boolean;",
                        &[JValue::Bool(value.into())],
                    )
                    .java_context(env, "Failed to box boolean")?
                    .l()
                    .java_context(env, "Failed to convert boolean to object")?,
            };
            env.call_method(result, "success", "(Ljava/lang/Object;)V", &[JValue::Object(&value)])
                .java_context(env, "Failed to call Result.success")?;
        }
        Envelope::Failure {
            code: ErrorCode::NotImplemented,
            message,
        } => {
            log::warn!("{}", message);
            env.call_method(result, "notImplemented", "()V", &[])
                .java_context(env, "Failed to call Result.notImplemented")?;
        }
        Envelope::Failure { code, message } => {
            let code = JObject::from(
                env.new_string(code.as_str())
                    .java_context(env, "Failed to create error code string")?,
            );
            let message = JObject::from(
                env.new_string(&message)
                    .java_context(env, "Failed to create error message string")?,
            );
            let details = JObject::null();
            env.call_method(
                result,
                "error",
                "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/Object;)V",
                &[
                    JValue::Object(&code),
                    JValue::Object(&message),
                    JValue::Object(&details),
                ],
            )
            .java_context(env, "Failed to call Result.error")?;
        }
    }
    Ok(())
}
