use anyhow::Result;
use launcher_core::WallpaperImage;

#[cfg(target_os = "android")]
use anyhow::{bail, Context};
#[cfg(target_os = "android")]
use jni::objects::{JObject, JString, JValue};
#[cfg(target_os = "android")]
use launcher_core::Bitmap;

#[cfg(target_os = "android")]
use crate::android_context::{class_name, with_activity, JniResultExt};

/// Read the current system wallpaper through `WallpaperManager.getDrawable()`.
///
/// Only a `BitmapDrawable` yields pixels; every other drawable (live
/// wallpapers, vector drawables, a null drawable) is reported as
/// [`WallpaperImage::Other`].
#[cfg(target_os = "android")]
pub fn get_wallpaper() -> Result<WallpaperImage> {
    with_activity(|env, activity| {
        let app_ctx = env
            .call_method(activity, "getApplicationContext", "()Landroid/content/Context;", &[])
            .java_context(env, "Failed to get application context")?
            .l()
            .java_context(env, "Failed to convert application context to object")?;

        let wallpaper_manager = env
            .call_static_method(
                "android/app/WallpaperManager",
                "getInstance",
                "(Landroid/content/Context;)Landroid/app/WallpaperManager;",
                &[JValue::Object(&app_ctx)],
            )
            .java_context(env, "Failed to get WallpaperManager instance")?
            .l()
            .java_context(env, "Failed to convert WallpaperManager to object")?;

        let drawable = env
            .call_method(
                &wallpaper_manager,
                "getDrawable",
                "()Landroid/graphics/drawable/Drawable;",
                &[],
            )
            .java_context(env, "Failed to get wallpaper drawable")?
            .l()
            .java_context(env, "Failed to convert drawable to object")?;

        if drawable.is_null() {
            log::warn!("WallpaperManager returned no drawable");
            return Ok(WallpaperImage::Other {
                kind: "null drawable".to_string(),
            });
        }

        let is_bitmap = env
            .is_instance_of(&drawable, "android/graphics/drawable/BitmapDrawable")
            .java_context(env, "Failed to inspect wallpaper drawable")?;
        if !is_bitmap {
            let kind = class_name(env, &drawable).unwrap_or_else(|| "unknown drawable".to_string());
            return Ok(WallpaperImage::Other { kind });
        }

        let bitmap = env
            .call_method(&drawable, "getBitmap", "()Landroid/graphics/Bitmap;", &[])
            .java_context(env, "Failed to get bitmap from drawable")?
            .l()
            .java_context(env, "Failed to convert bitmap to object")?;
        if bitmap.is_null() {
            return Ok(WallpaperImage::Other {
                kind: "BitmapDrawable without bitmap".to_string(),
            });
        }

        let bitmap = software_bitmap(env, bitmap)?;
        read_bitmap(env, &bitmap).map(WallpaperImage::Bitmap)
    })
}

/// `getPixels` throws on `Config.HARDWARE` bitmaps, and `getConfig` is null
/// for formats the framework cannot name; both need a software copy first.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
fn needs_software_copy(config_name: Option<&str>) -> bool {
    matches!(config_name, None | Some("HARDWARE"))
}

#[cfg(target_os = "android")]
fn software_bitmap<'local>(env: &mut jni::JNIEnv<'local>, bitmap: JObject<'local>) -> Result<JObject<'local>> {
    let config = env
        .call_method(&bitmap, "getConfig", "()Landroid/graphics/Bitmap$Config;", &[])
        .java_context(env, "Failed to get bitmap config")?
        .l()
        .java_context(env, "Failed to convert bitmap config to object")?;

    let config_name = if config.is_null() {
        None
    } else {
        let name = env
            .call_method(&config, "name", "()Ljava/lang/String;", &[])
            .java_context(env, "Failed to get bitmap config name")?
            .l()
            .java_context(env, "Failed to convert config name to object")?;
        let name = JString::from(name);
        let name: String = env
            .get_string(&name)
            .java_context(env, "Failed to read config name")?
            .into();
        Some(name)
    };

    if !needs_software_copy(config_name.as_deref()) {
        return Ok(bitmap);
    }

    let config_name = config_name.unwrap_or_else(|| "unknown".to_string());
    log::info!("Copying {} wallpaper bitmap to ARGB_8888", config_name);

    let argb_8888 = env
        .get_static_field(
            "android/graphics/Bitmap$Config",
            "ARGB_8888",
            "Landroid/graphics/Bitmap$Config;",
        )
        .java_context(env, "Failed to read Bitmap.Config.ARGB_8888")?
        .l()
        .java_context(env, "Failed to convert ARGB_8888 to object")?;

    let copy = env
        .call_method(
            &bitmap,
            "copy",
            "(Landroid/graphics/Bitmap$Config;Z)Landroid/graphics/Bitmap;",
            &[JValue::Object(&argb_8888), JValue::Bool(0)],
        )
        .java_context(env, "Failed to copy bitmap")?
        .l()
        .java_context(env, "Failed to convert bitmap copy to object")?;

    if copy.is_null() {
        bail!("Failed to copy {} bitmap to ARGB_8888", config_name);
    }
    Ok(copy)
}

#[cfg(target_os = "android")]
fn read_bitmap(env: &mut jni::JNIEnv, bitmap: &JObject) -> Result<Bitmap> {
    let width = env
        .call_method(bitmap, "getWidth", "()I", &[])
        .java_context(env, "Failed to get bitmap width")?
        .i()
        .java_context(env, "Failed to convert width to int")?;
    let height = env
        .call_method(bitmap, "getHeight", "()I", &[])
        .java_context(env, "Failed to get bitmap height")?
        .i()
        .java_context(env, "Failed to convert height to int")?;

    log::info!("Reading {}x{} wallpaper bitmap", width, height);

    let len = width
        .checked_mul(height)
        .filter(|len| *len > 0)
        .with_context(|| format!("Unusable bitmap size {}x{}", width, height))?;

    // getPixels hands back ARGB_8888 regardless of the bitmap's own config
    let pixels = env
        .new_int_array(len)
        .java_context(env, "Failed to allocate pixel array")?;
    let pixels_obj: &JObject = &pixels;
    env.call_method(
        bitmap,
        "getPixels",
        "([IIIIIII)V",
        &[
            JValue::Object(pixels_obj),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(0),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(height),
        ],
    )
    .java_context(env, "Failed to read bitmap pixels")?;

    let mut argb = vec![0i32; len as usize];
    env.get_int_array_region(&pixels, 0, &mut argb)
        .java_context(env, "Failed to copy bitmap pixels")?;

    Bitmap::from_argb_pixels(width as u32, height as u32, &argb)
}

#[cfg(not(target_os = "android"))]
pub fn get_wallpaper() -> Result<WallpaperImage> {
    log::warn!("Android wallpaper access not available on this platform");
    Err(anyhow::anyhow!("Android wallpaper access not available on this platform"))
}
