pub use crate::desktop::{load_wallpaper_file, DesktopServices};
pub use crate::report::{exit_status, write_outcome, CallReport};

mod desktop {
    use anyhow::{anyhow, Context, Result};
    use launcher_core::{
        Bitmap, Permission, PermissionService, PlatformService, Role, RoleService,
        WallpaperImage, WallpaperService,
    };
    use std::path::{Path, PathBuf};

    /// Host services for a desktop session: no API level, every permission
    /// granted, no launcher role.
    pub struct DesktopServices;

    impl PlatformService for DesktopServices {
        fn sdk_level(&self) -> Result<Option<u32>> {
            Ok(None)
        }
    }

    impl PermissionService for DesktopServices {
        fn has_permission(&self, _permission: Permission) -> Result<bool> {
            Ok(true)
        }
    }

    impl WallpaperService for DesktopServices {
        fn current_wallpaper(&self) -> Result<WallpaperImage> {
            let location = wallpaper::get()
                .map_err(|e| anyhow!("Failed to query desktop wallpaper: {}", e))?;
            let location = location.trim().trim_matches('\'').trim_matches('"');
            if location.is_empty() {
                return Ok(WallpaperImage::Other {
                    kind: "no wallpaper set".to_string(),
                });
            }

            let path = PathBuf::from(location.strip_prefix("file://").unwrap_or(location));
            log::info!("Desktop wallpaper at {}", path.display());
            load_wallpaper_file(&path)
        }
    }

    impl RoleService for DesktopServices {
        fn is_role_available(&self, role: Role) -> Result<bool> {
            log::info!("{} does not exist on desktop", role.short_name());
            Ok(false)
        }

        fn launch_role_request(&self, role: Role) -> Result<()> {
            Err(anyhow!("Cannot request {} on desktop", role.short_name()))
        }
    }

    /// Decode a wallpaper file. Files whose content is not a recognised
    /// raster format (slideshow XML, SVG...) are reported as non-bitmap.
    pub fn load_wallpaper_file(path: &Path) -> Result<WallpaperImage> {
        let reader = image::ImageReader::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if reader.format().is_none() {
            return Ok(WallpaperImage::Other {
                kind: format!("unrecognised file {}", path.display()),
            });
        }

        let image = reader
            .decode()
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(WallpaperImage::Bitmap(Bitmap::from_rgba(width, height, rgba.into_raw())?))
    }
}

mod report {
    use anyhow::{Context, Result};
    use launcher_core::{Envelope, ErrorCode, Payload};
    use serde::Serialize;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Summary of one bridge call, printed as text or JSON.
    #[derive(Debug, Serialize)]
    pub struct CallReport {
        pub method: String,
        pub success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub code: Option<ErrorCode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub value: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub bytes: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub output: Option<PathBuf>,
    }

    impl std::fmt::Display for CallReport {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match (&self.code, &self.message) {
                (Some(code), Some(message)) => write!(f, "{} failed: {} ({})", self.method, message, code),
                (Some(code), None) => write!(f, "{} failed ({})", self.method, code),
                _ => match (self.bytes, &self.output, self.value) {
                    (Some(bytes), Some(output), _) => {
                        write!(f, "{}: wrote {} bytes of PNG to {}", self.method, bytes, output.display())
                    }
                    (_, _, Some(value)) => write!(f, "{}: {}", self.method, value),
                    _ => write!(f, "{}: ok", self.method),
                },
            }
        }
    }

    /// Process exit status for a finished call: non-zero when the bridge
    /// answered with a failure.
    pub fn exit_status(report: &CallReport) -> u8 {
        if report.success {
            0
        } else {
            1
        }
    }

    /// Turn an envelope into a report, writing byte payloads to `out`.
    pub fn write_outcome(method: &str, envelope: Envelope, out: &Path) -> Result<CallReport> {
        let mut report = CallReport {
            method: method.to_string(),
            success: envelope.is_success(),
            code: None,
            message: None,
            value: None,
            bytes: None,
            output: None,
        };

        match envelope {
            Envelope::Success {
                payload: Payload::Bytes(bytes),
            } => {
                fs::write(out, &bytes)
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                report.bytes = Some(bytes.len());
                report.output = Some(out.to_path_buf());
            }
            Envelope::Success {
                payload: Payload::Bool(value),
            } => report.value = Some(value),
            Envelope::Failure { code, message } => {
                report.code = Some(code);
                report.message = Some(message);
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launcher_core::{BridgeConfig, BridgeError, CapabilityBridge, Envelope, ErrorCode, Payload, WallpaperImage};
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("launchercli-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_png_wallpaper() {
        let dir = temp_dir("png");
        let path = dir.join("wall.png");
        image::RgbaImage::from_pixel(9, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        match load_wallpaper_file(&path).unwrap() {
            WallpaperImage::Bitmap(bitmap) => {
                assert_eq!((bitmap.width(), bitmap.height()), (9, 4));
                assert_eq!(&bitmap.pixels()[..4], &[10, 20, 30, 255]);
            }
            other => panic!("expected bitmap, got {:?}", other),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_slideshow_xml_is_not_a_bitmap() {
        let dir = temp_dir("xml");
        let path = dir.join("slideshow.xml");
        fs::write(&path, "<background><static><file>a.jpg</file></static></background>").unwrap();

        assert!(matches!(load_wallpaper_file(&path).unwrap(), WallpaperImage::Other { .. }));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = temp_dir("missing").join("nope.png");
        assert!(load_wallpaper_file(&path).is_err());
    }

    #[test]
    fn test_desktop_has_no_launcher_role() {
        let bridge = CapabilityBridge::new(DesktopServices, BridgeConfig::default());
        let envelope = bridge.handle("requestLauncherRole");
        assert_eq!(envelope.error_code(), Some(ErrorCode::RoleNotAvailable));
    }

    #[test]
    fn test_write_outcome_saves_bytes() {
        let dir = temp_dir("report");
        let out = dir.join("out.png");
        let envelope = Envelope::success(Payload::Bytes(vec![1, 2, 3]));

        let report = write_outcome("getWallpaper", envelope, &out).unwrap();
        assert!(report.success);
        assert_eq!(report.bytes, Some(3));
        assert_eq!(fs::read(&out).unwrap(), vec![1, 2, 3]);
        assert!(report.to_string().contains("wrote 3 bytes"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_exit_status_follows_envelope() {
        let dir = temp_dir("exit");
        let out = dir.join("out.png");

        let ok = write_outcome("requestLauncherRole", Envelope::success(Payload::Bool(true)), &out).unwrap();
        assert_eq!(exit_status(&ok), 0);

        let bytes = write_outcome("getWallpaper", Envelope::success(Payload::Bytes(vec![9])), &out).unwrap();
        assert_eq!(exit_status(&bytes), 0);

        for error in [
            BridgeError::RoleNotAvailable("ROLE_HOME is not available".into()),
            BridgeError::NotImplemented("Method 'x' is not implemented".into()),
            BridgeError::Unexpected("Error retrieving wallpaper: boom".into()),
        ] {
            let report = write_outcome("call", Envelope::failure(error), &out).unwrap();
            assert_eq!(exit_status(&report), 1);
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_desktop_role_request_exits_non_zero() {
        let bridge = CapabilityBridge::new(DesktopServices, BridgeConfig::default());
        let envelope = bridge.handle("requestLauncherRole");
        let report = write_outcome("requestLauncherRole", envelope, std::path::Path::new("unused")).unwrap();
        assert_ne!(exit_status(&report), 0);
    }

    #[test]
    fn test_failure_report_json() {
        let envelope = Envelope::failure(BridgeError::RoleNotAvailable("ROLE_HOME is not available".into()));
        let report = write_outcome("requestLauncherRole", envelope, std::path::Path::new("unused")).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "ROLE_NOT_AVAILABLE");
        assert!(json.get("output").is_none());
        assert_eq!(
            report.to_string(),
            "requestLauncherRole failed: ROLE_HOME is not available (ROLE_NOT_AVAILABLE)"
        );
    }
}
