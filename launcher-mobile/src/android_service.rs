use anyhow::Result;
use launcher_core::{
    Permission, PermissionService, PlatformService, Role, RoleService, WallpaperImage,
    WallpaperService,
};

use crate::android_platform::{check_self_permission, get_sdk_level};
use crate::android_role::{is_role_available, start_role_request};
use crate::android_wallpaper::get_wallpaper;

/// Host services backed by the Android framework through JNI.
pub struct AndroidServices;

impl PlatformService for AndroidServices {
    fn sdk_level(&self) -> Result<Option<u32>> {
        get_sdk_level().map(Some)
    }
}

impl PermissionService for AndroidServices {
    fn has_permission(&self, permission: Permission) -> Result<bool> {
        check_self_permission(permission.android_name())
    }
}

impl WallpaperService for AndroidServices {
    fn current_wallpaper(&self) -> Result<WallpaperImage> {
        get_wallpaper()
    }
}

impl RoleService for AndroidServices {
    fn is_role_available(&self, role: Role) -> Result<bool> {
        is_role_available(role.android_name())
    }

    fn launch_role_request(&self, role: Role) -> Result<()> {
        start_role_request(role.android_name())
    }
}
