// Service traits and default implementations for dependency injection
use anyhow::Result;

use crate::bitmap::Bitmap;
use crate::operation::{Permission, Role};

/// What the OS hands back when asked for the current wallpaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallpaperImage {
    /// A static raster image.
    Bitmap(Bitmap),
    /// Anything that is not a plain bitmap (live wallpaper, vector drawable...).
    Other { kind: String },
}

/// Service trait for platform version queries
pub trait PlatformService: Send + Sync {
    /// Android API level, or `None` on hosts that have no such notion.
    fn sdk_level(&self) -> Result<Option<u32>>;
}

/// Service trait for runtime permission checks
pub trait PermissionService: Send + Sync {
    fn has_permission(&self, permission: Permission) -> Result<bool>;
}

/// Service trait for wallpaper access
pub trait WallpaperService: Send + Sync {
    fn current_wallpaper(&self) -> Result<WallpaperImage>;
}

/// Service trait for system role management
pub trait RoleService: Send + Sync {
    fn is_role_available(&self, role: Role) -> Result<bool>;

    /// Start the user-facing grant flow. Returns once the flow is launched;
    /// the user's decision is never reported back.
    fn launch_role_request(&self, role: Role) -> Result<()>;
}

/// Combined service provider for dependency injection
pub trait HostServices: PlatformService + PermissionService + WallpaperService + RoleService {}

impl<T> HostServices for T where T: PlatformService + PermissionService + WallpaperService + RoleService {}

/// Default implementation that uses no-op or fallback behavior
pub struct DefaultServiceProvider;

impl PlatformService for DefaultServiceProvider {
    fn sdk_level(&self) -> Result<Option<u32>> {
        Ok(None)
    }
}

impl PermissionService for DefaultServiceProvider {
    fn has_permission(&self, _permission: Permission) -> Result<bool> {
        Ok(false)
    }
}

impl WallpaperService for DefaultServiceProvider {
    fn current_wallpaper(&self) -> Result<WallpaperImage> {
        Err(anyhow::anyhow!("Wallpaper access not supported on this platform"))
    }
}

impl RoleService for DefaultServiceProvider {
    fn is_role_available(&self, _role: Role) -> Result<bool> {
        Ok(false)
    }

    fn launch_role_request(&self, role: Role) -> Result<()> {
        Err(anyhow::anyhow!("Cannot request {} on this platform", role.short_name()))
    }
}
