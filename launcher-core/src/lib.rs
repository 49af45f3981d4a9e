//! Host-capability bridge for the custom launcher.
//!
//! A UI runtime calls named methods over a channel; the bridge maps each name
//! onto a closed set of [`Operation`]s, checks their platform preconditions,
//! invokes the host through the [`services`] traits and answers with an
//! [`Envelope`].

pub mod bitmap;
pub mod bridge;
pub mod conf;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod services;

pub use bitmap::{Bitmap, PngCompression};
pub use bridge::CapabilityBridge;
pub use conf::{BridgeConfig, Conf, DEFAULT_CHANNEL};
pub use envelope::{Envelope, Payload};
pub use error::{BridgeError, ErrorCode};
pub use operation::{Capability, Operation, Permission, Role, SDK_Q, SDK_TIRAMISU};

// Service trait exports
pub use services::{
    DefaultServiceProvider,
    HostServices,
    PermissionService,
    PlatformService,
    RoleService,
    WallpaperImage,
    WallpaperService,
};
