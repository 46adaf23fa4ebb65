//! Types and helpers shared between a tracking runtime and its plugins.
//!
//! A plugin is a shared library exporting a fixed set of C-ABI functions
//! (`Initialize`, `GetUserSkeleton`, `Finalize` and friends). Everything that
//! crosses that boundary is defined here with `#[repr(C)]` layout.

mod buffer;
mod error;
mod joint;
mod log;
mod skeleton;
mod vector;

pub use self::{
    buffer::copy_c_string,
    error::TrackingError,
    joint::{Ancestors, Joint, SkeletonJoint, SmoothLocomotionReference},
    log::{HostLog, Logger, SystemLog},
    skeleton::Skeleton,
    vector::{TrackingVector3, TrackingVector4},
};

/// Version of the plugin ABI described by this crate.
pub const TRACKING_VERSION: i32 = 2;

/// Capacity of the buffer passed to `GetConfigFilePath`, NUL included.
pub const PATH_BUFFER_MAX_LENGTH: usize = 256;

/// Capacity of `Joint::name`, NUL included.
pub const NAME_BUFFER_LENGTH: usize = 32;

/// Number of addressable joints in a `Skeleton`.
pub const JOINT_COUNT: usize = 27;

/// Exports `GetTrackingVersion` from the invoking crate.
///
/// Every plugin must call this once at crate level. Expands to nothing when
/// the `runtime` feature is enabled.
#[cfg(not(feature = "runtime"))]
#[macro_export]
macro_rules! export_tracking_version {
    () => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn GetTrackingVersion() -> ::std::os::raw::c_int {
            $crate::TRACKING_VERSION
        }
    };
}

#[cfg(feature = "runtime")]
#[macro_export]
macro_rules! export_tracking_version {
    () => {};
}
