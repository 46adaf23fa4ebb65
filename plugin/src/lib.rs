//! Example tracking plugin.
//!
//! Reports a fixed pose for every joint of the skeleton. Serves as a template
//! for real device drivers: every function the runtime resolves by name is
//! exported here.
//!
//! The runtime calls `Initialize` once, then `Refresh` followed by
//! `GetUserSkeleton` every frame, and `Finalize` at shutdown.

#![allow(non_snake_case)]

pub mod config;
pub mod tracker;

use {
    self::{config::PluginConfig, tracker::Tracker},
    once_cell::sync::Lazy,
    parking_lot::Mutex,
    std::{
        convert::TryFrom as _,
        os::raw::{c_char, c_int, c_void},
    },
    tracking_sdk::{
        copy_c_string, HostLog, Logger, Skeleton, SkeletonJoint,
        TrackingVector3, TrackingVector4, PATH_BUFFER_MAX_LENGTH,
    },
};

const MODULE_NAME: &[u8] = b"ExamplePlugin\0";
const MODULE_PUBLISHER: &[u8] = b"ExamplePublisher\0";

static TRACKER: Lazy<Mutex<Tracker>> =
    Lazy::new(|| Mutex::new(Tracker::new(PluginConfig::path())));

tracking_sdk::export_tracking_version!();

/// Messages for `system` are sent after the tracker is unlocked, so the
/// callback may call other entry points.
///
/// # Safety
///
/// `system` must be null or a `SystemLog` function pointer valid until
/// `Finalize` returns.
#[no_mangle]
pub unsafe extern "C" fn Initialize(system: *mut c_void) {
    let logger = HostLog::from_handle(system)
        .map(|log| Box::new(log) as Box<dyn Logger>);

    let pending = {
        let mut tracker = TRACKER.lock();
        tracker.initialize(logger);
        tracker.take_pending_log()
    };
    pending.deliver();
}

#[no_mangle]
pub extern "C" fn GetModuleName() -> *const c_char {
    MODULE_NAME.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn GetPublisherName() -> *const c_char {
    MODULE_PUBLISHER.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn GetUserSkeleton() -> Skeleton {
    TRACKER.lock().user_skeleton()
}

#[no_mangle]
pub extern "C" fn Finalize() {
    TRACKER.lock().finalize();
}

#[no_mangle]
pub extern "C" fn GetTrackedPointCount() -> c_int {
    TRACKER.lock().tracked_point_count() as c_int
}

#[no_mangle]
pub extern "C" fn GetTrackingLoss() -> bool {
    TRACKER.lock().tracking_loss()
}

#[no_mangle]
pub extern "C" fn GetPrimaryJointID() -> SkeletonJoint {
    TRACKER.lock().primary_joint()
}

#[no_mangle]
pub extern "C" fn CalibrateUser() {
    TRACKER.lock().calibrate_user();
}

#[no_mangle]
pub extern "C" fn CalibrateCenter() {
    TRACKER.lock().calibrate_center();
}

#[no_mangle]
pub extern "C" fn Refresh() {
    TRACKER.lock().refresh();
}

#[no_mangle]
pub extern "C" fn GetSmoothLocomotionReferenceJoint(
    reference: c_int,
) -> SkeletonJoint {
    TRACKER.lock().smooth_locomotion_reference_joint(reference)
}

#[no_mangle]
pub extern "C" fn SetOffset(offset: TrackingVector3, joint: c_int) {
    let mut tracker = TRACKER.lock();
    let result = SkeletonJoint::try_from(joint)
        .and_then(|joint| tracker.set_offset(offset, joint));

    if let Err(err) = result {
        tracing::warn!("Offset ignored: {}", err);
    }
}

/// Writes NUL-terminated config file path into `path`.
///
/// Path longer than the buffer is truncated.
///
/// # Safety
///
/// `path` must be null or point to at least `PATH_BUFFER_MAX_LENGTH`
/// writable bytes.
#[no_mangle]
pub unsafe extern "C" fn GetConfigFilePath(path: *mut c_char) {
    if path.is_null() {
        return;
    }

    let buffer = std::slice::from_raw_parts_mut(path, PATH_BUFFER_MAX_LENGTH);
    let tracker = TRACKER.lock();
    copy_c_string(&tracker.config_path().to_string_lossy(), buffer);
}

#[no_mangle]
pub extern "C" fn GetCenterPositionInVRSpace() -> TrackingVector3 {
    TRACKER.lock().center_position()
}

#[no_mangle]
pub extern "C" fn GetCenterRotationInVRSpace() -> TrackingVector4 {
    TRACKER.lock().center_rotation()
}

