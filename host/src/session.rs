use {
    crate::plugin::PluginApi,
    std::{
        convert::TryFrom as _,
        ffi::CStr,
        os::raw::{c_char, c_void},
    },
    tracking_sdk::{
        Skeleton, SkeletonJoint, SmoothLocomotionReference, SystemLog,
        TrackingError, TrackingVector3, TrackingVector4,
        PATH_BUFFER_MAX_LENGTH,
    },
};

/// `SystemLog` handed to plugins. Emits plugin messages as tracing events.
pub unsafe extern "C" fn log_to_tracing(message: *const c_char) {
    if message.is_null() {
        return;
    }
    let message = CStr::from_ptr(message).to_string_lossy();
    tracing::info!(target: "plugin", "{}", message);
}

/// What a plugin reported during a session.
#[derive(Clone, Debug)]
pub struct SessionReport {
    pub module_name: String,
    pub publisher_name: String,
    pub config_path: String,
    pub tracked_points: i32,
    pub primary_joint: SkeletonJoint,
    pub locomotion_joints: [SkeletonJoint; 3],
    pub center_position: TrackingVector3,
    pub center_rotation: TrackingVector4,
    pub frames: usize,
    pub tracking_loss_frames: usize,

    /// Skeleton from the last frame, before `Finalize`.
    pub skeleton: Skeleton,
}

/// Drives plugin through its lifecycle: `Initialize`, `frames` times
/// `Refresh` + `GetUserSkeleton`, then `Finalize`.
///
/// `Finalize` is called even if the plugin reports invalid joint identifiers.
///
/// # Safety
///
/// Function pointers in `api` must be valid for the duration of the call.
#[tracing::instrument(skip(api, system))]
pub unsafe fn run(
    api: &PluginApi,
    system: Option<SystemLog>,
    frames: usize,
) -> Result<SessionReport, TrackingError> {
    let handle = match system {
        Some(system) => system as *mut c_void,
        None => std::ptr::null_mut(),
    };
    (api.initialize)(handle);

    let result = query(api, frames);
    (api.finalize)();
    result
}

unsafe fn query(
    api: &PluginApi,
    frames: usize,
) -> Result<SessionReport, TrackingError> {
    let module_name = c_string((api.get_module_name)());
    let publisher_name = c_string((api.get_publisher_name)());

    let mut path = [0 as c_char; PATH_BUFFER_MAX_LENGTH];
    (api.get_config_file_path)(path.as_mut_ptr());
    let config_path = c_string(path.as_ptr());

    let primary_joint = SkeletonJoint::try_from((api.get_primary_joint_id)())?;

    let mut locomotion_joints = [SkeletonJoint::NoJoint; 3];
    for (slot, reference) in locomotion_joints.iter_mut().zip(&[
        SmoothLocomotionReference::HandLeft,
        SmoothLocomotionReference::HandRight,
        SmoothLocomotionReference::Head,
    ]) {
        let raw = (api.get_smooth_locomotion_reference_joint)(*reference as _);
        *slot = SkeletonJoint::try_from(raw)?;
    }

    (api.calibrate_user)();
    (api.calibrate_center)();

    let mut skeleton = (api.get_user_skeleton)();
    let mut tracking_loss_frames = 0;
    for frame in 0..frames {
        (api.refresh)();
        skeleton = (api.get_user_skeleton)();
        if (api.get_tracking_loss)() {
            tracing::warn!("Tracking lost at frame {}", frame);
            tracking_loss_frames += 1;
        }
    }

    Ok(SessionReport {
        module_name,
        publisher_name,
        config_path,
        tracked_points: (api.get_tracked_point_count)(),
        primary_joint,
        locomotion_joints,
        center_position: (api.get_center_position_in_vr_space)(),
        center_rotation: (api.get_center_rotation_in_vr_space)(),
        frames,
        tracking_loss_frames,
        skeleton,
    })
}

unsafe fn c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}
