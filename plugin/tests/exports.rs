//! Exercises the exported entry points the way a runtime would.

use {
    example_tracking_plugin::{config::CONFIG_PATH_VAR, *},
    once_cell::sync::Lazy,
    parking_lot::{Mutex, MutexGuard},
    std::{
        ffi::CStr,
        os::raw::{c_char, c_void},
        ptr,
    },
    tracking_sdk::{
        SkeletonJoint, SystemLog, TrackingVector3, TrackingVector4,
        JOINT_COUNT, PATH_BUFFER_MAX_LENGTH, TRACKING_VERSION,
    },
};

/// Exported functions share one tracker, tests must not interleave.
static SERIAL: Lazy<Mutex<()>> = Lazy::new(|| {
    std::env::set_var(CONFIG_PATH_VAR, long_config_path());
    Mutex::new(())
});

static MESSAGES: Lazy<Mutex<Vec<String>>> = Lazy::new(Default::default);

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock()
}

/// Nonexistent path longer than `PATH_BUFFER_MAX_LENGTH`.
fn long_config_path() -> String {
    let mut path = std::env::temp_dir().to_string_lossy().into_owned();
    for _ in 0..40 {
        path.push_str("/nested");
    }
    path.push_str("/ExamplePlugin.ron");
    path
}

unsafe extern "C" fn record(message: *const c_char) {
    let message = CStr::from_ptr(message).to_string_lossy().into_owned();
    MESSAGES.lock().push(message);
}

fn initialize() {
    let handle = record as SystemLog as *mut c_void;
    unsafe { Initialize(handle) }
}

#[test]
fn lifecycle() {
    let _serial = serial();
    MESSAGES.lock().clear();

    initialize();
    assert_eq!(*MESSAGES.lock(), ["Example plugin created"]);

    let skeleton = GetUserSkeleton();
    for (id, joint) in skeleton.iter() {
        assert_eq!(joint.position, TrackingVector3::new(1.1, 1.2, 1.3));
        assert_eq!(joint.rotation, TrackingVector4::IDENTITY);
        assert_eq!(joint.name(), id.name());
    }

    Refresh();
    assert_eq!(GetUserSkeleton(), skeleton);

    Finalize();
    for joint in GetUserSkeleton().joints() {
        assert_eq!(joint.position, TrackingVector3::ZERO);
        assert_eq!(joint.rotation, TrackingVector4::ZERO);
    }
}

unsafe extern "C" fn record_with_point_count(message: *const c_char) {
    let count = GetTrackedPointCount();
    let message = CStr::from_ptr(message).to_string_lossy();
    MESSAGES.lock().push(format!("{} {}", count, message));
}

#[test]
fn log_callback_may_call_back() {
    let _serial = serial();
    MESSAGES.lock().clear();

    let handle = record_with_point_count as SystemLog as *mut c_void;
    unsafe { Initialize(handle) };
    assert_eq!(*MESSAGES.lock(), ["27 Example plugin created"]);
}

#[test]
fn null_system_handle() {
    let _serial = serial();

    unsafe { Initialize(ptr::null_mut()) };
    assert_eq!(
        GetUserSkeleton().joints[0].position,
        TrackingVector3::new(1.1, 1.2, 1.3)
    );
}

#[test]
fn constant_queries() {
    let _serial = serial();
    initialize();

    let name = unsafe { CStr::from_ptr(GetModuleName()) };
    let publisher = unsafe { CStr::from_ptr(GetPublisherName()) };
    assert_eq!(name.to_str(), Ok("ExamplePlugin"));
    assert_eq!(publisher.to_str(), Ok("ExamplePublisher"));

    assert_eq!(GetTrackingVersion(), TRACKING_VERSION);
    assert_eq!(GetTrackingVersion(), 2);
    assert_eq!(GetTrackedPointCount() as usize, JOINT_COUNT);
    assert!(!GetTrackingLoss());
    assert_eq!(GetPrimaryJointID(), SkeletonJoint::Pelvis);
    assert_eq!(GetCenterPositionInVRSpace(), TrackingVector3::ZERO);
    assert_eq!(GetCenterRotationInVRSpace(), TrackingVector4::IDENTITY);

    // Calibration has no effect on the reported pose.
    let skeleton = GetUserSkeleton();
    CalibrateUser();
    CalibrateCenter();
    assert_eq!(GetUserSkeleton(), skeleton);
}

#[test]
fn smooth_locomotion_reference() {
    let _serial = serial();

    assert_eq!(
        GetSmoothLocomotionReferenceJoint(0),
        SkeletonJoint::HandLeft
    );
    assert_eq!(
        GetSmoothLocomotionReferenceJoint(1),
        SkeletonJoint::HandRight
    );
    assert_eq!(GetSmoothLocomotionReferenceJoint(2), SkeletonJoint::Head);
    assert_eq!(
        GetSmoothLocomotionReferenceJoint(17),
        SkeletonJoint::HandLeft
    );
    assert_eq!(
        GetSmoothLocomotionReferenceJoint(-5),
        SkeletonJoint::HandLeft
    );
}

#[test]
fn set_offset() {
    let _serial = serial();
    initialize();

    let before = GetUserSkeleton();
    let offset = TrackingVector3::new(0.25, -0.5, 4.0);
    SetOffset(offset, SkeletonJoint::AnkleLeft as i32);

    let after = GetUserSkeleton();
    for (id, joint) in after.iter() {
        let old = before.joint(id).unwrap();
        if id == SkeletonJoint::AnkleLeft {
            assert_eq!(joint.position, offset);
            assert_eq!(joint.rotation, old.rotation);
            assert_eq!(joint.velocity, old.velocity);
            assert_eq!(joint.acceleration, old.acceleration);
        } else {
            assert_eq!(joint, old);
        }
    }

    // Out-of-range joints are ignored.
    SetOffset(TrackingVector3::ZERO, -1);
    SetOffset(TrackingVector3::ZERO, JOINT_COUNT as i32);
    SetOffset(TrackingVector3::ZERO, i32::MIN);
    assert_eq!(GetUserSkeleton(), after);
}

#[test]
fn config_path_is_bounded() {
    let _serial = serial();

    const GUARD: c_char = 0x7f;
    let mut buffer = [GUARD; PATH_BUFFER_MAX_LENGTH + 64];
    unsafe { GetConfigFilePath(buffer.as_mut_ptr()) };

    let path = long_config_path();
    assert!(path.len() >= PATH_BUFFER_MAX_LENGTH);

    assert_eq!(buffer[PATH_BUFFER_MAX_LENGTH - 1], 0);
    assert!(buffer[PATH_BUFFER_MAX_LENGTH..].iter().all(|&c| c == GUARD));

    let written = unsafe { CStr::from_ptr(buffer.as_ptr()) };
    assert_eq!(
        written.to_bytes(),
        &path.as_bytes()[..PATH_BUFFER_MAX_LENGTH - 1]
    );

    unsafe { GetConfigFilePath(ptr::null_mut()) };
}
