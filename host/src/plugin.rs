use {
    libloading::Library,
    std::{
        fmt::{self, Debug},
        os::raw::{c_char, c_int, c_void},
        path::{Path, PathBuf},
    },
    tracking_sdk::{
        Skeleton, TrackingVector3, TrackingVector4, TRACKING_VERSION,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load plugin library {}: {source}", .path.display())]
    Library {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Plugin does not export `{symbol}`: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error(
        "Plugin tracking version {found} is not supported, expected {expected}"
    )]
    VersionMismatch { found: c_int, expected: c_int },
}

/// Entry points of a tracking plugin.
///
/// Functions returning joint identifiers are typed as `c_int` since the
/// plugin is free to return anything there.
#[derive(Clone, Copy)]
pub struct PluginApi {
    pub initialize: unsafe extern "C" fn(*mut c_void),
    pub get_module_name: unsafe extern "C" fn() -> *const c_char,
    pub get_publisher_name: unsafe extern "C" fn() -> *const c_char,
    pub get_user_skeleton: unsafe extern "C" fn() -> Skeleton,
    pub finalize: unsafe extern "C" fn(),
    pub get_tracked_point_count: unsafe extern "C" fn() -> c_int,
    pub get_tracking_loss: unsafe extern "C" fn() -> bool,
    pub get_primary_joint_id: unsafe extern "C" fn() -> c_int,
    pub calibrate_user: unsafe extern "C" fn(),
    pub calibrate_center: unsafe extern "C" fn(),
    pub refresh: unsafe extern "C" fn(),
    pub get_smooth_locomotion_reference_joint:
        unsafe extern "C" fn(c_int) -> c_int,
    pub set_offset: unsafe extern "C" fn(TrackingVector3, c_int),
    pub get_config_file_path: unsafe extern "C" fn(*mut c_char),
    pub get_center_position_in_vr_space:
        unsafe extern "C" fn() -> TrackingVector3,
    pub get_center_rotation_in_vr_space:
        unsafe extern "C" fn() -> TrackingVector4,
    pub get_tracking_version: unsafe extern "C" fn() -> c_int,
}

impl Debug for PluginApi {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("PluginApi")
            .field("initialize", &(self.initialize as *const c_void))
            .finish()
    }
}

impl PluginApi {
    /// Fails unless plugin reports the same version this host is built
    /// against.
    ///
    /// # Safety
    ///
    /// Function pointers must be valid.
    pub unsafe fn check_version(&self) -> Result<(), LoadError> {
        let found = (self.get_tracking_version)();
        if found == TRACKING_VERSION {
            Ok(())
        } else {
            Err(LoadError::VersionMismatch {
                found,
                expected: TRACKING_VERSION,
            })
        }
    }
}

/// Tracking plugin loaded from a shared library.
pub struct DynamicPlugin {
    api: PluginApi,

    // Keeps function pointers in `api` valid.
    _library: Library,
}

impl Debug for DynamicPlugin {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.api, fmt)
    }
}

/// Resolves function pointer exported as `symbol`.
unsafe fn resolve<T: Copy>(
    library: &Library,
    symbol: &'static str,
) -> Result<T, LoadError> {
    library
        .get::<T>(symbol.as_bytes())
        .map(|function| *function)
        .map_err(|source| LoadError::MissingSymbol { symbol, source })
}

macro_rules! load_symbols {
    ($library:expr, { $($field:ident: $symbol:literal,)* }) => {
        PluginApi {
            $($field: resolve(&$library, $symbol)?,)*
        }
    };
}

impl DynamicPlugin {
    /// Loads plugin library and resolves all entry points.
    ///
    /// # Safety
    ///
    /// Loading a library runs its initialization code. Exported symbols must
    /// have the signatures declared in `PluginApi`.
    pub unsafe fn load(path: &Path) -> Result<Self, LoadError> {
        let library =
            Library::new(path).map_err(|source| LoadError::Library {
                path: path.to_owned(),
                source,
            })?;

        let api = load_symbols!(library, {
            initialize: "Initialize",
            get_module_name: "GetModuleName",
            get_publisher_name: "GetPublisherName",
            get_user_skeleton: "GetUserSkeleton",
            finalize: "Finalize",
            get_tracked_point_count: "GetTrackedPointCount",
            get_tracking_loss: "GetTrackingLoss",
            get_primary_joint_id: "GetPrimaryJointID",
            calibrate_user: "CalibrateUser",
            calibrate_center: "CalibrateCenter",
            refresh: "Refresh",
            get_smooth_locomotion_reference_joint:
                "GetSmoothLocomotionReferenceJoint",
            set_offset: "SetOffset",
            get_config_file_path: "GetConfigFilePath",
            get_center_position_in_vr_space: "GetCenterPositionInVRSpace",
            get_center_rotation_in_vr_space: "GetCenterRotationInVRSpace",
            get_tracking_version: "GetTrackingVersion",
        });

        api.check_version()?;
        tracing::debug!("Plugin {} loaded", path.display());

        Ok(DynamicPlugin {
            api,
            _library: library,
        })
    }

    /// Entry points of this plugin. Valid while `self` is alive.
    pub fn api(&self) -> &PluginApi {
        &self.api
    }
}
