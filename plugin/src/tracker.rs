use {
    crate::config::PluginConfig,
    std::{
        convert::TryFrom,
        fmt::{self, Debug},
        path::{Path, PathBuf},
        sync::Arc,
    },
    tracking_sdk::{
        Logger, Skeleton, SkeletonJoint, SmoothLocomotionReference,
        TrackingError, TrackingVector3, TrackingVector4, JOINT_COUNT,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackerState {
    Uninitialized,
    Initialized,
    Finalized,
}

/// Number of calibration requests received from the runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Calibrations {
    pub user: u32,
    pub center: u32,
}

/// Messages for the runtime together with the logger to deliver them.
///
/// Taken out of the `Tracker` so that the runtime's callback runs without
/// the tracker being borrowed.
#[must_use]
pub struct PendingLog {
    logger: Option<Arc<dyn Logger>>,
    messages: Vec<String>,
}

impl PendingLog {
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Forwards queued messages to the runtime.
    pub fn deliver(self) {
        if let Some(logger) = self.logger {
            for message in &self.messages {
                logger.log(message);
            }
        }
    }
}

/// Plugin context holding the tracked skeleton.
///
/// Exported entry points forward to the process-wide instance of this type.
pub struct Tracker {
    state: TrackerState,
    skeleton: Skeleton,
    config: PluginConfig,
    config_path: PathBuf,
    logger: Option<Arc<dyn Logger>>,
    outbox: Vec<String>,
    calibrations: Calibrations,
}

impl Debug for Tracker {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tracker")
            .field("state", &self.state)
            .field("config_path", &self.config_path)
            .field("logger", &self.logger.is_some())
            .field("outbox", &self.outbox)
            .finish()
    }
}

impl Tracker {
    /// Creates uninitialized tracker. Config is read from `config_path` on
    /// `initialize`.
    pub fn new(config_path: PathBuf) -> Self {
        Tracker {
            state: TrackerState::Uninitialized,
            skeleton: Skeleton::default(),
            config: PluginConfig::default(),
            config_path,
            logger: None,
            outbox: Vec::new(),
            calibrations: Calibrations::default(),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn calibrations(&self) -> Calibrations {
        self.calibrations
    }

    /// Loads config, takes ownership of `logger` and puts skeleton into the
    /// configured pose.
    ///
    /// Calling it again reloads config and replaces the logger. Messages for
    /// the runtime are queued, see `take_pending_log`.
    #[tracing::instrument(skip(logger))]
    pub fn initialize(&mut self, logger: Option<Box<dyn Logger>>) {
        self.logger = logger.map(Arc::from);
        self.outbox.clear();

        let config = match PluginConfig::load_or_default(&self.config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{}", err);
                self.log(&format!("{}, using defaults", err));
                PluginConfig::default()
            }
        };

        self.initialize_with_config(config);
    }

    /// Same as `initialize` with already loaded config. Keeps current logger.
    pub fn initialize_with_config(&mut self, config: PluginConfig) {
        self.config = config;
        self.skeleton.assign_names();
        self.apply_pose();
        self.state = TrackerState::Initialized;
        self.log("Example plugin created");
    }

    /// Zeroes position and rotation of every joint and releases the logger.
    ///
    /// Rotation becomes `{0, 0, 0, 0}`, not the identity.
    pub fn finalize(&mut self) {
        self.skeleton
            .set_pose(TrackingVector3::ZERO, TrackingVector4::ZERO);
        self.state = TrackerState::Finalized;
        tracing::info!("Example plugin finalized");
        self.logger = None;
        self.outbox.clear();
    }

    /// Updates skeleton from the device.
    pub fn refresh(&mut self) {
        self.apply_pose();
    }

    /// Copy of the current skeleton state.
    pub fn user_skeleton(&self) -> Skeleton {
        self.skeleton
    }

    pub fn tracked_point_count(&self) -> usize {
        JOINT_COUNT
    }

    pub fn tracking_loss(&self) -> bool {
        false
    }

    pub fn primary_joint(&self) -> SkeletonJoint {
        SkeletonJoint::Pelvis
    }

    pub fn calibrate_user(&mut self) {
        self.calibrations.user += 1;
        tracing::debug!("User calibration #{}", self.calibrations.user);
    }

    pub fn calibrate_center(&mut self) {
        self.calibrations.center += 1;
        tracing::debug!("Center calibration #{}", self.calibrations.center);
    }

    /// Maps raw `SmoothLocomotionReference` value to skeleton joint.
    ///
    /// Unknown values fall back to `HandLeft`.
    pub fn smooth_locomotion_reference_joint(
        &self,
        reference: i32,
    ) -> SkeletonJoint {
        match SmoothLocomotionReference::try_from(reference) {
            Ok(reference) => reference.joint(),
            Err(err) => {
                tracing::debug!("{}, falling back to HandLeft", err);
                SkeletonJoint::HandLeft
            }
        }
    }

    /// Overwrites position of a single joint.
    pub fn set_offset(
        &mut self,
        offset: TrackingVector3,
        joint: SkeletonJoint,
    ) -> Result<(), TrackingError> {
        let target = self.skeleton.joint_mut(joint).ok_or(
            TrackingError::UnknownJoint {
                value: joint as i32,
            },
        )?;
        target.position = offset;
        Ok(())
    }

    pub fn center_position(&self) -> TrackingVector3 {
        self.config.center.position.into()
    }

    pub fn center_rotation(&self) -> TrackingVector4 {
        self.config.center.rotation.into()
    }

    /// Queues diagnostic message for the runtime.
    pub fn log(&mut self, message: &str) {
        tracing::info!("{}", message);
        if self.logger.is_some() {
            self.outbox.push(message.to_owned());
        }
    }

    /// Drains queued messages.
    ///
    /// The runtime's callback may call back into the plugin, so the result
    /// must be delivered after the tracker lock is released.
    pub fn take_pending_log(&mut self) -> PendingLog {
        PendingLog {
            logger: self.logger.clone(),
            messages: std::mem::take(&mut self.outbox),
        }
    }

    fn apply_pose(&mut self) {
        let pose = self.config.pose;
        self.skeleton.set_pose(pose.position.into(), pose.rotation.into());
    }
}
