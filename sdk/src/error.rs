/// Errors produced by checked accessors and conversions of boundary values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TrackingError {
    /// Vector component index is outside of the vector.
    #[error("Index must be between 0 and {max}, got {index}")]
    ComponentOutOfRange { index: usize, max: usize },

    /// Integer does not name any `SkeletonJoint`.
    #[error("Unknown skeleton joint {value}")]
    UnknownJoint { value: i32 },

    /// Integer does not name any `SmoothLocomotionReference`.
    #[error("Unknown smooth locomotion reference {value}")]
    UnknownReference { value: i32 },
}
