use {
    crate::{
        copy_c_string, TrackingError, TrackingVector3, TrackingVector4,
        JOINT_COUNT, NAME_BUFFER_LENGTH,
    },
    std::{convert::TryFrom, os::raw::c_char},
};

/// Identifiers of the tracked body joints.
///
/// Discriminants are the joint indices in `Skeleton::joints`.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkeletonJoint {
    Pelvis,
    Navel,
    Chest,
    ClavicleLeft,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    FingersLeft,
    ThumbLeft,
    ClavicleRight,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    FingersRight,
    ThumbRight,
    Neck,
    Head,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,

    /// Parent of the root joint. Not addressable.
    NoJoint = -1,
}

use SkeletonJoint::*;

static JOINT_PARENTS: [SkeletonJoint; JOINT_COUNT] = [
    NoJoint,       // Pelvis
    Pelvis,        // Navel
    Navel,         // Chest
    Chest,         // ClavicleLeft
    ClavicleLeft,  // ShoulderLeft
    ShoulderLeft,  // ElbowLeft
    ElbowLeft,     // WristLeft
    WristLeft,     // HandLeft
    HandLeft,      // FingersLeft
    HandLeft,      // ThumbLeft
    Chest,         // ClavicleRight
    ClavicleRight, // ShoulderRight
    ShoulderRight, // ElbowRight
    ElbowRight,    // WristRight
    WristRight,    // HandRight
    HandRight,     // FingersRight
    HandRight,     // ThumbRight
    Chest,         // Neck
    Neck,          // Head
    Pelvis,        // HipLeft
    HipLeft,       // KneeLeft
    KneeLeft,      // AnkleLeft
    AnkleLeft,     // FootLeft
    Pelvis,        // HipRight
    HipRight,      // KneeRight
    KneeRight,     // AnkleRight
    AnkleRight,    // FootRight
];

impl SkeletonJoint {
    /// All addressable joints in index order.
    pub const ALL: [SkeletonJoint; JOINT_COUNT] = [
        Pelvis,
        Navel,
        Chest,
        ClavicleLeft,
        ShoulderLeft,
        ElbowLeft,
        WristLeft,
        HandLeft,
        FingersLeft,
        ThumbLeft,
        ClavicleRight,
        ShoulderRight,
        ElbowRight,
        WristRight,
        HandRight,
        FingersRight,
        ThumbRight,
        Neck,
        Head,
        HipLeft,
        KneeLeft,
        AnkleLeft,
        FootLeft,
        HipRight,
        KneeRight,
        AnkleRight,
        FootRight,
    ];

    /// Index into `Skeleton::joints`. `None` for `NoJoint`.
    pub fn index(self) -> Option<usize> {
        match self {
            NoJoint => None,
            joint => Some(joint as usize),
        }
    }

    /// Parent of this joint in the skeleton tree.
    ///
    /// Only `Pelvis` has `NoJoint` as parent. `NoJoint` is its own parent.
    pub fn parent(self) -> SkeletonJoint {
        match self.index() {
            Some(index) => JOINT_PARENTS[index],
            None => NoJoint,
        }
    }

    /// Same as `parent` but as raw index, `-1` standing for `NoJoint`.
    pub fn parent_index(self) -> i32 {
        self.parent() as i32
    }

    /// Iterates over ancestors of this joint, nearest first, ending with
    /// `Pelvis`.
    pub fn ancestors(self) -> Ancestors {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Number of parent hops from this joint to the root.
    pub fn depth(self) -> usize {
        self.ancestors().count()
    }

    pub fn name(self) -> &'static str {
        match self {
            Pelvis => "Pelvis",
            Navel => "Navel",
            Chest => "Chest",
            ClavicleLeft => "ClavicleLeft",
            ShoulderLeft => "ShoulderLeft",
            ElbowLeft => "ElbowLeft",
            WristLeft => "WristLeft",
            HandLeft => "HandLeft",
            FingersLeft => "FingersLeft",
            ThumbLeft => "ThumbLeft",
            ClavicleRight => "ClavicleRight",
            ShoulderRight => "ShoulderRight",
            ElbowRight => "ElbowRight",
            WristRight => "WristRight",
            HandRight => "HandRight",
            FingersRight => "FingersRight",
            ThumbRight => "ThumbRight",
            Neck => "Neck",
            Head => "Head",
            HipLeft => "HipLeft",
            KneeLeft => "KneeLeft",
            AnkleLeft => "AnkleLeft",
            FootLeft => "FootLeft",
            HipRight => "HipRight",
            KneeRight => "KneeRight",
            AnkleRight => "AnkleRight",
            FootRight => "FootRight",
            NoJoint => "NoJoint",
        }
    }
}

impl TryFrom<i32> for SkeletonJoint {
    type Error = TrackingError;

    fn try_from(value: i32) -> Result<Self, TrackingError> {
        if value == NoJoint as i32 {
            return Ok(NoJoint);
        }

        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(TrackingError::UnknownJoint { value })
    }
}

/// Iterator over joint ancestors. See `SkeletonJoint::ancestors`.
#[derive(Clone, Debug)]
pub struct Ancestors {
    next: SkeletonJoint,
}

impl Iterator for Ancestors {
    type Item = SkeletonJoint;

    fn next(&mut self) -> Option<SkeletonJoint> {
        match self.next {
            NoJoint => None,
            joint => {
                self.next = joint.parent();
                Some(joint)
            }
        }
    }
}

/// Body part the host uses as smooth locomotion direction reference.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SmoothLocomotionReference {
    HandLeft,
    HandRight,
    Head,
}

impl SmoothLocomotionReference {
    /// Skeleton joint matching this reference.
    pub fn joint(self) -> SkeletonJoint {
        match self {
            SmoothLocomotionReference::HandLeft => HandLeft,
            SmoothLocomotionReference::HandRight => HandRight,
            SmoothLocomotionReference::Head => Head,
        }
    }
}

impl TryFrom<i32> for SmoothLocomotionReference {
    type Error = TrackingError;

    fn try_from(value: i32) -> Result<Self, TrackingError> {
        match value {
            0 => Ok(SmoothLocomotionReference::HandLeft),
            1 => Ok(SmoothLocomotionReference::HandRight),
            2 => Ok(SmoothLocomotionReference::Head),
            _ => Err(TrackingError::UnknownReference { value }),
        }
    }
}

/// Tracked state of a single joint.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub position: TrackingVector3,
    pub velocity: TrackingVector3,
    pub acceleration: TrackingVector3,
    pub rotation: TrackingVector4,
    pub is_tracked: bool,
    pub tracking_loss: bool,

    /// NUL-terminated joint name.
    pub name: [c_char; NAME_BUFFER_LENGTH],
}

impl Default for Joint {
    fn default() -> Self {
        Joint {
            position: TrackingVector3::ZERO,
            velocity: TrackingVector3::ZERO,
            acceleration: TrackingVector3::ZERO,
            rotation: TrackingVector4::IDENTITY,
            is_tracked: false,
            tracking_loss: false,
            name: [0; NAME_BUFFER_LENGTH],
        }
    }
}

impl Joint {
    /// Reads `name` up to the first NUL or the end of the buffer.
    pub fn name(&self) -> String {
        let bytes = self
            .name
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect::<Vec<u8>>();

        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Writes `name`, truncating it to fit the buffer.
    pub fn set_name(&mut self, name: &str) {
        copy_c_string(name, &mut self.name);
    }
}
