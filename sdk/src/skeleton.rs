use crate::{
    Joint, SkeletonJoint, TrackingVector3, TrackingVector4, JOINT_COUNT,
};

/// Full tracked body. Joints are indexed by `SkeletonJoint`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Skeleton {
    pub joints: [Joint; JOINT_COUNT],
}

impl Skeleton {
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Returns joint by identifier. `None` for `NoJoint`.
    pub fn joint(&self, joint: SkeletonJoint) -> Option<&Joint> {
        Some(&self.joints[joint.index()?])
    }

    pub fn joint_mut(&mut self, joint: SkeletonJoint) -> Option<&mut Joint> {
        Some(&mut self.joints[joint.index()?])
    }

    /// Iterates over joints paired with their identifiers.
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (SkeletonJoint, &Joint)> + '_ {
        SkeletonJoint::ALL.iter().copied().zip(self.joints.iter())
    }

    /// Sets position and rotation of every joint.
    pub fn set_pose(
        &mut self,
        position: TrackingVector3,
        rotation: TrackingVector4,
    ) {
        for joint in self.joints.iter_mut() {
            joint.position = position;
            joint.rotation = rotation;
        }
    }

    /// Writes each joint's identifier name into its `name` buffer.
    pub fn assign_names(&mut self) {
        for (&id, joint) in SkeletonJoint::ALL.iter().zip(&mut self.joints) {
            joint.set_name(id.name());
        }
    }
}
