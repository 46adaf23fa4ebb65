use {crate::TrackingError, nalgebra as na, std::ops::Sub};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingVector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrackingVector3 {
    pub const ZERO: Self = TrackingVector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        TrackingVector3 { x, y, z }
    }

    /// Returns component by index. `0` is `x`, `2` is `z`.
    pub fn get(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            _ => None,
        }
    }

    pub fn set(
        &mut self,
        index: usize,
        value: f64,
    ) -> Result<(), TrackingError> {
        let component = match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => {
                return Err(TrackingError::ComponentOutOfRange {
                    index,
                    max: 2,
                })
            }
        };
        *component = value;
        Ok(())
    }
}

impl Sub for TrackingVector3 {
    type Output = TrackingVector3;

    fn sub(self, rhs: TrackingVector3) -> TrackingVector3 {
        TrackingVector3 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl From<[f64; 3]> for TrackingVector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        TrackingVector3 { x, y, z }
    }
}

impl From<na::Vector3<f64>> for TrackingVector3 {
    fn from(v: na::Vector3<f64>) -> Self {
        TrackingVector3::new(v.x, v.y, v.z)
    }
}

impl From<TrackingVector3> for na::Vector3<f64> {
    fn from(v: TrackingVector3) -> Self {
        na::Vector3::new(v.x, v.y, v.z)
    }
}

/// Rotation quaternion with scalar part first.
///
/// Expected to be of unit length, but nothing enforces it.
/// See `is_unit`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackingVector4 {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrackingVector4 {
    /// Degenerate all-zero quaternion.
    pub const ZERO: Self = TrackingVector4 {
        w: 0.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const IDENTITY: Self = TrackingVector4 {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        TrackingVector4 { w, x, y, z }
    }

    /// Returns component by index. `0` is `w`, `3` is `z`.
    pub fn get(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.w),
            1 => Some(self.x),
            2 => Some(self.y),
            3 => Some(self.z),
            _ => None,
        }
    }

    pub fn set(
        &mut self,
        index: usize,
        value: f64,
    ) -> Result<(), TrackingError> {
        let component = match index {
            0 => &mut self.w,
            1 => &mut self.x,
            2 => &mut self.y,
            3 => &mut self.z,
            _ => {
                return Err(TrackingError::ComponentOutOfRange {
                    index,
                    max: 3,
                })
            }
        };
        *component = value;
        Ok(())
    }

    /// Checks that quaternion norm is within `epsilon` of one.
    pub fn is_unit(&self, epsilon: f64) -> bool {
        let norm = na::Quaternion::from(*self).norm();
        (norm - 1.0).abs() <= epsilon
    }
}

impl From<[f64; 4]> for TrackingVector4 {
    fn from([w, x, y, z]: [f64; 4]) -> Self {
        TrackingVector4 { w, x, y, z }
    }
}

impl From<na::Quaternion<f64>> for TrackingVector4 {
    fn from(q: na::Quaternion<f64>) -> Self {
        let imag = q.imag();
        TrackingVector4::new(q.scalar(), imag.x, imag.y, imag.z)
    }
}

impl From<TrackingVector4> for na::Quaternion<f64> {
    fn from(q: TrackingVector4) -> Self {
        na::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_access_is_checked() {
        let mut v = TrackingVector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(2), Some(3.0));
        assert_eq!(v.get(3), None);
        assert_eq!(
            v.set(3, 0.0),
            Err(TrackingError::ComponentOutOfRange { index: 3, max: 2 })
        );
        v.set(0, 5.0).unwrap();
        assert_eq!(v, TrackingVector3::new(5.0, 2.0, 3.0));

        let mut q = TrackingVector4::IDENTITY;
        assert_eq!(q.get(0), Some(1.0));
        assert_eq!(q.get(4), None);
        assert!(q.set(4, 1.0).is_err());
        q.set(3, 0.5).unwrap();
        assert_eq!(q.z, 0.5);
    }

    #[test]
    fn subtraction_is_componentwise() {
        let a = TrackingVector3::new(1.1, 1.2, 1.3);
        let b = TrackingVector3::new(0.1, 0.2, 0.3);
        let d = a - b;
        assert!((d.x - 1.0).abs() < 1e-12);
        assert!((d.y - 1.0).abs() < 1e-12);
        assert!((d.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unit_check() {
        assert!(TrackingVector4::IDENTITY.is_unit(1e-9));
        assert!(!TrackingVector4::ZERO.is_unit(1e-9));

        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert!(TrackingVector4::new(half, 0.0, half, 0.0).is_unit(1e-9));
    }

    #[test]
    fn nalgebra_quaternion_keeps_scalar_first() {
        let q = TrackingVector4::new(0.1, 0.2, 0.3, 0.4);
        let na_q: na::Quaternion<f64> = q.into();
        assert_eq!(na_q.scalar(), 0.1);
        assert_eq!(TrackingVector4::from(na_q), q);
    }
}
