//! Geometric utilities for joint-angle computations.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::types::{BodyLandmark, Landmark};

/// Rays shorter than this are treated as degenerate
const MIN_RAY_LENGTH: f64 = 1e-12;

/// Unsigned angle at vertex `b` formed by the rays `b→a` and `b→c`, in degrees.
///
/// The result is the difference of the two rays' polar angles folded into
/// `[0, 180]`. A missing point or a zero-length ray yields `0.0`, which fails
/// every "nearly straight" window and so biases classification toward Unknown.
/// Non-finite coordinates are treated the same way.
pub fn compute_angle(a: Option<&Landmark>, b: Option<&Landmark>, c: Option<&Landmark>) -> f64 {
    let (Some(a), Some(b), Some(c)) = (a, b, c) else {
        return 0.0;
    };
    if [a, b, c].iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return 0.0;
    }

    let vertex = b.to_point2();
    let ray_a: Vector2<f64> = a.to_point2() - vertex;
    let ray_c: Vector2<f64> = c.to_point2() - vertex;

    if ray_a.norm() < MIN_RAY_LENGTH || ray_c.norm() < MIN_RAY_LENGTH {
        return 0.0;
    }

    let radians = ray_c.y.atan2(ray_c.x) - ray_a.y.atan2(ray_a.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Body side of a bilateral joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}

/// Joints whose flexion angle drives posture classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// shoulder–elbow–wrist
    Elbow,
    /// hip–shoulder–elbow
    Shoulder,
    /// shoulder–hip–knee
    Hip,
    /// hip–knee–ankle
    Knee,
}

impl Joint {
    pub const ALL: [Joint; 4] = [Joint::Elbow, Joint::Shoulder, Joint::Hip, Joint::Knee];

    /// Landmarks `(a, vertex, c)` that define this joint's angle on one side
    pub fn landmarks(self, side: Side) -> (BodyLandmark, BodyLandmark, BodyLandmark) {
        use BodyLandmark::*;
        match (self, side) {
            (Joint::Elbow, Side::Left) => (LeftShoulder, LeftElbow, LeftWrist),
            (Joint::Elbow, Side::Right) => (RightShoulder, RightElbow, RightWrist),
            (Joint::Shoulder, Side::Left) => (LeftHip, LeftShoulder, LeftElbow),
            (Joint::Shoulder, Side::Right) => (RightHip, RightShoulder, RightElbow),
            (Joint::Hip, Side::Left) => (LeftShoulder, LeftHip, LeftKnee),
            (Joint::Hip, Side::Right) => (RightShoulder, RightHip, RightKnee),
            (Joint::Knee, Side::Left) => (LeftHip, LeftKnee, LeftAnkle),
            (Joint::Knee, Side::Right) => (RightHip, RightKnee, RightAnkle),
        }
    }
}

/// The eight joint angles of one frame, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub left_elbow: f64,
    pub right_elbow: f64,
    pub left_shoulder: f64,
    pub right_shoulder: f64,
    pub left_hip: f64,
    pub right_hip: f64,
    pub left_knee: f64,
    pub right_knee: f64,
}

impl JointAngles {
    /// Compute every joint angle using `lookup` to resolve landmarks
    pub fn compute<'a, F>(lookup: F) -> Self
    where
        F: Fn(BodyLandmark) -> Option<&'a Landmark>,
    {
        let mut angles = Self::default();
        for joint in Joint::ALL {
            for side in Side::BOTH {
                let (a, b, c) = joint.landmarks(side);
                angles.set(joint, side, compute_angle(lookup(a), lookup(b), lookup(c)));
            }
        }
        angles
    }

    pub fn get(&self, joint: Joint, side: Side) -> f64 {
        match (joint, side) {
            (Joint::Elbow, Side::Left) => self.left_elbow,
            (Joint::Elbow, Side::Right) => self.right_elbow,
            (Joint::Shoulder, Side::Left) => self.left_shoulder,
            (Joint::Shoulder, Side::Right) => self.right_shoulder,
            (Joint::Hip, Side::Left) => self.left_hip,
            (Joint::Hip, Side::Right) => self.right_hip,
            (Joint::Knee, Side::Left) => self.left_knee,
            (Joint::Knee, Side::Right) => self.right_knee,
        }
    }

    pub fn set(&mut self, joint: Joint, side: Side, degrees: f64) {
        let slot = match (joint, side) {
            (Joint::Elbow, Side::Left) => &mut self.left_elbow,
            (Joint::Elbow, Side::Right) => &mut self.right_elbow,
            (Joint::Shoulder, Side::Left) => &mut self.left_shoulder,
            (Joint::Shoulder, Side::Right) => &mut self.right_shoulder,
            (Joint::Hip, Side::Left) => &mut self.left_hip,
            (Joint::Hip, Side::Right) => &mut self.right_hip,
            (Joint::Knee, Side::Left) => &mut self.left_knee,
            (Joint::Knee, Side::Right) => &mut self.right_knee,
        };
        *slot = degrees;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f64, y: f64) -> Landmark {
        Landmark::new(x, y)
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = compute_angle(Some(&lm(0.0, 0.0)), Some(&lm(0.5, 0.0)), Some(&lm(1.0, 0.0)));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_right_angle() {
        let angle = compute_angle(Some(&lm(0.0, 0.0)), Some(&lm(0.5, 0.0)), Some(&lm(0.5, 0.5)));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflex_difference_is_folded() {
        // Polar angles of 170° and -170° differ by 340°, which folds to 20°
        let b = lm(0.0, 0.0);
        let a = lm(-1.0, (10.0f64).to_radians().tan());
        let c = lm(-1.0, -(10.0f64).to_radians().tan());
        let angle = compute_angle(Some(&a), Some(&b), Some(&c));
        assert!((angle - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_under_ray_swap() {
        let points = [
            (lm(0.1, 0.9), lm(0.4, 0.4), lm(0.8, 0.2)),
            (lm(0.3, 0.1), lm(0.3, 0.5), lm(0.2, 0.9)),
            (lm(0.9, 0.9), lm(0.5, 0.5), lm(0.1, 0.6)),
            (lm(0.0, 0.5), lm(0.5, 0.5), lm(0.49, 0.1)),
        ];
        for (a, b, c) in points.iter() {
            let forward = compute_angle(Some(a), Some(b), Some(c));
            let backward = compute_angle(Some(c), Some(b), Some(a));
            assert!((forward - backward).abs() < 1e-9);
            assert!((0.0..=180.0).contains(&forward));
        }
    }

    #[test]
    fn test_degenerate_rays_yield_zero() {
        let b = lm(0.4, 0.4);
        let other = lm(0.9, 0.1);
        assert_eq!(compute_angle(Some(&b), Some(&b), Some(&other)), 0.0);
        assert_eq!(compute_angle(Some(&other), Some(&b), Some(&b)), 0.0);
    }

    #[test]
    fn test_missing_point_yields_zero() {
        let p = lm(0.2, 0.2);
        assert_eq!(compute_angle(None, Some(&p), Some(&p)), 0.0);
        assert_eq!(compute_angle(Some(&p), None, Some(&p)), 0.0);
        assert_eq!(compute_angle(Some(&p), Some(&p), None), 0.0);
    }

    #[test]
    fn test_non_finite_coordinates_yield_zero() {
        let nan = lm(f64::NAN, 0.5);
        let angle = compute_angle(Some(&nan), Some(&lm(0.5, 0.5)), Some(&lm(0.9, 0.5)));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_joint_angles_get_set() {
        let mut angles = JointAngles::default();
        for joint in Joint::ALL {
            for side in Side::BOTH {
                angles.set(joint, side, 42.0);
                assert_eq!(angles.get(joint, side), 42.0);
            }
        }
    }

    #[test]
    fn test_joint_angles_compute_with_no_landmarks() {
        let angles = JointAngles::compute(|_| None);
        assert_eq!(angles, JointAngles::default());
    }
}
