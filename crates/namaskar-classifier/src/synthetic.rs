//! Synthetic landmark frames.
//!
//! Builds skeletons with known joint angles for demos, benchmarks and
//! tests. Front-view frames are posed from target angles; the profile
//! postures use fixed side-on layouts.

use namaskar_core::{BodyLandmark, FrameDimensions, Landmark, LandmarkFrame, Posture, Side};

const HIP_Y: f64 = 0.55;
const THIGH: f64 = 0.2;
const SHIN: f64 = 0.2;
const TORSO: f64 = 0.3;
const UPPER_ARM: f64 = 0.15;
const FOREARM: f64 = 0.15;

/// Target joint angles (degrees) for a front-view skeleton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontPose {
    pub elbow: f64,
    pub shoulder: f64,
    pub hip: f64,
    pub knee: f64,
}

impl FrontPose {
    pub const fn new(elbow: f64, shoulder: f64, hip: f64, knee: f64) -> Self {
        Self {
            elbow,
            shoulder,
            hip,
            knee,
        }
    }

    /// Lay out both sides of the body so every joint hits its target angle
    pub fn to_frame(&self) -> LandmarkFrame {
        let mut frame = LandmarkFrame::new(Vec::new(), FrameDimensions::new(640, 480));
        let mut shoulders = Vec::with_capacity(2);

        for side in Side::BOTH {
            let (sign, hip_x, parts) = match side {
                Side::Left => (1.0, 0.38, LEFT),
                Side::Right => (-1.0, 0.62, RIGHT),
            };

            let hip = (hip_x, HIP_Y);
            let knee = (hip.0, hip.1 + THIGH);
            let shoulder = offset(hip, rotate((0.0, 1.0), sign * self.hip), TORSO);
            let ankle = offset(knee, rotate((0.0, -1.0), sign * self.knee), SHIN);
            let elbow = offset(
                shoulder,
                rotate(unit(shoulder, hip), sign * self.shoulder),
                UPPER_ARM,
            );
            let wrist = offset(
                elbow,
                rotate(unit(elbow, shoulder), sign * self.elbow),
                FOREARM,
            );

            for (part, point) in parts.iter().zip([shoulder, elbow, wrist, hip, knee, ankle]) {
                frame.set(*part, Landmark::new(point.0, point.1).with_visibility(0.99));
            }
            shoulders.push(shoulder);
        }

        let nose_x = (shoulders[0].0 + shoulders[1].0) / 2.0;
        let nose_y = shoulders[0].1.min(shoulders[1].1) - 0.1;
        frame.set(BodyLandmark::Nose, Landmark::new(nose_x, nose_y).with_visibility(0.99));
        frame
    }
}

const LEFT: [BodyLandmark; 6] = [
    BodyLandmark::LeftShoulder,
    BodyLandmark::LeftElbow,
    BodyLandmark::LeftWrist,
    BodyLandmark::LeftHip,
    BodyLandmark::LeftKnee,
    BodyLandmark::LeftAnkle,
];

const RIGHT: [BodyLandmark; 6] = [
    BodyLandmark::RightShoulder,
    BodyLandmark::RightElbow,
    BodyLandmark::RightWrist,
    BodyLandmark::RightHip,
    BodyLandmark::RightKnee,
    BodyLandmark::RightAnkle,
];

/// Side-on layout: left-side coordinates, mirrored 0.01 to the right
fn profile_frame(nose: (f64, f64), left: [(f64, f64); 6]) -> LandmarkFrame {
    let mut frame = LandmarkFrame::new(Vec::new(), FrameDimensions::new(640, 480));
    frame.set(BodyLandmark::Nose, Landmark::new(nose.0, nose.1).with_visibility(0.99));
    for ((l, r), (x, y)) in LEFT.iter().zip(RIGHT.iter()).zip(left) {
        frame.set(*l, Landmark::new(x, y).with_visibility(0.99));
        frame.set(*r, Landmark::new(x + 0.01, y).with_visibility(0.9));
    }
    frame
}

/// A frame that classifies as `posture` under the default rules.
///
/// Returns `None` for `Unknown`.
pub fn canonical_frame(posture: Posture) -> Option<LandmarkFrame> {
    let frame = match posture {
        Posture::Standing => FrontPose::new(180.0, 40.0, 180.0, 180.0).to_frame(),
        Posture::ArmsRaised => FrontPose::new(180.0, 180.0, 180.0, 180.0).to_frame(),
        Posture::ForwardFold => FrontPose::new(180.0, 90.0, 90.0, 180.0).to_frame(),
        Posture::HalfForwardFold => FrontPose::new(180.0, 90.0, 125.0, 180.0).to_frame(),
        // shoulder, elbow, wrist, hip, knee, ankle
        Posture::Plank => profile_frame(
            (0.22, 0.45),
            [
                (0.30, 0.50),
                (0.30, 0.65),
                (0.20, 0.65),
                (0.55, 0.52),
                (0.73, 0.50),
                (0.90, 0.55),
            ],
        ),
        Posture::UpwardDog => profile_frame(
            (0.25, 0.30),
            [
                (0.30, 0.40),
                (0.30, 0.52),
                (0.30, 0.64),
                (0.55, 0.66),
                (0.74, 0.68),
                (0.92, 0.70),
            ],
        ),
        Posture::DownwardDog => profile_frame(
            (0.28, 0.68),
            [
                (0.30, 0.60),
                (0.25, 0.70),
                (0.20, 0.80),
                (0.50, 0.30),
                (0.59, 0.25),
                (0.75, 0.60),
            ],
        ),
        Posture::Unknown => return None,
    };
    Some(frame)
}

fn rotate(v: (f64, f64), degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (v.0 * cos - v.1 * sin, v.0 * sin + v.1 * cos)
}

fn unit(from: (f64, f64), to: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    (dx / len, dy / len)
}

fn offset(origin: (f64, f64), direction: (f64, f64), length: f64) -> (f64, f64) {
    (origin.0 + direction.0 * length, origin.1 + direction.1 * length)
}
