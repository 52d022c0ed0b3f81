//! Per-frame geometric features consumed by the posture rules.

use namaskar_core::{BodyLandmark, JointAngles, Landmark, LandmarkFrame};

use crate::config::ClassifierConfig;

/// Joint angles and landmark predicates for one frame
#[derive(Debug, Clone)]
pub struct PoseFeatures<'a> {
    frame: &'a LandmarkFrame,
    min_visibility: f32,
    pub angles: JointAngles,
    pub profile_view: bool,
}

impl<'a> PoseFeatures<'a> {
    pub fn extract(frame: &'a LandmarkFrame, config: &ClassifierConfig) -> Self {
        let min_visibility = config.min_visibility;
        let lookup = move |part: BodyLandmark| visible(frame, part, min_visibility);

        let angles = JointAngles::compute(lookup);

        let profile_view = match (
            lookup(BodyLandmark::LeftShoulder),
            lookup(BodyLandmark::RightShoulder),
        ) {
            (Some(left), Some(right)) => {
                (left.x - right.x).abs() < config.profile_max_shoulder_separation
            }
            _ => false,
        };

        Self {
            frame,
            min_visibility,
            angles,
            profile_view,
        }
    }

    /// Landmark if present and visible enough
    pub fn landmark(&self, part: BodyLandmark) -> Option<&'a Landmark> {
        visible(self.frame, part, self.min_visibility)
    }

    /// True when `lower` sits strictly lower in the frame than `upper`
    pub fn is_below(&self, lower: BodyLandmark, upper: BodyLandmark) -> bool {
        match (self.landmark(lower), self.landmark(upper)) {
            (Some(l), Some(u)) => l.y > u.y,
            _ => false,
        }
    }

    /// Absolute vertical distance between two landmarks
    pub fn vertical_gap(&self, a: BodyLandmark, b: BodyLandmark) -> Option<f64> {
        match (self.landmark(a), self.landmark(b)) {
            (Some(a), Some(b)) => Some((a.y - b.y).abs()),
            _ => None,
        }
    }
}

fn visible(frame: &LandmarkFrame, part: BodyLandmark, min_visibility: f32) -> Option<&Landmark> {
    frame
        .landmark(part)
        .filter(|lm| lm.is_visible(min_visibility))
}

#[cfg(test)]
mod tests {
    use super::*;
    use namaskar_core::FrameDimensions;

    fn frame_with(parts: &[(BodyLandmark, Landmark)]) -> LandmarkFrame {
        let mut frame = LandmarkFrame::new(Vec::new(), FrameDimensions::new(640, 480));
        for (part, lm) in parts {
            frame.set(*part, *lm);
        }
        frame
    }

    #[test]
    fn test_profile_view_from_shoulder_separation() {
        let config = ClassifierConfig::default();
        let side_on = frame_with(&[
            (BodyLandmark::LeftShoulder, Landmark::new(0.50, 0.4)),
            (BodyLandmark::RightShoulder, Landmark::new(0.55, 0.4)),
        ]);
        let facing = frame_with(&[
            (BodyLandmark::LeftShoulder, Landmark::new(0.35, 0.4)),
            (BodyLandmark::RightShoulder, Landmark::new(0.65, 0.4)),
        ]);

        assert!(PoseFeatures::extract(&side_on, &config).profile_view);
        assert!(!PoseFeatures::extract(&facing, &config).profile_view);
    }

    #[test]
    fn test_missing_shoulders_are_not_profile() {
        let frame = LandmarkFrame::default();
        let features = PoseFeatures::extract(&frame, &ClassifierConfig::default());
        assert!(!features.profile_view);
        assert_eq!(features.angles, JointAngles::default());
    }

    #[test]
    fn test_low_visibility_landmarks_are_ignored() {
        let config = ClassifierConfig {
            min_visibility: 0.5,
            ..Default::default()
        };
        let frame = frame_with(&[
            (BodyLandmark::Nose, Landmark::new(0.5, 0.2).with_visibility(0.1)),
            (BodyLandmark::LeftShoulder, Landmark::new(0.5, 0.4).with_visibility(0.9)),
        ]);
        let features = PoseFeatures::extract(&frame, &config);

        assert!(features.landmark(BodyLandmark::Nose).is_none());
        assert!(!features.is_below(BodyLandmark::LeftShoulder, BodyLandmark::Nose));
        assert!(features.vertical_gap(BodyLandmark::Nose, BodyLandmark::LeftShoulder).is_none());
    }

    #[test]
    fn test_vertical_ordering() {
        let frame = frame_with(&[
            (BodyLandmark::Nose, Landmark::new(0.5, 0.2)),
            (BodyLandmark::LeftShoulder, Landmark::new(0.5, 0.4)),
        ]);
        let features = PoseFeatures::extract(&frame, &ClassifierConfig::default());

        assert!(features.is_below(BodyLandmark::LeftShoulder, BodyLandmark::Nose));
        assert!(!features.is_below(BodyLandmark::Nose, BodyLandmark::LeftShoulder));
        let gap = features
            .vertical_gap(BodyLandmark::Nose, BodyLandmark::LeftShoulder)
            .unwrap();
        assert!((gap - 0.2).abs() < 1e-9);
    }
}
