//! Angle-based posture classifier.

use serde::Serialize;

use namaskar_core::{JointAngles, LandmarkFrame, Posture};

use crate::config::ClassifierConfig;
use crate::features::PoseFeatures;
use crate::rules::RuleSet;

/// Outcome of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub posture: Posture,
    /// Index of the rule that matched, if any
    pub rule_index: Option<usize>,
    pub angles: JointAngles,
    pub profile_view: bool,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            posture: Posture::Unknown,
            rule_index: None,
            angles: JointAngles::default(),
            profile_view: false,
        }
    }
}

/// Maps a landmark frame to a posture using an ordered rule list
#[derive(Debug, Clone)]
pub struct AngleClassifier {
    config: ClassifierConfig,
    rules: RuleSet,
}

impl AngleClassifier {
    /// Classifier with the Surya Namaskar A rules
    pub fn new(config: ClassifierConfig) -> Self {
        let rules = RuleSet::surya_namaskar_a(&config);
        Self { config, rules }
    }

    pub fn with_rules(config: ClassifierConfig, rules: RuleSet) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify one frame. Pure and infallible: anything the rules cannot
    /// make sense of comes back as `Unknown`.
    ///
    /// Frame dimensions are carried for callers but every comparison here is
    /// made in normalized coordinates.
    pub fn classify(&self, frame: &LandmarkFrame) -> Classification {
        if frame.is_empty() {
            return Classification::unknown();
        }

        let features = PoseFeatures::extract(frame, &self.config);
        let matched = self.rules.evaluate(&features);

        let classification = Classification {
            posture: matched.map_or(Posture::Unknown, |(_, posture)| posture),
            rule_index: matched.map(|(idx, _)| idx),
            angles: features.angles,
            profile_view: features.profile_view,
        };

        tracing::trace!(
            posture = %classification.posture,
            profile = classification.profile_view,
            "frame classified"
        );

        classification
    }
}

impl Default for AngleClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PostureRule;
    use crate::synthetic::{canonical_frame, FrontPose};
    use namaskar_core::{BodyLandmark, FrameDimensions, Landmark};

    const STANDING: FrontPose = FrontPose::new(180.0, 40.0, 180.0, 180.0);

    #[test]
    fn test_canonical_frames_classify_as_their_posture() {
        let classifier = AngleClassifier::default();
        for posture in Posture::RECOGNIZED {
            let frame = canonical_frame(posture).unwrap();
            let result = classifier.classify(&frame);
            assert_eq!(result.posture, posture, "angles: {:?}", result.angles);
            assert!(result.rule_index.is_some());
        }
    }

    #[test]
    fn test_standing_target_angles() {
        let classifier = AngleClassifier::default();
        let result = classifier.classify(&STANDING.to_frame());
        assert_eq!(result.posture, Posture::Standing);
        assert_eq!(result.rule_index, Some(0));
    }

    #[test]
    fn test_standing_survives_perturbation_within_tolerance() {
        let classifier = AngleClassifier::default();
        let inside = [
            FrontPose { elbow: 160.0, ..STANDING },
            FrontPose { shoulder: 70.0, ..STANDING },
            FrontPose { hip: 155.0, ..STANDING },
            FrontPose { knee: 160.0, ..STANDING },
        ];
        for pose in inside {
            assert_eq!(
                classifier.classify(&pose.to_frame()).posture,
                Posture::Standing,
                "{:?}",
                pose
            );
        }
    }

    #[test]
    fn test_standing_breaks_when_any_angle_leaves_its_window() {
        let classifier = AngleClassifier::default();
        let outside = [
            FrontPose { elbow: 150.0, ..STANDING },
            FrontPose { shoulder: 80.0, ..STANDING },
            FrontPose { hip: 145.0, ..STANDING },
            FrontPose { knee: 150.0, ..STANDING },
        ];
        for pose in outside {
            assert_ne!(
                classifier.classify(&pose.to_frame()).posture,
                Posture::Standing,
                "{:?}",
                pose
            );
        }
    }

    #[test]
    fn test_standing_and_arms_raised_windows_are_disjoint() {
        let rules = RuleSet::default();
        let shoulder_window = |idx: usize| {
            rules.rules()[idx]
                .requirements
                .iter()
                .find_map(|r| match r {
                    crate::Requirement::Bilateral {
                        joint: namaskar_core::Joint::Shoulder,
                        window,
                    } => Some(*window),
                    _ => None,
                })
                .unwrap()
        };
        let standing = shoulder_window(0);
        let arms_raised = shoulder_window(1);
        for degrees in 0..=180 {
            let angle = degrees as f64;
            assert!(!(standing.contains(angle) && arms_raised.contains(angle)));
        }
    }

    #[test]
    fn test_earlier_rule_wins_when_both_match() {
        // Hip 90 with shoulder 90 satisfies both fold rules
        let frame = FrontPose::new(180.0, 90.0, 90.0, 180.0).to_frame();

        let classifier = AngleClassifier::default();
        assert_eq!(classifier.classify(&frame).posture, Posture::ForwardFold);

        let mut reordered: Vec<PostureRule> = classifier.rules().rules().to_vec();
        reordered.swap(2, 3);
        let swapped =
            AngleClassifier::with_rules(ClassifierConfig::default(), RuleSet::new(reordered));
        assert_eq!(swapped.classify(&frame).posture, Posture::HalfForwardFold);
    }

    #[test]
    fn test_empty_frame_is_unknown() {
        let classifier = AngleClassifier::default();
        let result = classifier.classify(&LandmarkFrame::default());
        assert_eq!(result, Classification::unknown());
    }

    #[test]
    fn test_missing_lower_body_is_unknown() {
        let classifier = AngleClassifier::default();
        let mut frame = STANDING.to_frame();
        frame.landmarks.truncate(BodyLandmark::LeftHip.index());
        assert_eq!(classifier.classify(&frame).posture, Posture::Unknown);
    }

    #[test]
    fn test_profile_posture_needs_profile_view() {
        let classifier = AngleClassifier::default();
        let mut frame = canonical_frame(Posture::Plank).unwrap();
        frame.set(BodyLandmark::RightShoulder, Landmark::new(0.70, 0.50));
        assert_ne!(classifier.classify(&frame).posture, Posture::Plank);
    }

    /// Canonical frame for `posture` with one landmark moved vertically
    fn with_y(posture: Posture, part: BodyLandmark, y: f64) -> LandmarkFrame {
        let mut frame = canonical_frame(posture).unwrap();
        let moved = Landmark {
            y,
            ..*frame.landmark(part).unwrap()
        };
        frame.set(part, moved);
        frame
    }

    #[test]
    fn test_half_fold_needs_only_one_shoulder() {
        use BodyLandmark::*;

        let classifier = AngleClassifier::default();
        let one_arm_forward = FrontPose::new(180.0, 90.0, 125.0, 180.0).to_frame();
        let arms_down = FrontPose::new(180.0, 20.0, 125.0, 180.0).to_frame();

        // Left side reaching forward, right arm hanging
        let mut frame = one_arm_forward.clone();
        for part in [RightShoulder, RightElbow, RightWrist, RightHip, RightKnee, RightAnkle] {
            frame.set(part, *arms_down.landmark(part).unwrap());
        }

        let result = classifier.classify(&frame);
        assert!((result.angles.left_shoulder - 90.0).abs() < 1e-6);
        assert!((result.angles.right_shoulder - 20.0).abs() < 1e-6);
        assert_eq!(result.posture, Posture::HalfForwardFold);

        assert_eq!(classifier.classify(&arms_down).posture, Posture::Unknown);
    }

    #[test]
    fn test_plank_vertical_predicates() {
        let classifier = AngleClassifier::default();
        let broken = [
            // nose below the shoulder
            with_y(Posture::Plank, BodyLandmark::Nose, 0.55),
            // knee below the hip
            with_y(Posture::Plank, BodyLandmark::RightKnee, 0.60),
            // torso no longer level
            with_y(Posture::Plank, BodyLandmark::RightHip, 0.70),
        ];
        for frame in broken {
            assert_eq!(classifier.classify(&frame).posture, Posture::Unknown);
        }
    }

    #[test]
    fn test_upward_dog_vertical_predicates() {
        let classifier = AngleClassifier::default();
        let broken = [
            // knee above the hip
            with_y(Posture::UpwardDog, BodyLandmark::RightKnee, 0.60),
            // hip above the shoulder
            with_y(Posture::UpwardDog, BodyLandmark::RightHip, 0.35),
            // nose below the shoulder
            with_y(Posture::UpwardDog, BodyLandmark::Nose, 0.45),
        ];
        for frame in broken {
            assert_eq!(classifier.classify(&frame).posture, Posture::Unknown);
        }
    }

    #[test]
    fn test_downward_dog_vertical_predicates() {
        let classifier = AngleClassifier::default();
        let broken = [
            // nose above the shoulder
            with_y(Posture::DownwardDog, BodyLandmark::Nose, 0.50),
            // hip below the shoulder
            with_y(Posture::DownwardDog, BodyLandmark::RightHip, 0.65),
            // knee below the hip
            with_y(Posture::DownwardDog, BodyLandmark::RightKnee, 0.40),
        ];
        for frame in broken {
            assert_eq!(classifier.classify(&frame).posture, Posture::Unknown);
        }
    }

    #[test]
    fn test_arbitrary_frames_never_panic() {
        let classifier = AngleClassifier::default();
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 10_000) as f64 / 10_000.0
        };

        for n in 0..500 {
            let count = n % (BodyLandmark::COUNT + 1);
            let landmarks = (0..count).map(|_| Landmark::new(next(), next())).collect();
            let frame = LandmarkFrame::new(landmarks, FrameDimensions::new(640, 480));
            let result = classifier.classify(&frame);
            assert!(result.posture.is_unknown() || Posture::RECOGNIZED.contains(&result.posture));
        }

        let mut poisoned = STANDING.to_frame();
        poisoned.set(BodyLandmark::LeftKnee, Landmark::new(f64::NAN, f64::INFINITY));
        assert_eq!(classifier.classify(&poisoned).posture, Posture::Unknown);
    }
}
