//! Posture rules as an ordered decision list.
//!
//! Each [`PostureRule`] is a conjunction of [`Requirement`]s. A [`RuleSet`]
//! evaluates its rules in order and the first one that holds wins, so the
//! order of the list is the tie-break policy.

use serde::{Deserialize, Serialize};

use namaskar_core::{BodyLandmark, Joint, Posture, Side};

use crate::config::ClassifierConfig;
use crate::features::PoseFeatures;

/// Inclusive window `target ± tolerance`, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleWindow {
    pub target: f64,
    pub tolerance: f64,
}

impl AngleWindow {
    pub const fn new(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }

    pub fn contains(&self, angle: f64) -> bool {
        (angle - self.target).abs() <= self.tolerance
    }
}

/// A single condition of a posture rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Requirement {
    /// Both the left and the right joint fall inside the window
    Bilateral { joint: Joint, window: AngleWindow },
    /// At least one side falls inside the window
    EitherSide { joint: Joint, window: AngleWindow },
    /// Subject is side-on to the camera
    ProfileView,
    /// Two landmarks sit at nearly the same height
    Level {
        a: BodyLandmark,
        b: BodyLandmark,
        tolerance: f64,
    },
    /// `lower` is strictly lower in the frame than `upper`
    Below {
        lower: BodyLandmark,
        upper: BodyLandmark,
    },
}

impl Requirement {
    pub fn holds(&self, features: &PoseFeatures<'_>) -> bool {
        match *self {
            Requirement::Bilateral { joint, window } => Side::BOTH
                .iter()
                .all(|&side| window.contains(features.angles.get(joint, side))),
            Requirement::EitherSide { joint, window } => Side::BOTH
                .iter()
                .any(|&side| window.contains(features.angles.get(joint, side))),
            Requirement::ProfileView => features.profile_view,
            Requirement::Level { a, b, tolerance } => features
                .vertical_gap(a, b)
                .is_some_and(|gap| gap < tolerance),
            Requirement::Below { lower, upper } => features.is_below(lower, upper),
        }
    }
}

/// A posture and the conditions that identify it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureRule {
    pub posture: Posture,
    pub requirements: Vec<Requirement>,
}

impl PostureRule {
    pub fn new(posture: Posture, requirements: Vec<Requirement>) -> Self {
        Self {
            posture,
            requirements,
        }
    }

    pub fn matches(&self, features: &PoseFeatures<'_>) -> bool {
        self.requirements.iter().all(|r| r.holds(features))
    }
}

/// Ordered list of posture rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<PostureRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PostureRule>) -> Self {
        Self { rules }
    }

    /// Rules for the postures of Surya Namaskar A, in priority order
    pub fn surya_namaskar_a(config: &ClassifierConfig) -> Self {
        use BodyLandmark::*;
        use Requirement::*;

        let both = |joint, target, tolerance| Bilateral {
            joint,
            window: AngleWindow::new(target, tolerance),
        };

        Self::new(vec![
            PostureRule::new(
                Posture::Standing,
                vec![
                    both(Joint::Elbow, 180.0, 25.0),
                    both(Joint::Shoulder, 40.0, 35.0),
                    both(Joint::Hip, 180.0, 30.0),
                    both(Joint::Knee, 180.0, 25.0),
                ],
            ),
            PostureRule::new(
                Posture::ArmsRaised,
                vec![
                    both(Joint::Shoulder, 180.0, 35.0),
                    both(Joint::Elbow, 180.0, 25.0),
                    both(Joint::Knee, 180.0, 25.0),
                ],
            ),
            PostureRule::new(
                Posture::ForwardFold,
                vec![both(Joint::Hip, 90.0, 30.0), both(Joint::Knee, 180.0, 25.0)],
            ),
            PostureRule::new(
                Posture::HalfForwardFold,
                vec![
                    both(Joint::Hip, 90.0, 40.0),
                    both(Joint::Knee, 180.0, 25.0),
                    EitherSide {
                        joint: Joint::Shoulder,
                        window: AngleWindow::new(90.0, 45.0),
                    },
                ],
            ),
            PostureRule::new(
                Posture::Plank,
                vec![
                    ProfileView,
                    both(Joint::Elbow, 90.0, 30.0),
                    Level {
                        a: LeftShoulder,
                        b: RightHip,
                        tolerance: config.torso_level_tolerance,
                    },
                    Below {
                        lower: RightHip,
                        upper: RightKnee,
                    },
                    Below {
                        lower: LeftShoulder,
                        upper: Nose,
                    },
                ],
            ),
            PostureRule::new(
                Posture::UpwardDog,
                vec![
                    ProfileView,
                    both(Joint::Elbow, 165.0, 30.0),
                    Below {
                        lower: RightHip,
                        upper: LeftShoulder,
                    },
                    Below {
                        lower: RightKnee,
                        upper: RightHip,
                    },
                    Below {
                        lower: LeftShoulder,
                        upper: Nose,
                    },
                ],
            ),
            PostureRule::new(
                Posture::DownwardDog,
                vec![
                    ProfileView,
                    both(Joint::Elbow, 180.0, 30.0),
                    Below {
                        lower: LeftShoulder,
                        upper: RightHip,
                    },
                    Below {
                        lower: RightHip,
                        upper: RightKnee,
                    },
                    Below {
                        lower: Nose,
                        upper: LeftShoulder,
                    },
                ],
            ),
        ])
    }

    /// First matching rule as `(index, posture)`
    pub fn evaluate(&self, features: &PoseFeatures<'_>) -> Option<(usize, Posture)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(features))
            .map(|(idx, rule)| (idx, rule.posture))
    }

    pub fn rules(&self) -> &[PostureRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::surya_namaskar_a(&ClassifierConfig::default())
    }
}
