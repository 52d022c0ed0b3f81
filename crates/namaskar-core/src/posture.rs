//! Posture vocabulary, the Surya Namaskar A sequence and display names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Recognizable body configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Posture {
    /// Tadasana, mountain pose
    Standing,
    /// Urdhva Hastasana
    ArmsRaised,
    /// Uttanasana
    ForwardFold,
    /// Ardha Uttanasana
    HalfForwardFold,
    /// Chaturanga Dandasana
    Plank,
    /// Urdhva Mukha Svanasana
    UpwardDog,
    /// Adho Mukha Svanasana
    DownwardDog,
    Unknown,
}

impl Posture {
    pub const RECOGNIZED: [Posture; 7] = [
        Posture::Standing,
        Posture::ArmsRaised,
        Posture::ForwardFold,
        Posture::HalfForwardFold,
        Posture::Plank,
        Posture::UpwardDog,
        Posture::DownwardDog,
    ];

    /// Stable identifier used on the wire and as the translation key
    pub fn identifier(&self) -> &'static str {
        match self {
            Posture::Standing => "Tadasana",
            Posture::ArmsRaised => "Urdhva Hastasana",
            Posture::ForwardFold => "Uttanasana",
            Posture::HalfForwardFold => "Ardha Uttanasana",
            Posture::Plank => "Chaturanga",
            Posture::UpwardDog => "Urdhva Mukha Svanasana",
            Posture::DownwardDog => "Adho Mukha Svanasana",
            Posture::Unknown => "Unknown",
        }
    }

    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::RECOGNIZED
            .iter()
            .chain(std::iter::once(&Posture::Unknown))
            .find(|p| p.identifier() == identifier)
            .copied()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Posture::Unknown)
    }

    pub fn translation(&self) -> Translation<'static> {
        translate(self.identifier())
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Posture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_identifier(s).ok_or_else(|| Error::UnknownPosture(s.to_string()))
    }
}

/// Display renderings of a posture name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Translation<'a> {
    pub sanskrit: &'a str,
    pub spanish: &'a str,
}

const TRANSLATIONS: &[(&str, Translation<'static>)] = &[
    (
        "Tadasana",
        Translation {
            sanskrit: "ताडासन (Tāḍāsana)",
            spanish: "Postura de la Montaña",
        },
    ),
    (
        "Urdhva Hastasana",
        Translation {
            sanskrit: "ऊर्ध्व हस्तासन (Ūrdhva Hastāsana)",
            spanish: "Brazos Elevados",
        },
    ),
    (
        "Uttanasana",
        Translation {
            sanskrit: "उत्तानासन (Uttānāsana)",
            spanish: "Flexión Hacia Adelante",
        },
    ),
    (
        "Ardha Uttanasana",
        Translation {
            sanskrit: "अर्ध उत्तानासन (Ardha Uttānāsana)",
            spanish: "Media Flexión",
        },
    ),
    (
        "Chaturanga",
        Translation {
            sanskrit: "चतुरङ्ग दण्डासन (Chaturanga Daṇḍāsana)",
            spanish: "Postura de Plancha",
        },
    ),
    (
        "Urdhva Mukha Svanasana",
        Translation {
            sanskrit: "ऊर्ध्व मुख श्वानासन (Ūrdhva Mukha Śvānāsana)",
            spanish: "Perro Mirando Hacia Arriba",
        },
    ),
    (
        "Adho Mukha Svanasana",
        Translation {
            sanskrit: "अधो मुख श्वानासन (Adho Mukha Śvānāsana)",
            spanish: "Perro Mirando Hacia Abajo",
        },
    ),
    (
        "Unknown",
        Translation {
            sanskrit: "अज्ञात (Desconocida)",
            spanish: "Desconocida",
        },
    ),
];

/// Look up the display names for a posture identifier.
///
/// Unmapped identifiers render as themselves in both languages.
pub fn translate(identifier: &str) -> Translation<'_> {
    TRANSLATIONS
        .iter()
        .find(|(key, _)| *key == identifier)
        .map(|(_, t)| *t)
        .unwrap_or(Translation {
            sanskrit: identifier,
            spanish: identifier,
        })
}

/// One full Surya Namaskar A cycle. First and last entries coincide.
pub const SURYA_NAMASKAR_A: [Posture; 11] = [
    Posture::Standing,
    Posture::ArmsRaised,
    Posture::ForwardFold,
    Posture::HalfForwardFold,
    Posture::Plank,
    Posture::UpwardDog,
    Posture::DownwardDog,
    Posture::HalfForwardFold,
    Posture::ForwardFold,
    Posture::ArmsRaised,
    Posture::Standing,
];

/// Ordered cycle of postures that makes up one repetition.
///
/// Never empty and never contains `Unknown`; deserialization goes through
/// the same checks as [`SequenceDefinition::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SequenceSteps")]
pub struct SequenceDefinition {
    steps: Vec<Posture>,
}

#[derive(Deserialize)]
struct SequenceSteps {
    steps: Vec<Posture>,
}

impl TryFrom<SequenceSteps> for SequenceDefinition {
    type Error = Error;

    fn try_from(raw: SequenceSteps) -> Result<Self> {
        Self::new(raw.steps)
    }
}

impl SequenceDefinition {
    pub fn new(steps: Vec<Posture>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::InvalidSequence("sequence has no steps".to_string()));
        }
        if let Some(idx) = steps.iter().position(Posture::is_unknown) {
            return Err(Error::InvalidSequence(format!(
                "step {} is Unknown, which can never be confirmed",
                idx
            )));
        }
        Ok(Self { steps })
    }

    pub fn surya_namaskar_a() -> Self {
        Self {
            steps: SURYA_NAMASKAR_A.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Posture> {
        self.steps.get(index).copied()
    }

    pub fn steps(&self) -> &[Posture] {
        &self.steps
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Posture expected at `cursor`, wrapping out-of-range cursors
    pub fn expected(&self, cursor: usize) -> Posture {
        self.steps[cursor % self.steps.len()]
    }

    /// Posture after the one expected at `cursor`
    pub fn upcoming(&self, cursor: usize) -> Posture {
        self.steps[(cursor + 1) % self.steps.len()]
    }

    pub fn is_closed_loop(&self) -> bool {
        self.steps.first() == self.steps.last()
    }
}

impl Default for SequenceDefinition {
    fn default() -> Self {
        Self::surya_namaskar_a()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_roundtrip() {
        for posture in Posture::RECOGNIZED {
            assert_eq!(Posture::from_identifier(posture.identifier()), Some(posture));
        }
        assert_eq!("Unknown".parse::<Posture>().unwrap(), Posture::Unknown);
        assert!("Warrior".parse::<Posture>().is_err());
    }

    #[test]
    fn test_translation_lookup() {
        let t = Posture::DownwardDog.translation();
        assert_eq!(t.spanish, "Perro Mirando Hacia Abajo");
        assert!(t.sanskrit.contains("Adho Mukha"));
    }

    #[test]
    fn test_unmapped_translation_defaults_to_identifier() {
        let t = translate("None");
        assert_eq!(t.sanskrit, "None");
        assert_eq!(t.spanish, "None");
    }

    #[test]
    fn test_every_posture_is_translated() {
        for posture in Posture::RECOGNIZED {
            assert_ne!(posture.translation().spanish, posture.identifier());
        }
    }

    #[test]
    fn test_surya_a_is_closed_loop() {
        let seq = SequenceDefinition::surya_namaskar_a();
        assert_eq!(seq.len(), 11);
        assert!(seq.is_closed_loop());
        assert_eq!(seq.expected(0), Posture::Standing);
        assert_eq!(seq.upcoming(0), Posture::ArmsRaised);
        assert_eq!(seq.upcoming(seq.last_index()), Posture::Standing);
    }

    #[test]
    fn test_sequence_validation() {
        assert!(SequenceDefinition::new(Vec::new()).is_err());
        assert!(SequenceDefinition::new(vec![Posture::Standing, Posture::Unknown]).is_err());
        assert!(SequenceDefinition::new(vec![Posture::Plank]).is_ok());
    }

    #[test]
    fn test_deserialization_is_validated() {
        assert!(serde_json::from_str::<SequenceDefinition>(r#"{"steps":[]}"#).is_err());
        assert!(serde_json::from_str::<SequenceDefinition>(r#"{"steps":["Unknown"]}"#).is_err());

        let seq: SequenceDefinition =
            serde_json::from_str(r#"{"steps":["Plank","DownwardDog"]}"#).unwrap();
        assert_eq!(seq.steps(), &[Posture::Plank, Posture::DownwardDog]);

        let json = serde_json::to_string(&SequenceDefinition::surya_namaskar_a()).unwrap();
        let back: SequenceDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SequenceDefinition::surya_namaskar_a());
    }
}
