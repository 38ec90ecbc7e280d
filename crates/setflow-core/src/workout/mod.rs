//! Workout document model.
//!
//! Workout documents come from a loosely-typed editor: numeric fields such as
//! `sets`, `quantity`, `duration` and `rest` may arrive as numbers or as
//! strings ("3", "45"). [`Scalar`] keeps the raw value and centralizes the
//! coercion rules so the flattener and the duration aggregation can never
//! disagree on parsing.
//!
//! Older documents encode exercises as a flat list without sections;
//! [`Workout::normalized`] folds those into a single synthetic section.

mod flatten;

pub use flatten::{flatten, total_duration_secs, Activity, ActivityKind};

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A numeric-or-raw value as found in workout documents.
///
/// Coercion policy (shared by every consumer):
/// - [`Scalar::secs`]: seconds; unparseable or negative values collapse to 0
/// - [`Scalar::set_count`]: set counts; unparseable or < 1 collapses to 1
/// - [`Scalar::is_truthy`]: non-zero number or non-empty string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Num(f64),
    Raw(String),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Num(n) => Some(*n),
            Scalar::Raw(s) => s.trim().parse().ok(),
        }
    }

    /// Coerce to a duration in whole seconds. Unparseable, non-finite or
    /// negative values collapse to 0. Fractional values are floored: the
    /// source documents can carry "30.5", but the timer ticks in whole
    /// seconds, so the fraction is dropped here rather than at every
    /// consumer.
    pub fn secs(&self) -> u64 {
        match self.as_f64() {
            Some(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
            _ => 0,
        }
    }

    /// Coerce to a set count. Unparseable, non-finite or sub-1 values
    /// collapse to 1, so a malformed exercise still plays one set.
    pub fn set_count(&self) -> u32 {
        match self.as_f64() {
            Some(n) if n.is_finite() && n >= 1.0 => n.floor() as u32,
            _ => 1,
        }
    }

    /// Truthiness of the raw value: any non-zero number, any non-empty
    /// string. Note "0" as a string is truthy, like the source documents
    /// expect.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Num(n) => *n != 0.0,
            Scalar::Raw(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Num(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Scalar::Num(n) => write!(f, "{n}"),
            Scalar::Raw(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Num(n)
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Scalar::Num(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Raw(s.to_string())
    }
}

/// How an exercise is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Repetition-counted; the timer waits for explicit confirmation.
    #[default]
    Reps,
    /// Time-boxed; the timer counts the duration down and auto-advances.
    Time,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Scalar>,
    /// Missing in older documents; defaults to reps.
    #[serde(default)]
    pub unit: Unit,
    /// Legacy field, folded into `quantity` by [`Workout::normalized`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Scalar>,
    /// Seconds per set when `unit` is time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Scalar>,
    /// Rest seconds after each set, including the last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Stored aggregate duration in seconds; only authoritative for legacy
    /// flat-exercise documents.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub calories: u64,
    /// Legacy flat exercise list (pre-sections documents).
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl Workout {
    /// Load a workout document from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::WorkoutNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Normalize a legacy flat-exercise workout into the sections format.
    ///
    /// Workouts that already carry sections are returned unchanged. Legacy
    /// exercises get their set count defaulted to 1 and their `reps` field
    /// folded into `quantity`.
    pub fn normalized(mut self) -> Self {
        if matches!(self.sections.as_deref(), Some(s) if !s.is_empty()) {
            return self;
        }
        if self.exercises.is_empty() {
            return self;
        }
        let exercises = self
            .exercises
            .iter()
            .cloned()
            .map(|mut ex| {
                if !ex.sets.as_ref().is_some_and(Scalar::is_truthy) {
                    ex.sets = Some(Scalar::Num(1.0));
                }
                ex.quantity = Some(ex.reps.take().unwrap_or(Scalar::Num(0.0)));
                ex
            })
            .collect();
        self.sections = Some(vec![Section {
            id: "section-main".into(),
            name: "Main".into(),
            exercises,
        }]);
        self
    }

    /// Planned workout length in seconds, as shown on workout cards.
    ///
    /// Per exercise: `sets * duration + (sets - 1) * rest` (no rest after the
    /// final set in this estimate). Legacy documents fall back to their
    /// stored `duration` metadata.
    pub fn estimated_duration_secs(&self) -> u64 {
        if let Some(sections) = self.sections.as_deref().filter(|s| !s.is_empty()) {
            let mut total = 0u64;
            for section in sections {
                for ex in &section.exercises {
                    let sets = ex.sets.as_ref().map_or(1, Scalar::set_count) as u64;
                    let duration = match ex.unit {
                        Unit::Time => ex.duration.as_ref().map_or(0, Scalar::secs),
                        Unit::Reps => 0,
                    };
                    let rest = ex.rest.as_ref().map_or(0, Scalar::secs);
                    total = total
                        .saturating_add(sets.saturating_mul(duration))
                        .saturating_add(sets.saturating_sub(1).saturating_mul(rest));
                }
            }
            total
        } else if !self.exercises.is_empty() {
            self.duration
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_secs_coercion() {
        assert_eq!(Scalar::Num(45.0).secs(), 45);
        assert_eq!(Scalar::Raw("30".into()).secs(), 30);
        assert_eq!(Scalar::Raw(" 30 ".into()).secs(), 30);
        assert_eq!(Scalar::Raw("30.5".into()).secs(), 30);
        assert_eq!(Scalar::Num(30.9).secs(), 30);
        assert_eq!(Scalar::Raw("abc".into()).secs(), 0);
        assert_eq!(Scalar::Num(-5.0).secs(), 0);
        assert_eq!(Scalar::Num(f64::NAN).secs(), 0);
    }

    #[test]
    fn scalar_set_count_coercion() {
        assert_eq!(Scalar::Raw("3".into()).set_count(), 3);
        assert_eq!(Scalar::Num(4.0).set_count(), 4);
        assert_eq!(Scalar::Num(0.0).set_count(), 1);
        assert_eq!(Scalar::Num(-2.0).set_count(), 1);
        assert_eq!(Scalar::Raw("".into()).set_count(), 1);
        assert_eq!(Scalar::Raw("junk".into()).set_count(), 1);
    }

    #[test]
    fn scalar_truthiness() {
        assert!(Scalar::Num(10.0).is_truthy());
        assert!(!Scalar::Num(0.0).is_truthy());
        assert!(Scalar::Raw("0".into()).is_truthy());
        assert!(!Scalar::Raw("".into()).is_truthy());
    }

    #[test]
    fn parses_mixed_typed_document() {
        let json = r#"{
            "id": "w1",
            "title": "Morning",
            "sections": [{
                "id": "s1",
                "name": "Warm-up",
                "exercises": [{
                    "id": "e1",
                    "name": "Jumping jacks",
                    "sets": "3",
                    "unit": "time",
                    "duration": "45",
                    "rest": 15
                }]
            }]
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        let sections = workout.sections.as_deref().unwrap();
        let ex = &sections[0].exercises[0];
        assert_eq!(ex.sets, Some(Scalar::Raw("3".into())));
        assert_eq!(ex.sets.as_ref().unwrap().set_count(), 3);
        assert_eq!(ex.unit, Unit::Time);
        assert_eq!(ex.duration.as_ref().unwrap().secs(), 45);
        assert_eq!(ex.rest, Some(Scalar::Num(15.0)));
    }

    #[test]
    fn normalizes_legacy_flat_workout() {
        let json = r#"{
            "id": "w2",
            "title": "Legacy",
            "duration": 600,
            "exercises": [
                { "id": "e1", "name": "Push-ups", "reps": 12 },
                { "id": "e2", "name": "Plank", "sets": 2, "unit": "time", "duration": 60 }
            ]
        }"#;
        let workout = serde_json::from_str::<Workout>(json).unwrap().normalized();
        let sections = workout.sections.as_deref().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "section-main");
        let exs = &sections[0].exercises;
        assert_eq!(exs[0].sets, Some(Scalar::Num(1.0)));
        assert_eq!(exs[0].unit, Unit::Reps);
        assert_eq!(exs[0].quantity, Some(Scalar::Num(12.0)));
        assert_eq!(exs[1].sets, Some(Scalar::Num(2.0)));
        assert_eq!(exs[1].quantity, Some(Scalar::Num(0.0)));
    }

    #[test]
    fn normalized_is_stable_for_sectioned_workouts() {
        let workout = Workout {
            id: "w3".into(),
            title: "Sectioned".into(),
            description: String::new(),
            created_at: None,
            duration: 0,
            calories: 0,
            exercises: vec![],
            tags: vec![],
            sections: Some(vec![Section {
                id: "s1".into(),
                name: "Main".into(),
                exercises: vec![],
            }]),
        };
        let normalized = workout.clone().normalized();
        assert_eq!(normalized, workout);
    }

    #[test]
    fn estimated_duration_skips_rest_after_final_set() {
        let json = r#"{
            "id": "w4",
            "title": "Intervals",
            "sections": [{
                "id": "s1",
                "name": "Main",
                "exercises": [{
                    "id": "e1",
                    "name": "Burpees",
                    "sets": 3,
                    "unit": "time",
                    "duration": 30,
                    "rest": 10
                }]
            }]
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.estimated_duration_secs(), 3 * 30 + 2 * 10);
    }

    #[test]
    fn estimated_duration_saturates_on_absurd_values() {
        let json = r#"{
            "id": "w6",
            "title": "Bad data",
            "sections": [{
                "id": "s1",
                "name": "Main",
                "exercises": [{
                    "id": "e1",
                    "name": "Forever",
                    "sets": 2,
                    "unit": "time",
                    "duration": 1e300,
                    "rest": 1e300
                }]
            }]
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.estimated_duration_secs(), u64::MAX);
    }

    #[test]
    fn estimated_duration_falls_back_to_metadata_for_legacy() {
        let json = r#"{
            "id": "w5",
            "title": "Legacy",
            "duration": 600,
            "exercises": [{ "id": "e1", "name": "Push-ups", "reps": 12 }]
        }"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.estimated_duration_secs(), 600);
    }
}
