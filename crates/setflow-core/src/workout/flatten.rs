//! Activity flattening.
//!
//! Expands a sectioned workout into the linear sequence of timer steps the
//! engine walks: one activity per (exercise, set), plus a trailing rest
//! activity after every set of an exercise that declares rest.
//!
//! Flattening is pure and deterministic. The sequence is recomputed whenever
//! the source workout changes; it is never mutated in place.

use serde::{Deserialize, Serialize};

use super::{Scalar, Unit, Workout};

/// What a single timer step is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Exercise,
    Rest,
}

/// One indivisible timer step.
///
/// Raw `quantity`/`rest`/`sets` scalars are carried through uncoerced for
/// display; `duration` is already coerced to whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub section_name: String,
    pub unit: Unit,
    /// Seconds, present for rest steps and for exercises that declare a
    /// duration. 0 means instantly complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Scalar>,
    /// 1-based set index within the owning exercise.
    pub current_set: u32,
    pub total_sets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<Scalar>,
}

/// Flatten workout sections into the ordered activity sequence.
///
/// An exercise with `S` sets and no rest yields exactly `S` activities; with
/// a truthy rest it yields `2*S`, alternating exercise and rest. Workouts
/// without sections yield an empty sequence (legacy documents must be run
/// through [`Workout::normalized`] first).
pub fn flatten(workout: &Workout) -> Vec<Activity> {
    let Some(sections) = workout.sections.as_deref() else {
        return Vec::new();
    };

    let mut activities = Vec::new();
    for section in sections {
        for exercise in &section.exercises {
            let sets = exercise.sets.as_ref().map_or(1, Scalar::set_count);
            for set_index in 0..sets {
                activities.push(Activity {
                    id: exercise.id.clone(),
                    name: exercise.name.clone(),
                    kind: ActivityKind::Exercise,
                    section_name: section.name.clone(),
                    unit: exercise.unit,
                    duration: exercise.duration.as_ref().map(Scalar::secs),
                    quantity: exercise.quantity.clone(),
                    current_set: set_index + 1,
                    total_sets: sets,
                    rest: exercise.rest.clone(),
                    sets: exercise.sets.clone(),
                });

                if exercise.rest.as_ref().is_some_and(Scalar::is_truthy) {
                    activities.push(Activity {
                        id: format!("rest-{}-{}", exercise.id, set_index),
                        name: "Rest".into(),
                        kind: ActivityKind::Rest,
                        section_name: section.name.clone(),
                        unit: Unit::Time,
                        duration: exercise.rest.as_ref().map(Scalar::secs),
                        quantity: None,
                        current_set: set_index + 1,
                        total_sets: sets,
                        rest: None,
                        sets: None,
                    });
                }
            }
        }
    }
    activities
}

/// Total planned seconds across the sequence. Reps-only activities carry no
/// duration and contribute 0. Saturates instead of overflowing on absurd
/// durations.
pub fn total_duration_secs(activities: &[Activity]) -> u64 {
    activities
        .iter()
        .fold(0u64, |acc, a| acc.saturating_add(a.duration.unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Exercise, Section};
    use proptest::prelude::*;

    fn workout_with(exercises: Vec<Exercise>) -> Workout {
        Workout {
            id: "w".into(),
            title: "t".into(),
            description: String::new(),
            created_at: None,
            duration: 0,
            calories: 0,
            exercises: vec![],
            tags: vec![],
            sections: Some(vec![Section {
                id: "s1".into(),
                name: "Main".into(),
                exercises,
            }]),
        }
    }

    fn timed(id: &str, sets: Scalar, duration: u64, rest: Option<Scalar>) -> Exercise {
        Exercise {
            id: id.into(),
            name: id.to_uppercase(),
            sets: Some(sets),
            unit: Unit::Time,
            reps: None,
            quantity: None,
            duration: Some(duration.into()),
            rest,
        }
    }

    #[test]
    fn no_sections_yields_empty_sequence() {
        let workout = Workout {
            sections: None,
            ..workout_with(vec![])
        };
        assert!(flatten(&workout).is_empty());
    }

    #[test]
    fn sets_without_rest_yield_one_activity_per_set() {
        let workout = workout_with(vec![timed("e1", 3.0.into(), 30, None)]);
        let activities = flatten(&workout);
        assert_eq!(activities.len(), 3);
        for (i, a) in activities.iter().enumerate() {
            assert_eq!(a.kind, ActivityKind::Exercise);
            assert_eq!(a.current_set, i as u32 + 1);
            assert_eq!(a.total_sets, 3);
            assert_eq!(a.section_name, "Main");
        }
    }

    #[test]
    fn rest_interleaves_after_every_set_including_the_last() {
        let workout = workout_with(vec![timed("e1", 2.0.into(), 30, Some(10u64.into()))]);
        let activities = flatten(&workout);
        assert_eq!(activities.len(), 4);
        assert_eq!(activities[0].kind, ActivityKind::Exercise);
        assert_eq!(activities[0].duration, Some(30));
        assert_eq!(activities[1].kind, ActivityKind::Rest);
        assert_eq!(activities[1].duration, Some(10));
        assert_eq!(activities[1].unit, Unit::Time);
        assert_eq!(activities[2].current_set, 2);
        assert_eq!(activities[3].kind, ActivityKind::Rest);
        assert_eq!(total_duration_secs(&activities), 80);
    }

    #[test]
    fn string_set_count_is_coerced() {
        let mut ex = timed("e1", "3".into(), 0, None);
        ex.unit = Unit::Reps;
        ex.duration = None;
        ex.quantity = Some(10u64.into());
        let activities = flatten(&workout_with(vec![ex]));
        assert_eq!(activities.len(), 3);
        for a in &activities {
            assert_eq!(a.unit, Unit::Reps);
            assert_eq!(a.duration, None);
            assert_eq!(a.quantity, Some(Scalar::Num(10.0)));
        }
    }

    #[test]
    fn unparseable_set_count_plays_one_set() {
        let workout = workout_with(vec![timed("e1", "junk".into(), 30, None)]);
        assert_eq!(flatten(&workout).len(), 1);
    }

    #[test]
    fn rest_activity_ids_are_unique() {
        let workout = workout_with(vec![
            timed("e1", 3.0.into(), 30, Some(10u64.into())),
            timed("e2", 2.0.into(), 20, Some(5u64.into())),
        ]);
        let activities = flatten(&workout);
        let mut rest_ids: Vec<_> = activities
            .iter()
            .filter(|a| a.kind == ActivityKind::Rest)
            .map(|a| a.id.clone())
            .collect();
        let before = rest_ids.len();
        rest_ids.sort();
        rest_ids.dedup();
        assert_eq!(rest_ids.len(), before);
    }

    #[test]
    fn unparseable_rest_is_truthy_but_zero_seconds() {
        let workout = workout_with(vec![timed("e1", 1.0.into(), 30, Some("soon".into()))]);
        let activities = flatten(&workout);
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[1].kind, ActivityKind::Rest);
        assert_eq!(activities[1].duration, Some(0));
    }

    #[test]
    fn zero_rest_emits_no_rest_activity() {
        let workout = workout_with(vec![timed("e1", 2.0.into(), 30, Some(0.0.into()))]);
        assert_eq!(flatten(&workout).len(), 2);
    }

    #[test]
    fn section_order_is_preserved() {
        let mut workout = workout_with(vec![timed("warm", 1.0.into(), 60, None)]);
        workout.sections.as_mut().unwrap().push(Section {
            id: "s2".into(),
            name: "Cool-down".into(),
            exercises: vec![timed("stretch", 1.0.into(), 30, None)],
        });
        let activities = flatten(&workout);
        assert_eq!(activities[0].section_name, "Main");
        assert_eq!(activities[1].section_name, "Cool-down");
    }

    #[test]
    fn absurd_durations_saturate_instead_of_overflowing() {
        let mut ex = timed("e1", 2.0.into(), 0, Some("1e300".into()));
        ex.duration = Some(Scalar::Num(1e300));
        let activities = flatten(&workout_with(vec![ex]));
        assert_eq!(activities.len(), 4);
        assert_eq!(activities[0].duration, Some(u64::MAX));
        assert_eq!(total_duration_secs(&activities), u64::MAX);
    }

    #[test]
    fn flattening_is_deterministic() {
        let workout = workout_with(vec![timed("e1", 3.0.into(), 30, Some(10u64.into()))]);
        assert_eq!(flatten(&workout), flatten(&workout));
    }

    proptest! {
        #[test]
        fn activity_count_matches_sets_and_rest(
            sets in 1u32..=8,
            duration in 0u64..=120,
            rest in proptest::option::of(1u64..=60),
        ) {
            let workout = workout_with(vec![timed(
                "e1",
                (sets as f64).into(),
                duration,
                rest.map(Scalar::from),
            )]);
            let activities = flatten(&workout);
            let expected = if rest.is_some() { 2 * sets } else { sets } as usize;
            prop_assert_eq!(activities.len(), expected);

            let expected_total = sets as u64 * (duration + rest.unwrap_or(0));
            prop_assert_eq!(total_duration_secs(&activities), expected_total);

            for pair in activities.chunks(if rest.is_some() { 2 } else { 1 }) {
                prop_assert_eq!(pair[0].kind, ActivityKind::Exercise);
                if rest.is_some() {
                    prop_assert_eq!(pair[1].kind, ActivityKind::Rest);
                    prop_assert_eq!(pair[1].current_set, pair[0].current_set);
                }
            }
        }

        #[test]
        fn current_set_runs_one_through_s(sets in 1u32..=10) {
            let workout = workout_with(vec![timed("e1", (sets as f64).into(), 30, None)]);
            let activities = flatten(&workout);
            for (i, a) in activities.iter().enumerate() {
                prop_assert_eq!(a.current_set, i as u32 + 1);
                prop_assert_eq!(a.total_sets, sets);
            }
        }
    }
}
