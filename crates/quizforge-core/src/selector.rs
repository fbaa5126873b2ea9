//! Chooses which entity of a sentence becomes the answer.

use crate::model::{Difficulty, EntitySpan, EntityType};
use crate::random::{choose, RandomSource};

/// Pick one entity from a sentence's candidates.
///
/// Easy favours long, conspicuous names; hard favours short numbers and
/// dates; medium picks at random. Ties go to the earliest candidate.
/// Returns `None` only for an empty candidate list.
pub fn select<'a>(
    candidates: &[&'a EntitySpan],
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> Option<&'a EntitySpan> {
    if candidates.is_empty() {
        return None;
    }
    match difficulty {
        Difficulty::Easy => longest(candidates, EntityType::is_prominent)
            .or_else(|| longest(candidates, is_place))
            .or_else(|| longest(candidates, |_| true)),
        Difficulty::Medium => {
            let notable: Vec<&EntitySpan> = candidates
                .iter()
                .copied()
                .filter(|s| s.entity_type.is_prominent() || is_place(s.entity_type))
                .collect();
            if notable.is_empty() {
                choose(candidates, rng).copied()
            } else {
                choose(&notable, rng).copied()
            }
        }
        Difficulty::Hard => shortest(candidates, EntityType::is_subtle)
            .or_else(|| shortest(candidates, is_place))
            .or_else(|| shortest(candidates, |_| true)),
    }
}

fn is_place(ty: EntityType) -> bool {
    ty == EntityType::Place
}

fn char_len(span: &EntitySpan) -> usize {
    span.text.chars().count()
}

fn longest<'a>(
    candidates: &[&'a EntitySpan],
    keep: impl Fn(EntityType) -> bool,
) -> Option<&'a EntitySpan> {
    let mut best: Option<&EntitySpan> = None;
    for span in candidates.iter().copied().filter(|s| keep(s.entity_type)) {
        if best.map_or(true, |b| char_len(span) > char_len(b)) {
            best = Some(span);
        }
    }
    best
}

fn shortest<'a>(
    candidates: &[&'a EntitySpan],
    keep: impl Fn(EntityType) -> bool,
) -> Option<&'a EntitySpan> {
    let mut best: Option<&EntitySpan> = None;
    for span in candidates.iter().copied().filter(|s| keep(s.entity_type)) {
        if best.map_or(true, |b| char_len(span) < char_len(b)) {
            best = Some(span);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedSource};

    fn spans() -> Vec<EntitySpan> {
        vec![
            EntitySpan::new("1848", EntityType::Date, 0),
            EntitySpan::new("Karl Marx", EntityType::Person, 0),
            EntitySpan::new("London", EntityType::Place, 0),
            EntitySpan::new("Friedrich Engels", EntityType::Person, 0),
            EntitySpan::new("two", EntityType::Cardinal, 0),
        ]
    }

    #[test]
    fn easy_picks_longest_prominent() {
        let owned = spans();
        let refs: Vec<&EntitySpan> = owned.iter().collect();
        let mut rng = RngSource::seeded(0);
        let picked = select(&refs, Difficulty::Easy, &mut rng).unwrap();
        assert_eq!(picked.text, "Friedrich Engels");
    }

    #[test]
    fn easy_falls_back_to_place_then_anything() {
        let owned = vec![
            EntitySpan::new("1848", EntityType::Date, 0),
            EntitySpan::new("Paris", EntityType::Place, 0),
        ];
        let refs: Vec<&EntitySpan> = owned.iter().collect();
        let mut rng = RngSource::seeded(0);
        assert_eq!(select(&refs, Difficulty::Easy, &mut rng).unwrap().text, "Paris");

        let refs = vec![&owned[0]];
        assert_eq!(select(&refs, Difficulty::Easy, &mut rng).unwrap().text, "1848");
    }

    #[test]
    fn hard_picks_shortest_subtle() {
        let owned = spans();
        let refs: Vec<&EntitySpan> = owned.iter().collect();
        let mut rng = RngSource::seeded(0);
        assert_eq!(select(&refs, Difficulty::Hard, &mut rng).unwrap().text, "two");
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let owned = vec![
            EntitySpan::new("Anna", EntityType::Person, 0),
            EntitySpan::new("Boris", EntityType::Person, 0),
            EntitySpan::new("Carl", EntityType::Person, 0),
        ];
        let refs: Vec<&EntitySpan> = owned.iter().collect();
        let mut rng = RngSource::seeded(0);
        assert_eq!(select(&refs, Difficulty::Easy, &mut rng).unwrap().text, "Boris");
        assert_eq!(select(&refs, Difficulty::Hard, &mut rng).unwrap().text, "Anna");
    }

    #[test]
    fn medium_picks_among_notable_types() {
        let owned = spans();
        let refs: Vec<&EntitySpan> = owned.iter().collect();
        // 0.99 selects the last of the three notable spans
        let mut rng = ScriptedSource::new(vec![0.99]);
        assert_eq!(
            select(&refs, Difficulty::Medium, &mut rng).unwrap().text,
            "Friedrich Engels"
        );
        let mut rng = RngSource::seeded(11);
        for _ in 0..20 {
            let picked = select(&refs, Difficulty::Medium, &mut rng).unwrap();
            assert!(picked.entity_type != EntityType::Date);
            assert!(picked.entity_type != EntityType::Cardinal);
        }
    }

    #[test]
    fn empty_candidates_select_nothing() {
        let mut rng = RngSource::seeded(0);
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(select(&[], d, &mut rng).is_none());
        }
    }
}
