use crate::{
    entity::{Contact, Entity},
    shape::CollisionShape,
    types::Axis,
};

/// Snapshots of every candidate whose rectangle intersects `shape` on both axes.
pub fn overlapping<'a>(
    shape: &CollisionShape,
    candidates: impl IntoIterator<Item = &'a Entity>,
) -> Vec<Contact> {
    candidates
        .into_iter()
        .filter(|c| {
            shape.overlaps_axis(c.shape(), Axis::X) && shape.overlaps_axis(c.shape(), Axis::Y)
        })
        .map(Contact::from)
        .collect()
}

/// Hands `entity` all its contacts in a single `on_collision` call.
pub fn resolve(entity: &mut Entity, candidates: &[Entity]) {
    let contacts = overlapping(entity.shape(), candidates);
    entity.on_collision(&contacts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::AnimationSet,
        character::Character,
        config::CharacterParams,
        types::Vec2,
    };

    fn ground(x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity::ground(Vec2::new(x, y), Vec2::new(w, h), Vec2::ZERO, AnimationSet::EMPTY).unwrap()
    }

    #[test]
    fn both_axes_must_overlap() {
        let probe = ground(0.0, 0.0, 10.0, 10.0);
        let candidates = [
            ground(5.0, 5.0, 10.0, 10.0),
            // Same column, far below
            ground(0.0, 50.0, 10.0, 10.0),
            // Same row, far right
            ground(50.0, 0.0, 10.0, 10.0),
            ground(-5.0, -5.0, 5.0, 5.0),
        ];
        let contacts = overlapping(probe.shape(), &candidates);
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].shape.min(), Vec2::new(5.0, 5.0));
        assert_eq!(contacts[1].shape.min(), Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn resolve_passes_every_match_at_once() {
        let start = Vec2::new(100.0, 134.0);
        let mut entity = Entity::character(
            start,
            Character::new(CharacterParams::default(), start),
            AnimationSet::EMPTY,
        )
        .unwrap();

        // Floor under the feet and a lethal wall touching its side
        let statics = [
            ground(-100.0, 150.0, 500.0, 30.0),
            ground(116.0, 0.0, 10.0, 180.0).with_lethal(true),
            ground(300.0, 0.0, 10.0, 10.0),
        ];
        resolve(&mut entity, &statics);

        assert!(entity.is_colliding());
        assert!(entity.is_marked_for_removal());
        let character = entity.as_character().unwrap();
        assert!(character.is_grounded());
    }

    #[test]
    fn no_candidates_is_no_overlap() {
        let mut entity = ground(0.0, 0.0, 1.0, 1.0);
        resolve(&mut entity, &[]);
        assert!(!entity.is_colliding());
    }
}
