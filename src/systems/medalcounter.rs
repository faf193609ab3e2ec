//! Medal counter display system.
//!
//! Synchronizes the [`DynamicText`] of every [`MedalCounter`] entity with the
//! counter's pluralized label.

use crate::components::dynamictext::DynamicText;
use crate::components::medalcounter::MedalCounter;
use bevy_ecs::prelude::*;

/// Write the medal label into the bound text.
///
/// The text is only touched when the label differs from what it already
/// shows, so a steady count costs no re-layout and no change tick.
///
/// # System Ordering
///
/// Should run **after** [`tween_medal_count_system`](crate::systems::tween::tween_medal_count_system)
/// so a value driven this tick is displayed this tick.
pub fn medal_counter_system(mut query: Query<(&MedalCounter, &mut DynamicText)>) {
    for (counter, mut dynamic_text) in query.iter_mut() {
        let label = counter.label();
        if dynamic_text.content != label {
            dynamic_text.set_content(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(medal_counter_system);
        schedule.run(world);
    }

    #[test]
    fn test_writes_label_once_per_change() {
        let mut world = World::new();
        let e = world
            .spawn((MedalCounter::new(0), DynamicText::new("")))
            .id();

        run(&mut world);
        let text = world.get::<DynamicText>(e).unwrap();
        assert_eq!(text.content, "0 medal");
        assert_eq!(text.revision, 1);

        run(&mut world);
        run(&mut world);
        assert_eq!(world.get::<DynamicText>(e).unwrap().revision, 1);

        world.get_mut::<MedalCounter>(e).unwrap().set(2);
        run(&mut world);
        let text = world.get::<DynamicText>(e).unwrap();
        assert_eq!(text.content, "2 medals");
        assert_eq!(text.revision, 2);
    }

    #[test]
    fn test_count_of_one_is_singular() {
        let mut world = World::new();
        let e = world
            .spawn((MedalCounter::new(1), DynamicText::new("")))
            .id();
        run(&mut world);
        assert_eq!(world.get::<DynamicText>(e).unwrap().content, "1 medal");
    }

    #[test]
    fn test_matching_initial_text_is_not_rewritten() {
        let mut world = World::new();
        let e = world
            .spawn((MedalCounter::new(8), DynamicText::new("8 medals")))
            .id();
        run(&mut world);
        assert_eq!(world.get::<DynamicText>(e).unwrap().revision, 0);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let mut world = World::new();
        let e = world
            .spawn((MedalCounter::new(12), DynamicText::new("")))
            .id();
        run(&mut world);
        assert_eq!(world.get::<DynamicText>(e).unwrap().content, "12 medals");

        world.get_mut::<MedalCounter>(e).unwrap().set(-1);
        run(&mut world);
        assert_eq!(world.get::<DynamicText>(e).unwrap().content, "-1 medal");
    }
}
