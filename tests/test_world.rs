use eco_duck::entities::*;
use eco_duck::geometry::{Bounds, Point};
use eco_duck::levels::{self, LevelId};
use eco_duck::world::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn closed_faucets(world: &World) -> Vec<usize> {
    world
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_closed_faucet())
        .map(|(i, _)| i)
        .collect()
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn sorting_level_layout() {
    let w = World::new(LevelId::Sorting, Bounds::default(), &mut seeded_rng());
    assert_eq!(w.count_active(EntityTag::SortingBin), 4);
    assert_eq!(
        w.count_active(EntityTag::CollectibleTrash),
        levels::INITIAL_TRASH
    );
    assert_eq!(w.score, 0);
    assert_eq!(w.time_left, None);
    assert!(!w.decorations.is_empty());
    assert!(w.decorations.iter().all(|d| !d.is_interactable()));
}

#[test]
fn water_level_is_timed() {
    let w = World::new(LevelId::Water, Bounds::default(), &mut seeded_rng());
    assert_eq!(w.count_active(EntityTag::Faucet), levels::FAUCET_LAYOUT.len());
    assert_eq!(w.count_active(EntityTag::Puddle), levels::PUDDLE_LAYOUT.len());
    assert_eq!(w.time_left, Some(60 * TICKS_PER_SECOND));
    assert_eq!(w.seconds_left(), Some(60));
    assert!(w.entities.iter().filter(|e| e.tag() == EntityTag::Faucet).all(|e| e.is_open_faucet()));
}

#[test]
fn trees_level_layout() {
    let w = World::new(LevelId::Trees, Bounds::default(), &mut seeded_rng());
    assert_eq!(w.count_active(EntityTag::SeedlingPile), 2);
    assert_eq!(w.count_active(EntityTag::PlantSpot), 12);
    assert_eq!(w.count_active(EntityTag::Hazard), 3);
    assert_eq!(w.count_remaining(), 12);
    assert_eq!(w.seconds_left(), None);
}

#[test]
fn spawned_trash_stays_in_the_playground() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.spawn_trash(200, &mut seeded_rng());
    for e in &w.entities {
        assert!((120.0..=1320.0).contains(&e.pos.x));
        assert!((235.0..=800.0).contains(&e.pos.y));
    }
}

// ── score & completion ────────────────────────────────────────────────────────

#[test]
fn complete_iff_score_reaches_target() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    assert_eq!(w.target_score(), 15);
    w.score = 14;
    assert!(!w.is_level_complete());
    w.adjust_score(1);
    assert!(w.is_level_complete());
    w.adjust_score(3);
    assert!(w.is_level_complete(), "overshooting still completes");
}

#[test]
fn score_never_goes_negative() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.adjust_score(-1);
    assert_eq!(w.score, 0);
    w.adjust_score(2);
    w.adjust_score(-5);
    assert_eq!(w.score, 0);
}

// ── clock ─────────────────────────────────────────────────────────────────────

#[test]
fn clock_runs_down_and_stops_at_zero() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Water, Bounds::default());
    w.time_left = Some(2);
    w.update(&mut rng);
    assert!(!w.is_time_up());
    w.update(&mut rng);
    assert!(w.is_time_up());
    w.update(&mut rng);
    assert_eq!(w.time_left, Some(0));
}

#[test]
fn time_up_with_low_score_is_not_complete() {
    let mut rng = seeded_rng();
    let mut w = World::new(LevelId::Water, Bounds::default(), &mut rng);
    w.score = 3;
    w.time_left = Some(1);
    w.update(&mut rng);
    assert!(w.is_time_up());
    assert!(!w.is_level_complete());
}

#[test]
fn untimed_levels_never_time_out() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Trees, Bounds::default());
    for _ in 0..1000 {
        w.update(&mut rng);
    }
    assert!(!w.is_time_up());
}

// ── re-seed policies ──────────────────────────────────────────────────────────

#[test]
fn low_trash_supply_spawns_a_batch() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.spawn_trash(4, &mut rng);
    w.update(&mut rng);
    assert_eq!(
        w.count_active(EntityTag::CollectibleTrash),
        4 + TRASH_RESPAWN_BATCH
    );
}

#[test]
fn trash_at_low_water_mark_is_left_alone() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.spawn_trash(TRASH_LOW_WATER, &mut rng);
    w.update(&mut rng);
    assert_eq!(w.count_active(EntityTag::CollectibleTrash), TRASH_LOW_WATER);
}

#[test]
fn collected_trash_counts_toward_replenishing() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.spawn_trash(5, &mut rng);
    w.entities[0].collect();
    w.update(&mut rng);
    assert_eq!(w.count_active(EntityTag::CollectibleTrash), 12);
    assert_eq!(w.entities.len(), 13, "collected trash is kept, inactive");
}

#[test]
fn faucet_reopens_every_interval() {
    let mut rng = seeded_rng();
    let mut w = World::new(LevelId::Water, Bounds::default(), &mut rng);
    let faucets: Vec<usize> = w
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.tag() == EntityTag::Faucet)
        .map(|(i, _)| i)
        .collect();
    for &i in &faucets[..3] {
        w.entities[i].close_faucet();
    }
    let closed_before = closed_faucets(&w);

    for _ in 0..FAUCET_REOPEN_INTERVAL - 1 {
        w.update(&mut rng);
    }
    assert_eq!(closed_faucets(&w).len(), 3);

    w.update(&mut rng);
    let closed_after = closed_faucets(&w);
    assert_eq!(closed_after.len(), 2);
    assert!(closed_after.iter().all(|i| closed_before.contains(i)));

    for _ in 0..FAUCET_REOPEN_INTERVAL {
        w.update(&mut rng);
    }
    assert_eq!(closed_faucets(&w).len(), 1);
}

#[test]
fn reopen_with_no_closed_faucet_does_nothing() {
    let mut rng = seeded_rng();
    let mut w = World::new(LevelId::Water, Bounds::default(), &mut rng);
    let before: Vec<Entity> = w.entities.clone();
    assert_eq!(w.reopen_random_faucet(&mut rng), None);
    assert_eq!(w.entities.len(), before.len());
    assert!(w.entities.iter().filter(|e| e.tag() == EntityTag::Faucet).all(|e| e.is_open_faucet()));
}

#[test]
fn reopen_only_picks_closed_faucets() {
    let mut rng = seeded_rng();
    for _ in 0..20 {
        let mut w = World::new(LevelId::Water, Bounds::default(), &mut rng);
        w.entities[5].close_faucet();
        assert_eq!(w.reopen_random_faucet(&mut rng), Some(5));
    }
}

// ── queries ───────────────────────────────────────────────────────────────────

#[test]
fn nearest_interactable_picks_closest_in_range() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.entities.push(Entity::bin(Point::new(400.0, 300.0), TrashCategory::Kitchen));
    w.entities.push(Entity::bin(Point::new(330.0, 300.0), TrashCategory::Other));
    let me = Point::new(300.0, 300.0);
    assert_eq!(w.nearest_interactable(me, INTERACT_RADIUS), Some(1));
    assert_eq!(w.nearest_interactable(Point::new(700.0, 700.0), INTERACT_RADIUS), None);
}

#[test]
fn nearest_interactable_range_is_strict() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.entities.push(Entity::bin(Point::new(380.0, 300.0), TrashCategory::Kitchen));
    assert_eq!(w.nearest_interactable(Point::new(300.0, 300.0), 80.0), None);
    assert_eq!(w.nearest_interactable(Point::new(301.0, 300.0), 80.0), Some(0));
}

#[test]
fn nearest_interactable_tie_goes_to_first() {
    let mut w = World::empty(LevelId::Sorting, Bounds::default());
    w.entities.push(Entity::bin(Point::new(340.0, 300.0), TrashCategory::Kitchen));
    w.entities.push(Entity::bin(Point::new(260.0, 300.0), TrashCategory::Other));
    assert_eq!(w.nearest_interactable(Point::new(300.0, 300.0), 80.0), Some(0));
}

#[test]
fn nearest_interactable_skips_inactive_and_closed() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Water, Bounds::default());
    w.entities.push(Entity::faucet(Point::new(305.0, 300.0)));
    w.entities.push(Entity::puddle(Point::new(300.0, 300.0), &mut rng));
    w.entities.push(Entity::faucet(Point::new(340.0, 300.0)));
    w.entities[0].close_faucet();
    assert_eq!(w.nearest_interactable(Point::new(300.0, 300.0), 80.0), Some(2));
}

#[test]
fn contact_checks() {
    let mut rng = seeded_rng();
    let mut w = World::empty(LevelId::Water, Bounds::default());
    w.entities.push(Entity::puddle(Point::new(300.0, 300.0), &mut rng));
    assert!(w.is_colliding_with_puddle(Point::new(340.0, 300.0)));
    assert!(!w.is_colliding_with_puddle(Point::new(350.0, 300.0)));
    assert!(!w.is_colliding_with_hazard(Point::new(300.0, 300.0)));

    w.entities
        .push(Entity::hazard(Point::new(600.0, 400.0), 170.0, 1270.0, &mut rng));
    assert!(w.is_colliding_with_hazard(Point::new(610.0, 410.0)));
    assert!(w.colliding_hazard(Point::new(610.0, 410.0)).is_some());
    assert!(w.colliding_hazard(Point::new(300.0, 300.0)).is_none());
}

#[test]
fn drawables_list_scenery_first_and_skip_inactive() {
    let mut rng = seeded_rng();
    let mut w = World::new(LevelId::Sorting, Bounds::default(), &mut rng);
    let total = w.decorations.len() + w.entities.len();
    assert_eq!(w.drawables().count(), total);
    assert_eq!(
        w.drawables().next().map(Entity::tag),
        Some(EntityTag::Decoration)
    );

    let trash = w
        .entities
        .iter()
        .position(|e| e.tag() == EntityTag::CollectibleTrash)
        .expect("trash");
    w.entities[trash].collect();
    assert_eq!(w.drawables().count(), total - 1);
    assert!(matches!(
        w.entity_behavior(trash),
        Some(Behavior::Trash { .. })
    ));
}
