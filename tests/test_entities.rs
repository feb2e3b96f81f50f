use eco_duck::entities::*;
use eco_duck::geometry::Point;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn patrolling(x: f32, direction: f32) -> Entity {
    Entity::new(
        Point::new(x, 300.0),
        Behavior::Hazard(Patrol {
            speed: 2.0,
            direction,
            x_min: 100.0,
            x_max: 200.0,
            walk_frame: 0,
        }),
    )
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn trash_gets_a_name_from_its_category() {
    let mut rng = seeded_rng();
    for category in TrashCategory::ALL {
        let e = Entity::trash(Point::new(300.0, 300.0), category, &mut rng);
        match &e.behavior {
            Behavior::Trash {
                category: c,
                item_name,
            } => {
                assert_eq!(*c, category);
                assert!(category.item_names().contains(item_name));
            }
            other => panic!("expected trash, got {other:?}"),
        }
        assert_eq!(e.tag(), EntityTag::CollectibleTrash);
        assert_eq!(e.size, TRASH_SIZE);
    }
}

#[test]
fn initial_interactability_per_kind() {
    let mut rng = seeded_rng();
    let p = Point::new(200.0, 200.0);
    assert!(Entity::trash(p, TrashCategory::Kitchen, &mut rng).is_interactable());
    assert!(Entity::bin(p, TrashCategory::Other).is_interactable());
    assert!(Entity::faucet(p).is_interactable());
    assert!(Entity::seedling_pile(p).is_interactable());
    assert!(Entity::plant_spot(p).is_interactable());
    assert!(!Entity::puddle(p, &mut rng).is_interactable());
    assert!(!Entity::hazard(p, 100.0, 300.0, &mut rng).is_interactable());
    assert!(!Entity::decoration(p, DecorationKind::Bench).is_interactable());
}

#[test]
fn hazard_pace_is_between_one_and_two() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let e = Entity::hazard(Point::new(500.0, 300.0), 170.0, 1270.0, &mut rng);
        let Behavior::Hazard(patrol) = e.behavior else {
            panic!("expected hazard");
        };
        assert!((1.0..2.0).contains(&patrol.speed));
        assert!(patrol.direction == 1.0 || patrol.direction == -1.0);
    }
}

// ── trash ─────────────────────────────────────────────────────────────────────

#[test]
fn collected_trash_is_inactive() {
    let mut rng = seeded_rng();
    let mut e = Entity::trash(Point::new(300.0, 300.0), TrashCategory::Hazardous, &mut rng);
    e.collect();
    assert!(!e.active);
    assert!(!e.is_interactable());
}

#[test]
fn collect_ignores_non_trash() {
    let mut bin = Entity::bin(Point::new(300.0, 128.0), TrashCategory::Recyclable);
    bin.collect();
    assert!(bin.active);
    assert!(bin.is_interactable());
}

// ── faucets ───────────────────────────────────────────────────────────────────

#[test]
fn open_faucet_drips_on_interval() {
    let mut rng = seeded_rng();
    let mut f = Entity::faucet(Point::new(300.0, 250.0));
    for _ in 0..DRIP_INTERVAL - 1 {
        f.update(&mut rng);
    }
    let Behavior::Faucet(state) = &f.behavior else {
        panic!("expected faucet");
    };
    assert!(state.droplets.is_empty());

    f.update(&mut rng);
    let Behavior::Faucet(state) = &f.behavior else {
        panic!("expected faucet");
    };
    assert_eq!(state.droplets.len(), 1);
}

#[test]
fn reopening_resets_the_drip() {
    let mut rng = seeded_rng();
    let mut f = Entity::faucet(Point::new(300.0, 250.0));
    for _ in 0..DRIP_INTERVAL {
        f.update(&mut rng);
    }
    f.close_faucet();
    f.reopen_faucet();
    // Reopening resets the drip timer but leaves nothing falling
    let Behavior::Faucet(state) = &f.behavior else {
        panic!("expected faucet");
    };
    assert!(state.droplets.is_empty());
    assert_eq!(state.drip_timer, 0);
}

#[test]
fn closing_and_reopening_a_faucet() {
    let mut f = Entity::faucet(Point::new(300.0, 250.0));
    assert!(f.is_open_faucet());

    assert!(f.close_faucet());
    assert!(f.is_closed_faucet());
    assert!(!f.is_interactable());
    assert!(!f.close_faucet(), "closing twice must be a no-op");

    assert!(f.reopen_faucet());
    assert!(f.is_open_faucet());
    assert!(f.is_interactable());
    assert!(!f.reopen_faucet());
}

#[test]
fn closed_faucet_stops_dripping() {
    let mut rng = seeded_rng();
    let mut f = Entity::faucet(Point::new(300.0, 250.0));
    f.close_faucet();
    for _ in 0..DRIP_INTERVAL * 5 {
        f.update(&mut rng);
    }
    let Behavior::Faucet(state) = &f.behavior else {
        panic!("expected faucet");
    };
    assert!(state.droplets.is_empty());
}

// ── plant spots ───────────────────────────────────────────────────────────────

#[test]
fn planting_is_one_way() {
    let mut spot = Entity::plant_spot(Point::new(400.0, 400.0));
    assert!(spot.is_empty_plant_spot());
    assert_eq!(spot.growth_fraction(), None);

    assert!(spot.plant());
    assert!(!spot.is_empty_plant_spot());
    assert!(!spot.is_interactable());
    assert!(spot.active, "planted spots stay in the level");
    assert!(!spot.plant());
}

#[test]
fn growth_is_monotonic_and_capped() {
    let mut rng = seeded_rng();
    let mut spot = Entity::plant_spot(Point::new(400.0, 400.0));
    spot.plant();

    let mut last = 0.0;
    for _ in 0..GROWTH_CAP * 2 {
        spot.update(&mut rng);
        let g = spot.growth_fraction().expect("planted");
        assert!(g >= last);
        assert!(g <= 1.0);
        last = g;
    }
    assert_eq!(last, 1.0);
}

// ── hazards ───────────────────────────────────────────────────────────────────

#[test]
fn hazard_walks_and_turns_at_patrol_edge() {
    let mut rng = seeded_rng();
    let mut h = patrolling(199.0, 1.0);

    h.update(&mut rng);
    assert_eq!(h.pos.x, 201.0);
    let Behavior::Hazard(patrol) = h.behavior else {
        panic!("expected hazard");
    };
    assert_eq!(patrol.direction, -1.0);

    h.update(&mut rng);
    assert_eq!(h.pos.x, 199.0);
}

#[test]
fn hazard_turns_at_left_edge() {
    let mut rng = seeded_rng();
    let mut h = patrolling(101.0, -1.0);
    h.update(&mut rng);
    let Behavior::Hazard(patrol) = h.behavior else {
        panic!("expected hazard");
    };
    assert_eq!(patrol.direction, 1.0);
    assert_eq!(patrol.walk_frame, 1);
}

#[test]
fn bins_and_decorations_do_not_move() {
    let mut rng = seeded_rng();
    let mut bin = Entity::bin(Point::new(300.0, 128.0), TrashCategory::Kitchen);
    let mut deco = Entity::decoration(Point::new(50.0, 50.0), DecorationKind::Tree);
    let (bin_before, deco_before) = (bin.clone(), deco.clone());
    for _ in 0..10 {
        bin.update(&mut rng);
        deco.update(&mut rng);
    }
    assert_eq!(bin, bin_before);
    assert_eq!(deco, deco_before);
}

// ── idle animation ────────────────────────────────────────────────────────────

#[test]
fn trash_and_puddles_bob() {
    let mut rng = seeded_rng();
    let mut trash = Entity::trash(Point::new(300.0, 300.0), TrashCategory::Other, &mut rng);
    trash.anim_phase = 0.0;
    assert_eq!(trash.bob_offset(), 0.0);
    trash.anim_phase = std::f32::consts::FRAC_PI_2;
    assert!((trash.bob_offset() - TRASH_BOB).abs() < 1e-5);

    let mut puddle = Entity::puddle(Point::new(300.0, 300.0), &mut rng);
    let before = puddle.anim_phase;
    puddle.update(&mut rng);
    assert!(puddle.anim_phase > before);
    assert!(puddle.bob_offset().abs() <= PUDDLE_BOB);

    let bin = Entity::bin(Point::new(300.0, 128.0), TrashCategory::Kitchen);
    assert_eq!(bin.bob_offset(), 0.0);
}
