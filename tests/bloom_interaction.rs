mod common;

use bevy::prelude::*;
use bloom::core::components::CanvasBox;
use bloom::gameplay::rules::PointerAction;
use bloom::gameplay::score::Score;
use bloom::interaction::pointer::PointerPressed;
use bloom::{Bloom, BloomGrowth, Flower, Health};

use common::*;

fn only_bloom(app: &mut App) -> (Entity, Vec2, BloomGrowth) {
    let world = app.world_mut();
    let mut q = world.query_filtered::<(Entity, &CanvasBox, &BloomGrowth), With<Bloom>>();
    let found: Vec<_> = q
        .iter(world)
        .map(|(e, rect, growth)| (e, rect.center(), growth.clone()))
        .collect();
    assert_eq!(found.len(), 1);
    found.into_iter().next().unwrap()
}

fn press(app: &mut App, action: PointerAction, canvas_pos: Vec2) {
    app.world_mut().send_event(PointerPressed { action, canvas_pos });
    app.update();
}

fn bloom_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Bloom>().iter(world).count()
}

#[test]
fn cutting_a_grown_bloom_scores_its_frame() {
    let mut app = rules_app(quiet_config());
    start_run(&mut app);
    run_until(&mut app, 60, |app| only_bloom(app).2.frame == 3);

    let (entity, center, _) = only_bloom(&mut app);
    press(&mut app, PointerAction::Cut, center);

    let (after, _, growth) = only_bloom(&mut app);
    assert_eq!(after, entity);
    assert_eq!(growth.frame, 2);
    assert!(!growth.is_mature());
    assert_eq!(app.world().resource::<Score>().0, 3);
}

#[test]
fn cut_bloom_holds_then_regrows() {
    let mut cfg = quiet_config();
    cfg.blooms.regrow_delay.min = 1.0;
    cfg.blooms.regrow_delay.max = 1.0;
    let mut app = rules_app(cfg);
    start_run(&mut app);
    run_until(&mut app, 60, |app| only_bloom(app).2.frame == 4);
    let (_, center, _) = only_bloom(&mut app);
    press(&mut app, PointerAction::Cut, center);

    for _ in 0..5 {
        app.update();
    }
    assert_eq!(only_bloom(&mut app).2.frame, 2);
    run_until(&mut app, 40, |app| only_bloom(app).2.frame == 3);
}

#[test]
fn clicking_a_seedling_uproots_it() {
    let mut app = rules_app(quiet_config());
    start_run(&mut app);
    let (_, center, growth) = only_bloom(&mut app);
    assert!(growth.frame <= 2);

    press(&mut app, PointerAction::Cut, center);
    assert_eq!(bloom_count(&mut app), 0);
    assert_eq!(app.world().resource::<Score>().0, 0);
}

#[test]
fn right_click_uproots_any_bloom() {
    let mut app = rules_app(quiet_config());
    start_run(&mut app);
    run_until(&mut app, 100, |app| only_bloom(app).2.is_mature());
    let (_, center, _) = only_bloom(&mut app);

    press(&mut app, PointerAction::Uproot, center);
    assert_eq!(bloom_count(&mut app), 0);
    assert_eq!(app.world().resource::<Score>().0, 0);
}

#[test]
fn clicks_outside_blooms_do_nothing() {
    let mut app = rules_app(quiet_config());
    start_run(&mut app);
    let cfg = app.world().resource::<bloom::GameConfig>().clone();
    // The flower area never holds a bloom.
    let flower_center = Vec2::new(
        cfg.flower.x + cfg.flower.width * 0.5,
        cfg.flower.y + cfg.flower.height * 0.5,
    );
    press(&mut app, PointerAction::Uproot, flower_center);
    assert_eq!(bloom_count(&mut app), 1);
}

#[test]
fn spawner_respects_the_live_cap() {
    let mut cfg = quiet_config();
    cfg.blooms.spawn_interval = 0.1;
    cfg.blooms.max_live = 4;
    let mut app = rules_app(cfg);
    start_run(&mut app);
    for _ in 0..20 {
        app.update();
    }
    assert_eq!(bloom_count(&mut app), 4);
}

#[test]
fn ripe_cut_heals_the_flower() {
    let mut app = rules_app(quiet_config());
    start_run(&mut app);
    run_until(&mut app, 60, |app| only_bloom(app).2.frame == 5);
    {
        let world = app.world_mut();
        let mut q = world.query_filtered::<&mut Health, With<Flower>>();
        for mut hp in q.iter_mut(world) {
            hp.current = 40;
        }
    }

    let (_, center, _) = only_bloom(&mut app);
    press(&mut app, PointerAction::Cut, center);

    let world = app.world_mut();
    let hp = world
        .query_filtered::<&Health, With<Flower>>()
        .single(world)
        .expect("one flower");
    assert_eq!(hp.current, 45);
    assert_eq!(world.resource::<Score>().0, 5);
}
