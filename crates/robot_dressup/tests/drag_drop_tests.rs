//! End-to-end drag/drop flows on a headless app: pointer gestures go in as
//! [`DragCommand`]s, time is advanced by hand, and the item/slot state is
//! inspected directly.

use core::time::Duration;

use bevy::prelude::*;
use robot_dressup::config::DressupConfig;
use robot_dressup::highlight::HighlightPlugin;
use robot_dressup::item::{
    DragCommand, DraggableItem, EquipFailed, ItemPlugin, ItemState, ResetRequested,
};
use robot_dressup::motion::{MotionPlugin, Shake, SmoothMove};
use robot_dressup::slot::{EquipSlot, SlotHighlight};
use robot_dressup::tutorial::TutorialGate;

fn test_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.insert_resource(DressupConfig::default());
    app.init_resource::<TutorialGate>();
    app.add_plugins((ItemPlugin, MotionPlugin, HighlightPlugin));
    app
}

fn tick(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn spawn_slot(app: &mut App, position: Vec2, half_extents: Vec2, anchor: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            EquipSlot::new(half_extents).with_anchor(anchor),
            SlotHighlight::default(),
            Transform::from_translation(position.extend(0.5)),
        ))
        .id()
}

fn spawn_item(app: &mut App, origin: Vec2, half_extents: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            DraggableItem::new(origin, half_extents),
            Transform::from_translation(origin.extend(2.0)),
        ))
        .id()
}

fn item_state(app: &App, entity: Entity) -> ItemState {
    app.world()
        .get::<DraggableItem>(entity)
        .expect("item exists")
        .state
}

fn item_position(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .expect("item has a transform")
        .translation
        .truncate()
}

fn highlight_level(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<SlotHighlight>(entity)
        .expect("slot has a highlight")
        .level
}

#[test]
fn pick_drag_drop_on_slot_ends_equipped_at_the_anchor() {
    let mut app = test_app();
    let _slot = spawn_slot(&mut app, Vec2::new(10.0, 10.0), Vec2::splat(40.0), Vec2::new(10.0, 10.0));
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, jacket), ItemState::Dragging, "picked up");
    assert_eq!(
        app.world()
            .get::<DraggableItem>(jacket)
            .expect("item exists")
            .pick_offset,
        Vec2::ZERO,
        "pointer was dead center"
    );

    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(5.0, 5.0)));
    tick(&mut app, 0.0);
    assert_eq!(
        item_position(&app, jacket),
        Vec2::new(5.0, 5.0),
        "item follows the pointer"
    );

    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(5.0, 5.0)));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, jacket), ItemState::Equipping, "gliding in");

    tick(&mut app, 0.1);
    assert_eq!(
        item_state(&app, jacket),
        ItemState::Equipping,
        "still mid-move: 0.1s into a 1/6s glide"
    );

    // Run well past the move duration; the item must land exactly on the
    // anchor, not near it.
    tick(&mut app, 0.2);
    tick(&mut app, 0.2);
    assert_eq!(item_state(&app, jacket), ItemState::Equipped, "equipped");
    assert_eq!(
        item_position(&app, jacket),
        Vec2::new(10.0, 10.0),
        "snapped exactly to the anchor"
    );
}

#[test]
fn pick_offset_keeps_the_grab_point_under_the_pointer() {
    let mut app = test_app();
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(2.0, 1.0)));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, jacket), ItemState::Dragging, "picked");

    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(7.0, 6.0)));
    tick(&mut app, 0.0);
    assert_eq!(
        item_position(&app, jacket),
        Vec2::new(5.0, 5.0),
        "offset (-2,-1) preserved"
    );
}

#[test]
fn drop_in_empty_space_shakes_then_returns_home() {
    let mut app = test_app();
    let _slot = spawn_slot(&mut app, Vec2::new(300.0, 0.0), Vec2::splat(10.0), Vec2::new(300.0, 0.0));
    let jacket = spawn_item(&mut app, Vec2::new(-120.0, -240.0), Vec2::splat(5.0));

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(-120.0, -240.0)));
    tick(&mut app, 0.0);
    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(0.0, 0.0)));
    tick(&mut app, 0.0);
    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(0.0, 0.0)));
    tick(&mut app, 0.0);

    assert_eq!(item_state(&app, jacket), ItemState::Returning, "missed");
    assert!(
        !app.world().resource::<Events<EquipFailed>>().is_empty(),
        "failure side effects fired"
    );

    // Play out the shake (0.1s) and the return move (1/6s).
    for _ in 0..12 {
        tick(&mut app, 0.04);
    }
    assert_eq!(item_state(&app, jacket), ItemState::Idle, "back to idle");
    assert_eq!(
        item_position(&app, jacket),
        Vec2::new(-120.0, -240.0),
        "exactly at the origin, no residual shake offset"
    );
}

#[test]
fn pick_is_a_noop_outside_idle() {
    let mut app = test_app();
    let _slot = spawn_slot(&mut app, Vec2::new(10.0, 10.0), Vec2::splat(40.0), Vec2::new(10.0, 10.0));
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    let offset_before = app
        .world()
        .get::<DraggableItem>(jacket)
        .expect("item exists")
        .pick_offset;

    // A duplicate press while dragging changes nothing.
    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(1.0, 1.0)));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, jacket), ItemState::Dragging, "unchanged");
    assert_eq!(
        app.world()
            .get::<DraggableItem>(jacket)
            .expect("item exists")
            .pick_offset,
        offset_before,
        "offset untouched"
    );

    // Equip it, then try to pick it up again.
    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(5.0, 5.0)));
    tick(&mut app, 0.0);
    tick(&mut app, 0.5);
    assert_eq!(item_state(&app, jacket), ItemState::Equipped, "equipped");

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(10.0, 10.0)));
    tick(&mut app, 0.0);
    assert_eq!(
        item_state(&app, jacket),
        ItemState::Equipped,
        "equipped items are not pickable"
    );
}

#[test]
fn drag_is_ignored_unless_dragging() {
    let mut app = test_app();
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(50.0, 50.0)));
    tick(&mut app, 0.0);
    assert_eq!(item_position(&app, jacket), Vec2::ZERO, "no drag while idle");
}

#[test]
fn reset_mid_return_snaps_straight_home() {
    let mut app = test_app();
    let jacket = spawn_item(&mut app, Vec2::new(-100.0, -200.0), Vec2::splat(5.0));

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(-100.0, -200.0)));
    tick(&mut app, 0.0);
    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(40.0, 40.0)));
    tick(&mut app, 0.0);
    tick(&mut app, 0.03);
    assert_eq!(item_state(&app, jacket), ItemState::Returning, "mid-shake");

    app.world_mut().send_event(ResetRequested);
    tick(&mut app, 0.0);

    assert_eq!(item_state(&app, jacket), ItemState::Idle, "reset to idle");
    assert_eq!(
        item_position(&app, jacket),
        Vec2::new(-100.0, -200.0),
        "exactly at the origin"
    );
    assert!(
        app.world().get::<Shake>(jacket).is_none(),
        "shake cancelled"
    );
    assert!(
        app.world().get::<SmoothMove>(jacket).is_none(),
        "no pending move"
    );
}

#[test]
fn gate_denied_drop_falls_back_to_return() {
    let mut app = test_app();
    let _torso = spawn_slot(&mut app, Vec2::new(10.0, 10.0), Vec2::splat(40.0), Vec2::new(10.0, 10.0));
    let other = spawn_slot(&mut app, Vec2::new(300.0, 300.0), Vec2::splat(10.0), Vec2::new(300.0, 300.0));
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    {
        let mut gate = app.world_mut().resource_mut::<TutorialGate>();
        gate.active = true;
        gate.allowed_slot = Some(other);
    }

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(10.0, 10.0)));
    tick(&mut app, 0.0);

    assert_eq!(
        item_state(&app, jacket),
        ItemState::Returning,
        "denied drop behaves like a miss"
    );
}

#[test]
fn gated_pick_only_honors_the_allowed_item() {
    let mut app = test_app();
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));
    let boots = spawn_item(&mut app, Vec2::new(100.0, 0.0), Vec2::splat(5.0));

    {
        let mut gate = app.world_mut().resource_mut::<TutorialGate>();
        gate.active = true;
        gate.allowed_item = Some(jacket);
    }

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(100.0, 0.0)));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, boots), ItemState::Idle, "boots refused");

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    assert_eq!(item_state(&app, jacket), ItemState::Dragging, "jacket ok");
}

#[test]
fn nearest_slot_glows_immediately_after_pick() {
    let mut app = test_app();
    // Box gap of 135 px: outside close range, inside visibility range.
    let slot = spawn_slot(&mut app, Vec2::new(150.0, 0.0), Vec2::splat(10.0), Vec2::new(150.0, 0.0));
    let _jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);

    let config = DressupConfig::default();
    let expected = config.baseline_on_drag * (1.0 - 135.0 / config.visibility_range);
    let level = highlight_level(&app, slot);
    assert!(
        (level - expected).abs() < 1e-5,
        "held-item floor, faded by distance; got {level}"
    );
}

#[test]
fn glow_falls_off_after_a_pick_that_started_on_the_slot() {
    let mut app = test_app();
    let slot = spawn_slot(&mut app, Vec2::ZERO, Vec2::splat(40.0), Vec2::ZERO);
    let _jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    let touching = highlight_level(&app, slot);
    assert!((touching - 1.0).abs() < f32::EPSILON, "overlap saturates");

    // 125 px gap: the glow must drop to the faded floor, not stay pinned at
    // full intensity.
    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(170.0, 0.0)));
    tick(&mut app, 0.0);
    let away = highlight_level(&app, slot);
    assert!(away < 0.1, "no residual full glow, got {away}");
    assert!(away > 0.0, "still faintly lit inside visibility range");
}

#[test]
fn out_of_sight_slot_never_glows() {
    let mut app = test_app();
    let slot = spawn_slot(&mut app, Vec2::new(300.0, 0.0), Vec2::splat(10.0), Vec2::new(300.0, 0.0));
    let _jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);

    let level = highlight_level(&app, slot);
    assert!(level.abs() < f32::EPSILON, "beyond visibility range, got {level}");
}

#[test]
fn switching_nearest_slot_darkens_the_old_one_in_the_same_update() {
    let mut app = test_app();
    let left = spawn_slot(&mut app, Vec2::new(-50.0, 0.0), Vec2::splat(20.0), Vec2::new(-50.0, 0.0));
    let right = spawn_slot(&mut app, Vec2::new(50.0, 0.0), Vec2::splat(20.0), Vec2::new(50.0, 0.0));
    let _jacket = spawn_item(&mut app, Vec2::new(-10.0, 0.0), Vec2::splat(5.0));

    app.world_mut()
        .send_event(DragCommand::Pick(Vec2::new(-10.0, 0.0)));
    tick(&mut app, 0.0);
    assert!(highlight_level(&app, left) > 0.0, "left slot glows first");

    app.world_mut()
        .send_event(DragCommand::Drag(Vec2::new(30.0, 0.0)));
    tick(&mut app, 0.0);
    let left_level = highlight_level(&app, left);
    assert!(
        left_level.abs() < f32::EPSILON,
        "old slot forced to exactly 0, got {left_level}"
    );
    assert!(highlight_level(&app, right) > 0.0, "new slot glows");
}

#[test]
fn drop_clears_the_glow_entirely() {
    let mut app = test_app();
    let slot = spawn_slot(&mut app, Vec2::new(10.0, 0.0), Vec2::splat(40.0), Vec2::new(10.0, 0.0));
    let _jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    assert!(highlight_level(&app, slot) > 0.0, "glowing during drag");

    app.world_mut().send_event(DragCommand::Drop(Vec2::ZERO));
    tick(&mut app, 0.0);
    let level = highlight_level(&app, slot);
    assert!(level.abs() < f32::EPSILON, "glow off after drop, got {level}");
    assert!(
        !app.world()
            .get::<SlotHighlight>(slot)
            .expect("slot highlight")
            .on_top,
        "draw-on-top cleared"
    );
}

#[test]
fn equip_flourish_restores_the_base_scale() {
    let mut app = test_app();
    let _slot = spawn_slot(&mut app, Vec2::new(10.0, 10.0), Vec2::splat(40.0), Vec2::new(10.0, 10.0));
    let jacket = spawn_item(&mut app, Vec2::ZERO, Vec2::splat(5.0));

    app.world_mut().send_event(DragCommand::Pick(Vec2::ZERO));
    tick(&mut app, 0.0);
    app.world_mut()
        .send_event(DragCommand::Drop(Vec2::new(10.0, 10.0)));
    tick(&mut app, 0.0);
    tick(&mut app, 0.5);
    assert_eq!(item_state(&app, jacket), ItemState::Equipped, "equipped");

    // Play the punch out completely.
    for _ in 0..10 {
        tick(&mut app, 0.05);
    }
    assert_eq!(
        app.world()
            .get::<Transform>(jacket)
            .expect("item transform")
            .scale,
        Vec3::ONE,
        "scale back to base after the punch"
    );
}
