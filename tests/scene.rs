use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};
use ncollide2d::shape::Cuboid;
use nphysics2d::object::DefaultBodyHandle;

use sandbox2d::Scene;

fn body_position(scene: &Scene, body: DefaultBodyHandle) -> Vector2<f32> {
    scene
        .bodies()
        .rigid_body(body)
        .unwrap()
        .position()
        .translation
        .vector
}

fn body_y(scene: &Scene, body: DefaultBodyHandle) -> f32 {
    body_position(scene, body).y
}

#[test]
fn floor_tracks_viewport_width() {
    let mut scene = Scene::new(800.0, 600.0);

    scene.resize(1024.0, 768.0);

    let collider = scene.colliders().get(scene.floor_collider()).unwrap();
    let translation = collider.position().translation.vector;
    assert_relative_eq!(translation.x, 512.0);
    assert_relative_eq!(translation.y, 30.0);

    let cuboid = collider.shape().as_shape::<Cuboid<f32>>().unwrap();
    assert_relative_eq!(cuboid.half_extents().x, 512.0);
    assert_relative_eq!(cuboid.half_extents().y, 30.0);

    assert_relative_eq!(scene.extent().x, 1024.0);
    assert_relative_eq!(scene.extent().y, 768.0);
}

#[test]
fn resize_leaves_spawned_bodies_alone() {
    let mut scene = Scene::new(800.0, 600.0);
    let spawned = scene.spawn_box_at(300.0, 200.0);
    let before = body_position(&scene, spawned.body);

    scene.resize(1200.0, 700.0);

    let after = body_position(&scene, spawned.body);
    assert_relative_eq!(before.x, after.x);
    assert_relative_eq!(before.y, after.y);

    let floor = scene.colliders().get(scene.floor_collider()).unwrap();
    assert_relative_eq!(floor.position().translation.vector.x, 600.0);
}

#[test]
fn person_is_ten_bodies_and_nine_joints() {
    let mut scene = Scene::new(800.0, 600.0);
    let baseline = scene.body_count();

    let figure = scene.spawn_person_at(300.0, 400.0);

    assert_eq!(figure.bodies.len(), 10);
    assert_eq!(figure.colliders.len(), 10);
    assert_eq!(figure.joints.len(), 9);
    assert_eq!(scene.body_count(), baseline + 10);
    assert_eq!(scene.joint_count(), 9);
    assert_eq!(scene.figures().len(), 1);
}

#[test]
fn figures_get_distinct_self_collision_groups() {
    let mut scene = Scene::new(800.0, 600.0);
    let a = scene.spawn_person_at(250.0, 400.0);
    let b = scene.spawn_person_at(350.0, 400.0);

    assert_ne!(a.group, b.group);

    let head_a = *scene
        .colliders()
        .get(a.colliders[0])
        .unwrap()
        .collision_groups();
    let leg_a = *scene
        .colliders()
        .get(a.colliders[9])
        .unwrap()
        .collision_groups();
    let head_b = *scene
        .colliders()
        .get(b.colliders[0])
        .unwrap()
        .collision_groups();
    let floor = *scene
        .colliders()
        .get(scene.floor_collider())
        .unwrap()
        .collision_groups();

    // Parts of one figure are filtered; everything else interacts.
    assert!(!head_a.can_interact_with_groups(&leg_a));
    assert!(head_a.can_interact_with_groups(&head_b));
    assert!(head_a.can_interact_with_groups(&floor));
}

#[test]
fn box_dimensions_stay_in_their_ranges() {
    let mut scene = Scene::new(800.0, 600.0);

    for _ in 0..50 {
        let spawned = scene.spawn_box();
        let collider = scene.colliders().get(spawned.collider).unwrap();
        let cuboid = collider.shape().as_shape::<Cuboid<f32>>().unwrap();
        let extents = cuboid.half_extents() * 2.0;

        assert!(extents.x >= 60.0 && extents.x < 100.0);
        assert!(extents.y >= 30.0 && extents.y < 60.0);
    }
}

#[test]
fn random_spawns_stay_in_the_band() {
    let mut scene = Scene::new(800.0, 600.0);

    for _ in 0..20 {
        let spawned = scene.spawn_box();
        let position = body_position(&scene, spawned.body);
        assert!(position.x >= 150.0 && position.x < 450.0);
        assert_relative_eq!(position.y, 500.0);
    }
}

#[test]
fn clear_leaves_only_the_floor() {
    let mut scene = Scene::new(800.0, 600.0);
    scene.spawn_person_at(300.0, 400.0);
    scene.spawn_box_at(500.0, 300.0);
    for _ in 0..10 {
        scene.step();
    }

    scene.clear();

    assert_eq!(scene.body_count(), 1);
    assert_eq!(scene.joint_count(), 0);
    assert!(scene.figures().is_empty());
    assert!(scene.boxes().is_empty());
    assert!(scene.colliders().get(scene.floor_collider()).is_some());

    // Clearing twice changes nothing, and the world keeps stepping.
    scene.clear();
    assert_eq!(scene.body_count(), 1);
    scene.step();
}

#[test]
fn clear_releases_an_active_grab() {
    let mut scene = Scene::new(800.0, 600.0);
    scene.spawn_box_at(400.0, 300.0);
    scene.grab_at(Point2::new(400.0, 300.0));
    assert!(scene.grabbed().is_some());

    scene.clear();

    assert!(scene.grabbed().is_none());
    assert!(scene.drag_constraint().is_none());
    assert_eq!(scene.joint_count(), 0);
    scene.step();
}

#[test]
fn grab_attaches_and_release_detaches() {
    let mut scene = Scene::new(800.0, 600.0);
    let spawned = scene.spawn_box_at(400.0, 300.0);

    let grabbed = scene.grab_at(Point2::new(400.0, 300.0));
    assert_eq!(grabbed.map(|part| part.0), Some(spawned.body));
    assert!(scene.grabbed().is_some());

    let joint = scene.drag_constraint().unwrap();
    assert!(scene.constraints().get(joint).is_some());
    assert_eq!(scene.joint_count(), 1);

    scene.release_grab();
    assert!(scene.grabbed().is_none());
    assert!(scene.drag_constraint().is_none());
    assert_eq!(scene.joint_count(), 0);
}

#[test]
fn grabbing_empty_space_or_the_floor_is_a_no_op() {
    let mut scene = Scene::new(800.0, 600.0);
    scene.spawn_box_at(400.0, 300.0);

    assert!(scene.grab_at(Point2::new(100.0, 550.0)).is_none());
    assert!(scene.grab_at(Point2::new(400.0, 30.0)).is_none());
    assert!(scene.grabbed().is_none());
    assert_eq!(scene.joint_count(), 0);
}

#[test]
fn dragging_pulls_the_grabbed_body_toward_the_cursor() {
    let mut scene = Scene::new(800.0, 600.0);
    let spawned = scene.spawn_box_at(300.0, 300.0);
    scene.grab_at(Point2::new(300.0, 300.0)).unwrap();

    let target = Point2::new(420.0, 380.0);
    for _ in 0..120 {
        scene.drag_to(target);
        scene.step();
    }

    let position = body_position(&scene, spawned.body);
    assert!(
        (position.x - target.x).abs() < 40.0,
        "x = {} should be near {}",
        position.x,
        target.x
    );
    assert!(
        (position.y - target.y).abs() < 40.0,
        "y = {} should be near {}",
        position.y,
        target.y
    );
}

#[test]
fn unsupported_bodies_fall_and_rest_on_the_floor() {
    let mut scene = Scene::new(800.0, 600.0);
    let spawned = scene.spawn_box_at(400.0, 400.0);
    let start = body_y(&scene, spawned.body);

    for _ in 0..10 {
        scene.step();
    }
    assert!(body_y(&scene, spawned.body) < start);

    for _ in 0..600 {
        scene.step();
    }

    let rest = body_y(&scene, spawned.body);
    // The floor top edge is at 60; the box half-height is at most 30.
    assert!(rest > 55.0 && rest < 100.0, "rest height = {}", rest);

    let velocity = scene
        .bodies()
        .rigid_body(spawned.body)
        .unwrap()
        .velocity()
        .linear
        .norm();
    assert!(velocity < 10.0, "rest speed = {}", velocity);
}

#[test]
fn a_figure_comes_to_rest_above_the_floor() {
    let mut scene = Scene::new(800.0, 600.0);
    let figure = scene.spawn_person_at(300.0, 400.0);

    for _ in 0..900 {
        scene.step();
    }

    for body in figure.bodies.iter() {
        let y = body_y(&scene, *body);
        assert!(y > 55.0, "part ended at y = {}", y);
    }
}
