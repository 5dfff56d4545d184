//! Main binary for running the spawn designer standalone.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_spawn_designer::scene::{spawn_placed_primitive, PrimitiveAssets};
use bevy_spawn_designer::{DesignerPlugin, PrimitiveShape};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Spawn Designer".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(DesignerPlugin)
        .add_systems(Startup, setup_demo_scene)
        .run();
}

/// Ground slab plus a few blocks to spawn onto
fn setup_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    assets: Res<PrimitiveAssets>,
) {
    commands.spawn((
        Name::new("Ground"),
        Mesh3d(meshes.add(Cuboid::new(40.0, 0.2, 40.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.38, 0.35),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.1, 0.0),
        RigidBody::Static,
        Collider::cuboid(40.0, 0.2, 40.0),
    ));

    let blocks = [
        (Vec3::new(4.0, 1.0, -3.0), Vec3::new(2.0, 2.0, 2.0), 0.0),
        (Vec3::new(-5.0, 1.5, 2.0), Vec3::new(3.0, 3.0, 1.0), 0.6),
        (Vec3::new(1.0, 0.25, 6.0), Vec3::new(6.0, 0.5, 2.0), -0.3),
    ];
    for (i, (position, size, yaw)) in blocks.into_iter().enumerate() {
        spawn_placed_primitive(
            &mut commands,
            &assets,
            PrimitiveShape::Cube,
            Transform::from_translation(position)
                .with_rotation(Quat::from_rotation_y(yaw))
                .with_scale(size),
            &format!("Block {}", i + 1),
        );
    }

    spawn_placed_primitive(
        &mut commands,
        &assets,
        PrimitiveShape::Sphere,
        Transform::from_xyz(-2.0, 1.0, -6.0).with_scale(Vec3::splat(2.0)),
        "Boulder",
    );
}
