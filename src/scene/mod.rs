mod primitives;

pub use primitives::*;

use avian3d::prelude::*;
use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PrimitivesPlugin);
    }
}

/// Spawn a committed primitive with all required components
pub fn spawn_placed_primitive(
    commands: &mut Commands,
    assets: &PrimitiveAssets,
    shape: PrimitiveShape,
    transform: Transform,
    name: &str,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            PlacedAsset { shape },
            Mesh3d(assets.mesh(shape)),
            MeshMaterial3d(assets.material(shape)),
            transform,
            RigidBody::Static,
            shape.create_collider(),
        ))
        .id()
}

/// Generate a unique name by appending a counter
pub fn generate_unique_name(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut counter = 1;
    loop {
        let name = format!("{} {}", base, counter);
        if !is_taken(&name) {
            return name;
        }
        counter += 1;
    }
}
