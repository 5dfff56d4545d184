use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{primitive_colors, DRAFT_ALPHA};

/// Available primitive shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect, Default)]
pub enum PrimitiveShape {
    #[default]
    Cube,
    Sphere,
    Cylinder,
    Capsule,
    Plane,
}

impl PrimitiveShape {
    pub const ALL: [PrimitiveShape; 5] = [
        PrimitiveShape::Cube,
        PrimitiveShape::Sphere,
        PrimitiveShape::Cylinder,
        PrimitiveShape::Capsule,
        PrimitiveShape::Plane,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrimitiveShape::Cube => "Cube",
            PrimitiveShape::Sphere => "Sphere",
            PrimitiveShape::Cylinder => "Cylinder",
            PrimitiveShape::Capsule => "Capsule",
            PrimitiveShape::Plane => "Plane",
        }
    }

    /// Create the mesh for this primitive shape
    pub fn create_mesh(&self) -> Mesh {
        match self {
            PrimitiveShape::Cube => Mesh::from(Cuboid::new(1.0, 1.0, 1.0)),
            PrimitiveShape::Sphere => Mesh::from(Sphere::new(0.5)),
            PrimitiveShape::Cylinder => Mesh::from(Cylinder::new(0.5, 1.0)),
            PrimitiveShape::Capsule => Mesh::from(Capsule3d::new(0.25, 0.5)),
            PrimitiveShape::Plane => Plane3d::default().mesh().size(2.0, 2.0).build(),
        }
    }

    /// Get the default color for this primitive shape
    pub fn default_color(&self) -> Color {
        primitive_colors::for_shape(*self)
    }

    /// Create a standard material for this primitive shape
    pub fn create_material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.default_color(),
            ..default()
        }
    }

    /// Translucent variant of the material, used while the shape is a draft
    pub fn create_draft_material(&self) -> StandardMaterial {
        StandardMaterial {
            base_color: self.default_color().with_alpha(DRAFT_ALPHA),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }
    }

    /// Create the collider for this primitive shape
    pub fn create_collider(&self) -> Collider {
        match self {
            PrimitiveShape::Cube => Collider::cuboid(1.0, 1.0, 1.0),
            PrimitiveShape::Sphere => Collider::sphere(0.5),
            PrimitiveShape::Cylinder => Collider::cylinder(0.5, 1.0),
            PrimitiveShape::Capsule => Collider::capsule(0.25, 0.5),
            PrimitiveShape::Plane => Collider::cuboid(2.0, 0.01, 2.0),
        }
    }

    /// Local half-extent at unit scale (Bevy axes, Y up)
    pub fn half_extents(&self) -> Vec3 {
        match self {
            PrimitiveShape::Cube | PrimitiveShape::Sphere | PrimitiveShape::Cylinder => {
                Vec3::splat(0.5)
            }
            PrimitiveShape::Capsule => Vec3::new(0.25, 0.5, 0.25),
            PrimitiveShape::Plane => Vec3::new(1.0, 0.005, 1.0),
        }
    }
}

/// Marker for objects committed by the spawn tool
#[derive(Component, Serialize, Deserialize, Clone, Reflect)]
#[reflect(Component)]
pub struct PlacedAsset {
    pub shape: PrimitiveShape,
}

/// Marker for the provisional object shown during a drag
#[derive(Component, Clone, Copy, Debug)]
pub struct DraftPreview {
    pub shape: PrimitiveShape,
}

/// One spawnable shape and whether it takes part in the random pick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct PaletteEntry {
    pub shape: PrimitiveShape,
    pub enabled: bool,
}

/// Shapes the spawn tool chooses from on every pointer-down
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SpawnPalette {
    pub entries: Vec<PaletteEntry>,
}

impl Default for SpawnPalette {
    fn default() -> Self {
        Self {
            entries: PrimitiveShape::ALL
                .iter()
                .map(|&shape| PaletteEntry {
                    shape,
                    enabled: shape != PrimitiveShape::Plane,
                })
                .collect(),
        }
    }
}

impl SpawnPalette {
    pub fn enabled(&self) -> impl Iterator<Item = PrimitiveShape> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.shape)
    }

    /// Uniform pick among the enabled shapes.
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<PrimitiveShape> {
        let count = self.enabled().count();
        if count == 0 {
            return None;
        }
        self.enabled().nth(rng.usize(..count))
    }
}

/// Mesh and material handles shared by every spawned primitive
#[derive(Resource)]
pub struct PrimitiveAssets {
    meshes: Vec<(PrimitiveShape, Handle<Mesh>)>,
    materials: Vec<(PrimitiveShape, Handle<StandardMaterial>)>,
    draft_materials: Vec<(PrimitiveShape, Handle<StandardMaterial>)>,
}

impl FromWorld for PrimitiveAssets {
    fn from_world(world: &mut World) -> Self {
        let meshes = {
            let mut assets = world.resource_mut::<Assets<Mesh>>();
            PrimitiveShape::ALL
                .map(|shape| (shape, assets.add(shape.create_mesh())))
                .to_vec()
        };
        let mut assets = world.resource_mut::<Assets<StandardMaterial>>();
        let materials = PrimitiveShape::ALL
            .map(|shape| (shape, assets.add(shape.create_material())))
            .to_vec();
        let draft_materials = PrimitiveShape::ALL
            .map(|shape| (shape, assets.add(shape.create_draft_material())))
            .to_vec();

        Self {
            meshes,
            materials,
            draft_materials,
        }
    }
}

fn lookup<T: Asset>(handles: &[(PrimitiveShape, Handle<T>)], shape: PrimitiveShape) -> Handle<T> {
    handles
        .iter()
        .find(|(candidate, _)| *candidate == shape)
        .map(|(_, handle)| handle.clone())
        .unwrap_or_default()
}

impl PrimitiveAssets {
    pub fn mesh(&self, shape: PrimitiveShape) -> Handle<Mesh> {
        lookup(&self.meshes, shape)
    }

    pub fn material(&self, shape: PrimitiveShape) -> Handle<StandardMaterial> {
        lookup(&self.materials, shape)
    }

    pub fn draft_material(&self, shape: PrimitiveShape) -> Handle<StandardMaterial> {
        lookup(&self.draft_materials, shape)
    }
}

pub struct PrimitivesPlugin;

impl Plugin for PrimitivesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlacedAsset>()
            .register_type::<SpawnPalette>()
            .init_resource::<SpawnPalette>()
            .init_resource::<PrimitiveAssets>();
    }
}
