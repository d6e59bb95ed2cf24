//! Explosion debris particles.
//!
//! ## Design
//!
//! Debris are lightweight ECS entities with a [`Particle`] component that
//! stores velocity, age and colour.  Two systems handle them:
//!
//! | System                        | Schedule | Purpose                                      |
//! |-------------------------------|----------|----------------------------------------------|
//! | `attach_particle_mesh_system` | Update   | Attach `Mesh2d` to freshly-spawned particles |
//! | `particle_update_system`      | Update   | Move, fade, and despawn expired particles    |
//!
//! [`spawn_explosion_particles`] only needs `&mut Commands`; the mesh is
//! attached one frame later.  All particles share one circle mesh
//! ([`ParticleMesh`]) and each owns a [`ColorMaterial`] so it can fade alone.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::Rng;

/// Shared circle mesh used by all particle entities (created once at startup).
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

/// Short-lived debris entity.
#[derive(Component)]
pub struct Particle {
    /// World-space velocity (units/s).
    pub velocity: Vec2,
    /// Time alive so far (s).
    pub age: f32,
    /// Total lifetime (s); entity is despawned when `age >= lifetime`.
    pub lifetime: f32,
    /// Base colour (sRGB, 0–1).
    pub rgb: [f32; 3],
    /// `None` until `attach_particle_mesh_system` runs.
    pub material: Option<Handle<ColorMaterial>>,
}

impl Particle {
    /// Quadratic ease-out: bright at birth, rapid fade at the end.
    pub fn alpha(&self) -> f32 {
        let t = (self.age / self.lifetime).clamp(0.0, 1.0);
        (1.0 - t).powi(2)
    }

    fn color(&self, alpha: f32) -> Color {
        Color::srgba(self.rgb[0], self.rgb[1], self.rgb[2], alpha)
    }
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh).add_systems(
            Update,
            (attach_particle_mesh_system, particle_update_system).chain(),
        );
    }
}

fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(circle_mesh(2.5, 8));
    commands.insert_resource(ParticleMesh(handle));
}

/// Attach `Mesh2d` + `MeshMaterial2d` to every newly-spawned [`Particle`].
pub fn attach_particle_mesh_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Particle), Added<Particle>>,
) {
    for (entity, mut particle) in query.iter_mut() {
        let mat_handle = materials.add(ColorMaterial::from_color(particle.color(1.0)));
        particle.material = Some(mat_handle.clone());
        commands
            .entity(entity)
            .insert((Mesh2d(particle_mesh.0.clone()), MeshMaterial2d(mat_handle)));
    }
}

/// Translate by velocity, fade, and despawn at end of life.
pub fn particle_update_system(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Transform, &mut Particle)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut particle) in query.iter_mut() {
        particle.age += dt;

        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation.x += particle.velocity.x * dt;
        transform.translation.y += particle.velocity.y * dt;

        let alpha = particle.alpha();
        if let Some(ref handle) = particle.material {
            if let Some(mat) = materials.get_mut(handle) {
                mat.color = particle.color(alpha);
            }
        }
    }
}

/// Spawn `count` debris particles flung radially out of `pos`.
pub fn spawn_explosion_particles(commands: &mut Commands, pos: Vec2, count: u32) {
    let mut rng = rand::thread_rng();

    for i in 0..count {
        // Even fan with jitter so the burst reads as round.
        let base = std::f32::consts::TAU * i as f32 / count.max(1) as f32;
        let angle = base + rng.gen_range(-0.2..0.2);
        let speed = rng.gen_range(80.0_f32..220.0_f32);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        // Fire colours: orange to yellow.
        let rgb = [
            rng.gen_range(0.95_f32..1.0_f32),
            rng.gen_range(0.35_f32..0.80_f32),
            rng.gen_range(0.0_f32..0.15_f32),
        ];

        commands.spawn((
            Particle {
                velocity,
                age: 0.0,
                lifetime: rng.gen_range(0.5_f32..1.1_f32),
                rgb,
                material: None,
            },
            Transform::from_translation(pos.extend(2.0)),
            Visibility::default(),
        ));
    }
}

fn circle_mesh(radius: f32, sides: u32) -> Mesh {
    let n = sides as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    // Centre vertex.
    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let x = radius * angle.cos();
        let y = radius * angle.sin();
        positions.push([x, y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x / (2.0 * radius) + 0.5, y / (2.0 * radius) + 0.5]);
    }

    let mut indices: Vec<u32> = Vec::with_capacity(n * 3);
    for i in 0..n as u32 {
        let v1 = i + 1;
        let v2 = (i + 1) % n as u32 + 1;
        indices.extend_from_slice(&[0, v1, v2]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_mesh_is_a_triangle_fan() {
        let mesh = circle_mesh(2.5, 8);
        assert_eq!(mesh.count_vertices(), 9);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(24));
    }

    #[test]
    fn alpha_fades_to_zero() {
        let mut p = Particle {
            velocity: Vec2::ZERO,
            age: 0.0,
            lifetime: 1.0,
            rgb: [1.0, 0.5, 0.0],
            material: None,
        };
        assert_eq!(p.alpha(), 1.0);
        p.age = 0.5;
        assert!((p.alpha() - 0.25).abs() < 1e-6);
        p.age = 2.0;
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn explosion_spawns_requested_count() {
        let mut app = App::new();
        app.add_systems(Update, |mut commands: Commands| {
            spawn_explosion_particles(&mut commands, Vec2::new(5.0, -5.0), 12);
        });
        app.update();
        let mut q = app.world_mut().query::<&Particle>();
        assert_eq!(q.iter(app.world()).count(), 12);
    }
}
