//! Scene container and the procedural showcase scene.
//!
//! The scene is a flat, ordered list of spheres. Hit results refer to a
//! sphere by its index in this list, never by reference, so the list can be
//! handed to the renderer as one read-only buffer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sphaera_math::Vec3;

use crate::{Color, Material, MaterialKind, Result, SceneError, Sphere};

/// An ordered, index-addressable list of spheres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

/// Number of spheres per material variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialCounts {
    pub diffuse: usize,
    pub metal: usize,
    pub dielectric: usize,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere and return its index.
    pub fn push(&mut self, sphere: Sphere) -> usize {
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    /// All spheres in index order.
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Get the sphere at `index`.
    pub fn get(&self, index: usize) -> Option<&Sphere> {
        self.spheres.get(index)
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Count spheres by material variant.
    pub fn material_counts(&self) -> MaterialCounts {
        self.spheres
            .iter()
            .fold(MaterialCounts::default(), |mut counts, sphere| {
                match sphere.material().kind() {
                    MaterialKind::Diffuse => counts.diffuse += 1,
                    MaterialKind::Metal => counts.metal += 1,
                    MaterialKind::Dielectric => counts.dielectric += 1,
                }
                counts
            })
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            spheres: iter.into_iter().collect(),
        }
    }
}

/// Index of the ground sphere in the showcase scene.
pub const GROUND_INDEX: usize = 0;

/// Fixed gap added to the sum of two radii in the placement check.
const PLACEMENT_MARGIN: f32 = 1.0;

/// Parameters for the procedural showcase scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    /// Cells run from `-half_extent` to `half_extent - 1` on both axes.
    pub grid_half_extent: i32,
    /// Nominal radius of a field sphere.
    pub base_radius: f32,
    /// Field radii are drawn from `base_radius ± radius_jitter`.
    pub radius_jitter: f32,
    /// Seed for the placement RNG. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            grid_half_extent: 10,
            base_radius: 0.2,
            radius_jitter: 0.05,
            seed: None,
        }
    }
}

impl SceneParams {
    /// Default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Check that the parameters describe a placeable field.
    pub fn validate(&self) -> Result<()> {
        if self.grid_half_extent <= 0 {
            return Err(SceneError::EmptyGrid(self.grid_half_extent));
        }
        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return Err(SceneError::InvalidRadius(self.base_radius));
        }
        if !(self.radius_jitter >= 0.0 && self.radius_jitter < self.base_radius) {
            return Err(SceneError::InvalidJitter {
                radius: self.base_radius,
                jitter: self.radius_jitter,
            });
        }
        Ok(())
    }
}

/// Builds the showcase scene: a ground sphere, three feature spheres and a
/// randomized field of small spheres.
pub struct SceneBuilder {
    params: SceneParams,
}

impl SceneBuilder {
    pub fn new(params: SceneParams) -> Self {
        Self { params }
    }

    /// Build the showcase scene from the configured seed (or a fresh one).
    pub fn build_showcase(&self) -> Result<Scene> {
        self.params.validate()?;

        let seed = self.params.seed.unwrap_or_else(rand::random);
        log::debug!("Building showcase scene with seed {}", seed);

        let mut rng = StdRng::seed_from_u64(seed);
        Ok(self.build_with_rng(&mut rng))
    }

    /// Build the showcase scene drawing all randomness from `rng`.
    ///
    /// Parameters must already be validated.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Scene {
        let mut scene = Scene::new();

        // Ground
        scene.push(Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Material::diffuse(Color::new(0.5, 0.5, 0.5)),
        ));

        // Three feature spheres
        scene.push(Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::dielectric(1.5),
        ));
        scene.push(Sphere::new(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
        ));
        scene.push(Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Material::metal(Color::new(0.8, 0.8, 0.9), 0.15),
        ));

        let extent = self.params.grid_half_extent;
        let mut rejected = 0usize;

        for a in -extent..extent {
            for b in -extent..extent {
                let radius = self.params.base_radius
                    + self.params.radius_jitter * (2.0 * rng.gen::<f32>() - 1.0);
                let center = Vec3::new(
                    a as f32 + 0.9 * rng.gen::<f32>(),
                    radius,
                    b as f32 + 0.9 * rng.gen::<f32>(),
                );

                if overlaps_existing(&scene, center, radius) {
                    rejected += 1;
                    continue;
                }

                let material = random_material(rng);
                scene.push(Sphere::new(center, radius, material));
            }
        }

        let counts = scene.material_counts();
        log::info!(
            "Built showcase scene: {} spheres ({} diffuse, {} metal, {} dielectric), {} cells rejected",
            scene.len(),
            counts.diffuse,
            counts.metal,
            counts.dielectric,
            rejected
        );

        scene
    }
}

/// True if a sphere at `center` would sit too close to one already placed.
///
/// Every field sphere rests on the ground, so the ground is skipped.
fn overlaps_existing(scene: &Scene, center: Vec3, radius: f32) -> bool {
    scene
        .spheres()
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != GROUND_INDEX)
        .any(|(_, other)| {
            let min_distance = radius + other.radius() + PLACEMENT_MARGIN;
            center.distance(other.center()) < min_distance
        })
}

/// Pick a field material: 80% diffuse, 15% metal, 5% dielectric.
fn random_material<R: Rng + ?Sized>(rng: &mut R) -> Material {
    let choose_mat: f32 = rng.gen();

    if choose_mat < 0.8 {
        let albedo = Color::new(
            rng.gen::<f32>() * rng.gen::<f32>(),
            rng.gen::<f32>() * rng.gen::<f32>(),
            rng.gen::<f32>() * rng.gen::<f32>(),
        );
        Material::diffuse(albedo)
    } else if choose_mat < 0.95 {
        let albedo = Color::new(
            0.5 + 0.5 * rng.gen::<f32>(),
            0.5 + 0.5 * rng.gen::<f32>(),
            0.5 + 0.5 * rng.gen::<f32>(),
        );
        Material::metal(albedo, 0.5 * rng.gen::<f32>())
    } else {
        Material::dielectric(rng.gen_range(1.3..1.9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showcase(seed: u64) -> Scene {
        SceneBuilder::new(SceneParams::seeded(seed))
            .build_showcase()
            .unwrap()
    }

    #[test]
    fn test_fixed_elements() {
        let scene = showcase(1);

        let ground = scene.get(GROUND_INDEX).unwrap();
        assert_eq!(ground.center(), Vec3::new(0.0, -1000.0, 0.0));
        assert_eq!(ground.radius_squared(), 1000.0 * 1000.0);

        let metals = scene.spheres()[1..4]
            .iter()
            .filter(|s| s.material().kind() == MaterialKind::Metal)
            .count();
        assert_eq!(metals, 2);
        assert!(scene.spheres()[1..4].iter().all(|s| s.radius() == 1.0));
    }

    #[test]
    fn test_field_is_bounded_by_grid() {
        let params = SceneParams::seeded(2);
        let scene = showcase(2);
        let cells = (2 * params.grid_half_extent).pow(2) as usize;

        assert!(scene.len() > 4, "expected some field spheres");
        assert!(scene.len() <= 4 + cells);
    }

    #[test]
    fn test_field_spheres_keep_their_distance() {
        let scene = showcase(3);
        let spheres = scene.spheres();

        for i in 4..spheres.len() {
            for earlier in &spheres[1..i] {
                let min = spheres[i].radius() + earlier.radius() + PLACEMENT_MARGIN;
                assert!(spheres[i].center().distance(earlier.center()) >= min - 1e-4);
            }
        }
    }

    #[test]
    fn test_field_radius_and_material_ranges() {
        let params = SceneParams::default();
        let scene = showcase(4);

        for sphere in &scene.spheres()[4..] {
            let r = sphere.radius();
            assert!(r >= params.base_radius - params.radius_jitter - 1e-5);
            assert!(r <= params.base_radius + params.radius_jitter + 1e-5);
            // Resting on the ground plane
            assert!((sphere.center().y - r).abs() < 1e-5);

            match *sphere.material() {
                Material::Metal { fuzz, albedo } => {
                    assert!((0.0..=0.5).contains(&fuzz));
                    assert!(albedo.min_element() >= 0.5);
                }
                Material::Dielectric { refractive_index } => {
                    assert!((1.3..1.9).contains(&refractive_index));
                }
                Material::Diffuse { albedo } => {
                    assert!(albedo.max_element() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        assert_eq!(showcase(42), showcase(42));
    }

    #[test]
    fn test_invalid_params() {
        let params = SceneParams {
            grid_half_extent: 0,
            ..Default::default()
        };
        assert_eq!(
            SceneBuilder::new(params).build_showcase(),
            Err(SceneError::EmptyGrid(0))
        );

        let params = SceneParams {
            radius_jitter: 0.3,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SceneError::InvalidJitter { .. })
        ));

        let params = SceneParams {
            base_radius: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(SceneError::InvalidRadius(_))));
    }

    #[test]
    fn test_material_counts() {
        let scene: Scene = [
            Sphere::new(Vec3::ZERO, 1.0, Material::default()),
            Sphere::new(Vec3::X, 1.0, Material::metal(Color::ONE, 0.1)),
            Sphere::new(Vec3::Y, 1.0, Material::dielectric(1.5)),
            Sphere::new(Vec3::Z, 1.0, Material::dielectric(1.7)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            scene.material_counts(),
            MaterialCounts {
                diffuse: 1,
                metal: 1,
                dielectric: 2
            }
        );
    }
}
