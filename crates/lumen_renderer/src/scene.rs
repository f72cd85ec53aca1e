//! Recursive ray tracing over a scene of entities and point lights.
//!
//! For each pixel the scene casts one or more primary rays, finds the nearest
//! entity along each ray and shades it according to its material, recursing
//! for mirror reflection and refraction and casting shadow rays towards every
//! light.

use std::time::Instant;

use lumen_core::{EntityDescription, SceneDescription, SceneError, SceneOptions, SceneResult};
use lumen_math::{Color, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::camera::{sample_aperture, Camera, CAMERA_ORIGIN};
use crate::hittable::{Entity, Hittable, RayHit};
use crate::image_buffer::ImageSink;
use crate::material::{fresnel, reflect, refract, transmittance, MaterialType};
use crate::{Material, Plane, PointLight, Ray, Sphere, Triangle};

/// Deepest recursion level that still shades; deeper rays return black.
pub const MAX_DEPTH: u32 = 10;

/// Offset applied to secondary ray origins to avoid self-intersection.
pub const BIAS: f32 = 1e-4;

/// Rays averaged per pixel when depth of field is enabled.
pub const DOF_SAMPLES: u32 = 160;

/// Recursion depth of the first depth-of-field ray.
pub const DOF_START_DEPTH: u32 = 1;

/// Weight of the mirror term for glossy materials (the rest is diffuse).
pub const GLOSSY_FACTOR: f32 = 0.2;

/// A renderable scene. Entities and lights are read-only while rendering.
pub struct Scene {
    options: SceneOptions,
    entities: Vec<Entity>,
    lights: Vec<PointLight>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(options: SceneOptions) -> Self {
        Self {
            options,
            entities: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Build a scene from a loaded description.
    pub fn from_description(
        options: SceneOptions,
        description: &SceneDescription,
    ) -> SceneResult<Self> {
        let mut scene = Self::new(options);

        for (index, entity) in description.entities.iter().enumerate() {
            let material: Material = description
                .material(entity.material())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: entity.material().to_string(),
                })?
                .into();

            match entity {
                EntityDescription::Plane { center, normal, .. } => scene.add_entity(Plane::new(
                    Vec3::from_array(*center),
                    Vec3::from_array(*normal),
                    material,
                )),
                EntityDescription::Sphere { center, radius, .. } => {
                    scene.add_entity(Sphere::new(Vec3::from_array(*center), *radius, material))
                }
                EntityDescription::Triangle { v0, v1, v2, .. } => scene.add_entity(Triangle::new(
                    Vec3::from_array(*v0),
                    Vec3::from_array(*v1),
                    Vec3::from_array(*v2),
                    material,
                )),
            }
        }

        for light in &description.lights {
            scene.add_point_light(light.into());
        }

        Ok(scene)
    }

    /// Add an entity that should be rendered.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Add a point light that should be computed.
    pub fn add_point_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Render the scene into `image`, seeding the sampling stream from the
    /// scene options.
    pub fn render(&self, image: &mut dyn ImageSink) {
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        self.render_with_rng(image, &mut rng);
    }

    /// Render the scene into `image` in row-major order.
    pub fn render_with_rng(&self, image: &mut dyn ImageSink, rng: &mut dyn RngCore) {
        let (width, height) = (image.width(), image.height());
        let camera = Camera::new(width, height);
        let start = Instant::now();

        log::info!(
            "Rendering {}x{}: {} entities, {} lights, {}",
            width,
            height,
            self.entities.len(),
            self.lights.len(),
            self.sampling_mode()
        );

        let progress_step = (height / 10).max(1);
        for y in 0..height {
            if y % progress_step == 0 {
                log::info!("Rendering - {}%", y * 100 / height);
            }
            for x in 0..width {
                let color = self.render_pixel(&camera, x, y, rng);
                image.set_pixel(x, y, color);
            }
        }

        log::info!("Rendered in {:.2?}", start.elapsed());
    }

    fn sampling_mode(&self) -> String {
        if self.options.depth_of_field() {
            format!(
                "depth of field (aperture {}, focal length {}, {} samples)",
                self.options.aperture_radius, self.options.focal_length, DOF_SAMPLES
            )
        } else if self.options.aa_multiplier > 1 {
            let m = self.options.aa_multiplier;
            format!("anti-aliasing {}x{}", m, m)
        } else {
            "one ray per pixel".to_string()
        }
    }

    /// Final color of pixel (x, y).
    ///
    /// Depth of field takes priority over anti-aliasing; with neither
    /// configured a single ray goes through the pixel center.
    pub fn render_pixel(&self, camera: &Camera, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        if self.options.depth_of_field() {
            self.depth_of_field(camera.primary_direction(x, y), rng)
        } else if self.options.aa_multiplier > 1 {
            self.anti_alias(camera, x, y)
        } else {
            self.cast_ray(CAMERA_ORIGIN, camera.primary_direction(x, y), 0)
        }
    }

    /// Average an `m` x `m` grid of sub-pixel rays.
    fn anti_alias(&self, camera: &Camera, x: u32, y: u32) -> Color {
        let m = self.options.aa_multiplier;
        let sum: Color = camera
            .subpixel_directions(x, y, m)
            .map(|direction| self.cast_ray(CAMERA_ORIGIN, direction, 0))
            .sum();
        sum / (m as f32 * m as f32)
    }

    /// Thin-lens sampling: rays from random points on the aperture all pass
    /// through the point where the pinhole ray meets the focal plane.
    fn depth_of_field(&self, direction: Vec3, rng: &mut dyn RngCore) -> Color {
        let focal_point = CAMERA_ORIGIN + self.options.focal_length * direction;

        let mut sum = Color::ZERO;
        for _ in 0..DOF_SAMPLES {
            let origin = CAMERA_ORIGIN + sample_aperture(self.options.aperture_radius, rng);
            sum += self.cast_ray(origin, focal_point - origin, DOF_START_DEPTH);
        }
        sum / DOF_SAMPLES as f32
    }

    /// Color seen along a ray. `direction` need not be normalized.
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, depth: u32) -> Color {
        if depth > MAX_DEPTH {
            return Color::ZERO;
        }

        let ray = Ray::normalized(origin, direction);
        let Some((entity, hit)) = self.nearest_hit(&ray) else {
            return Color::ZERO;
        };

        match hit.material.kind() {
            MaterialType::Diffuse => self.diffuse_calc(&hit),
            MaterialType::Reflective => self.reflection(&hit, depth),
            MaterialType::Glossy => {
                let glossy = self.reflection(&hit, depth);
                let diffuse = self.diffuse_calc(&hit);
                glossy * GLOSSY_FACTOR + diffuse * (1.0 - GLOSSY_FACTOR)
            }
            MaterialType::Refractive => self.refraction(entity, &hit, depth),
        }
    }

    /// Nearest entity hit by the ray, by distance from its origin. Ties keep
    /// the entity added first.
    fn nearest_hit(&self, ray: &Ray) -> Option<(&Entity, RayHit<'_>)> {
        let mut closest: Option<(&Entity, RayHit<'_>)> = None;
        let mut t_near = f32::INFINITY;

        for entity in &self.entities {
            if let Some(hit) = entity.intersect(ray) {
                let distance = hit.position.distance(ray.origin());
                if distance < t_near {
                    t_near = distance;
                    closest = Some((entity, hit));
                }
            }
        }

        closest
    }

    /// Mirror reflection of the incoming ray.
    fn reflection(&self, hit: &RayHit<'_>, depth: u32) -> Color {
        let direction = reflect(hit.incident, hit.normal).normalize();
        self.cast_ray(hit.position + hit.normal * BIAS, direction, depth + 1)
    }

    /// Fresnel-weighted mix of reflection and refraction for a dielectric.
    fn refraction(&self, entity: &Entity, hit: &RayHit<'_>, depth: u32) -> Color {
        let material = hit.material;
        let ior = material.refractive_index();
        let kr = fresnel(hit.incident, hit.normal, ior);
        let outside = hit.incident.dot(hit.normal) < 0.0;
        let offset = hit.normal * BIAS;

        // No refraction on total internal reflection
        let refracted = if kr < 1.0 {
            refract(hit.incident, hit.normal, ior)
        } else {
            None
        };

        let refraction_color = match refracted {
            Some(direction) => {
                let direction = direction.normalize();
                let origin = if outside {
                    hit.position - offset
                } else {
                    hit.position + offset
                };

                let color = self.cast_ray(origin, direction, depth + 1);
                // Light that travels through the body of the entity is absorbed
                if entity.intersect(&Ray::new(origin, direction)).is_some() {
                    color * transmittance(material.color())
                } else {
                    color
                }
            }
            None => Color::ZERO,
        };

        let reflection_direction = reflect(hit.incident, hit.normal).normalize();
        let reflection_origin = if outside {
            hit.position + offset
        } else {
            hit.position - offset
        };
        let reflection_color = self.cast_ray(reflection_origin, reflection_direction, depth + 1);

        reflection_color * kr + refraction_color * (1.0 - kr)
    }

    /// Direct lighting from every light that is not in shadow.
    fn diffuse_calc(&self, hit: &RayHit<'_>) -> Color {
        self.lights
            .iter()
            .filter(|light| !self.is_occluded(hit, light))
            .map(|light| diffuse_color(hit, light))
            .sum()
    }

    /// Whether any entity lies between the hit point and the light.
    fn is_occluded(&self, hit: &RayHit<'_>, light: &PointLight) -> bool {
        let shadow_ray = Ray::new(
            hit.position + hit.normal * BIAS,
            light.direction_from(hit.position),
        );
        let distance_to_light = light.distance_from(hit.position);

        self.entities.iter().any(|entity| {
            entity
                .intersect(&shadow_ray)
                .is_some_and(|blocker| blocker.position.distance(hit.position) < distance_to_light)
        })
    }
}

/// Lambertian contribution of one light, without distance falloff.
pub fn diffuse_color(hit: &RayHit<'_>, light: &PointLight) -> Color {
    let to_light = (light.position() - hit.position).normalize();
    hit.material.color() * light.color() * hit.normal.dot(to_light).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImageBuffer;

    const EPS: f32 = 1e-4;

    fn white() -> Material {
        Material::diffuse(Color::ONE)
    }

    fn approx_eq(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn test_depth_cap_returns_black() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        // Still shading at the deepest level
        let lit = scene.cast_ray(Vec3::ZERO, Vec3::Z, MAX_DEPTH);
        assert!(approx_eq(lit, Color::ONE));

        assert_eq!(scene.cast_ray(Vec3::ZERO, Vec3::Z, MAX_DEPTH + 1), Color::ZERO);
    }

    #[test]
    fn test_miss_is_black() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        assert_eq!(scene.cast_ray(Vec3::ZERO, Vec3::Y, 0), Color::ZERO);
    }

    #[test]
    fn test_diffuse_without_lights_is_black() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(0.3, 0.6, 0.9)),
        ));

        assert_eq!(scene.cast_ray(Vec3::ZERO, Vec3::Z, 0), Color::ZERO);
    }

    fn lambert_scene() -> Scene {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(0.5, 1.0, 0.25)),
        ));
        scene.add_point_light(PointLight::new(
            Vec3::new(0.0, 3.0, 0.0),
            Color::new(1.0, 0.5, 2.0),
        ));
        scene
    }

    #[test]
    fn test_unoccluded_light_matches_lambert() {
        let scene = lambert_scene();

        // Hit at (0, 0, 4), normal -Z, light direction (0, 0.6, -0.8)
        let expected = Color::new(0.5, 1.0, 0.25) * Color::new(1.0, 0.5, 2.0) * 0.8;
        let color = scene.cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(approx_eq(color, expected), "got {:?}", color);
    }

    #[test]
    fn test_occluded_light_contributes_nothing() {
        let mut scene = lambert_scene();
        // Halfway between the hit point and the light
        scene.add_entity(Sphere::new(Vec3::new(0.0, 1.5, 2.0), 0.5, white()));

        assert_eq!(scene.cast_ray(Vec3::ZERO, Vec3::Z, 0), Color::ZERO);
    }

    #[test]
    fn test_blocker_beyond_light_does_not_occlude() {
        let mut scene = lambert_scene();
        // On the same line, but past the light
        scene.add_entity(Sphere::new(Vec3::new(0.0, 4.5, -2.0), 0.5, white()));

        let expected = Color::new(0.5, 1.0, 0.25) * Color::new(1.0, 0.5, 2.0) * 0.8;
        assert!(approx_eq(scene.cast_ray(Vec3::ZERO, Vec3::Z, 0), expected));
    }

    #[test]
    fn test_nearest_entity_wins() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 10.0),
            1.0,
            Material::diffuse(Color::new(0.0, 0.0, 1.0)),
        ));
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        let color = scene.cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(approx_eq(color, Color::new(1.0, 0.0, 0.0)), "got {:?}", color);
    }

    #[test]
    fn test_coincident_entities_keep_first_added() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(0.0, 1.0, 0.0)),
        ));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        let color = scene.cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(approx_eq(color, Color::new(1.0, 0.0, 0.0)), "got {:?}", color);
    }

    #[test]
    fn test_mirror_reflects_object_behind_camera() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Plane::new(
            Vec3::new(0.0, 0.0, 10.0),
            -Vec3::Z,
            Material::reflective(Color::ONE),
        ));
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Material::diffuse(Color::new(1.0, 0.0, 0.0)),
        ));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        let color = scene.cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(approx_eq(color, Color::new(1.0, 0.0, 0.0)), "got {:?}", color);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let mut scene = Scene::new(SceneOptions::default());
        let mirror = Material::reflective(Color::ONE);
        scene.add_entity(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, mirror));
        scene.add_entity(Plane::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, mirror));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 1.0, 0.0), Color::ONE));

        assert_eq!(scene.cast_ray(Vec3::ZERO, Vec3::Z, 0), Color::ZERO);
    }

    fn glossy_test_scene(kind: MaterialType) -> Scene {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(kind, Color::new(0.9, 0.8, 0.7), 1.0),
        ));
        scene.add_entity(Plane::new(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::Y,
            Material::diffuse(Color::new(0.2, 0.9, 0.2)),
        ));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));
        scene
    }

    #[test]
    fn test_glossy_blends_reflection_and_diffuse() {
        let direction = Vec3::new(0.0, -0.15, 1.0);

        let reflective =
            glossy_test_scene(MaterialType::Reflective).cast_ray(Vec3::ZERO, direction, 0);
        let diffuse = glossy_test_scene(MaterialType::Diffuse).cast_ray(Vec3::ZERO, direction, 0);
        let glossy = glossy_test_scene(MaterialType::Glossy).cast_ray(Vec3::ZERO, direction, 0);

        assert!(reflective.length() > 0.0);
        assert!(diffuse.length() > 0.0);
        assert!(approx_eq(glossy, reflective * 0.2 + diffuse * 0.8));
    }

    #[test]
    fn test_refractive_sphere_alone_is_black() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::refractive(Color::splat(0.2), 1.5),
        ));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        for direction in [Vec3::Z, Vec3::new(0.1, 0.05, 1.0), Vec3::new(0.19, 0.0, 1.0)] {
            assert_eq!(scene.cast_ray(Vec3::ZERO, direction, 0), Color::ZERO);
        }
    }

    fn glass_in_front_of_wall(absorbance: Color) -> Scene {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::refractive(absorbance, 1.5),
        ));
        scene.add_entity(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, white()));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 3.0, 8.0), Color::ONE));
        scene
    }

    #[test]
    fn test_refraction_shows_wall_behind_glass() {
        let clear = glass_in_front_of_wall(Color::ZERO).cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(clear.min_element() > 0.0, "got {:?}", clear);
    }

    #[test]
    fn test_refraction_absorbs_inside_medium() {
        let clear = glass_in_front_of_wall(Color::ZERO).cast_ray(Vec3::ZERO, Vec3::Z, 0);
        let tinted =
            glass_in_front_of_wall(Color::new(0.0, -1.0, -2.0)).cast_ray(Vec3::ZERO, Vec3::Z, 0);

        assert!(tinted.x > 0.0);
        assert!(tinted.y < clear.y);
        assert!(tinted.z < tinted.y);
    }

    #[test]
    fn test_aa_multiplier_one_matches_single_ray() {
        let scene = lambert_scene();
        let camera = Camera::new(32, 32);
        let mut rng = StdRng::seed_from_u64(1);

        for (x, y) in [(16, 16), (15, 17), (0, 0), (20, 10)] {
            let pixel = scene.render_pixel(&camera, x, y, &mut rng);
            let single = scene.cast_ray(CAMERA_ORIGIN, camera.primary_direction(x, y), 0);
            assert_eq!(pixel, single);
        }
    }

    #[test]
    fn test_aa_averages_subpixel_rays() {
        let mut scene = Scene::new(SceneOptions::default().with_aa_multiplier(3));
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        let camera = Camera::new(20, 20);
        let mut rng = StdRng::seed_from_u64(1);

        // Pixel on the silhouette, partly covered
        let (x, y) = (12, 10);
        let expected = camera
            .subpixel_directions(x, y, 3)
            .map(|d| scene.cast_ray(CAMERA_ORIGIN, d, 0))
            .fold(Color::ZERO, |acc, c| acc + c)
            / 9.0;

        assert!(approx_eq(scene.render_pixel(&camera, x, y, &mut rng), expected));
    }

    #[test]
    fn test_zero_aperture_matches_pinhole() {
        let pinhole = lambert_scene();
        let mut lens = Scene::new(SceneOptions::default().with_lens(0.0, 5.0));
        lens.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::diffuse(Color::new(0.5, 1.0, 0.25)),
        ));
        lens.add_point_light(PointLight::new(
            Vec3::new(0.0, 3.0, 0.0),
            Color::new(1.0, 0.5, 2.0),
        ));

        let camera = Camera::new(16, 16);
        let mut rng = StdRng::seed_from_u64(3);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(
                    lens.render_pixel(&camera, x, y, &mut rng),
                    pinhole.render_pixel(&camera, x, y, &mut rng)
                );
            }
        }
    }

    #[test]
    fn test_depth_of_field_is_reproducible() {
        let options = SceneOptions::default().with_lens(0.2, 4.0).with_seed(99);
        let build = || {
            let mut scene = Scene::new(options);
            scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
            scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));
            scene
        };

        let mut first = ImageBuffer::new(8, 8);
        let mut second = ImageBuffer::new(8, 8);
        build().render(&mut first);
        build().render(&mut second);

        assert_eq!(first.pixels, second.pixels);
        assert!(first.get(4, 4).length() > 0.0);
    }

    #[test]
    fn test_depth_of_field_blurs_silhouette() {
        let options = SceneOptions::default().with_lens(0.5, 10.0);
        let mut blurred = Scene::new(options);
        let mut sharp = Scene::new(SceneOptions::default());
        for scene in [&mut blurred, &mut sharp] {
            scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
            scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));
        }

        // Just outside the silhouette: black when sharp, lit once blurred
        let camera = Camera::new(100, 100);
        let mut rng = StdRng::seed_from_u64(5);
        let (x, y) = (68, 50);
        assert_eq!(sharp.render_pixel(&camera, x, y, &mut rng), Color::ZERO);
        assert!(blurred.render_pixel(&camera, x, y, &mut rng).length() > 0.0);
    }

    /// Mirror corridor y = +-`half_width` ending in a white wall at `wall_z`.
    /// A ray leaving the origin with slope `half_width` bounces at z = 1, 3, 5...
    /// so a wall at z = 2n is reached after exactly n reflections.
    fn mirror_corridor(options: SceneOptions, half_width: f32, wall_z: f32) -> Scene {
        let mirror = Material::reflective(Color::ONE);
        let mut scene = Scene::new(options);
        scene.add_entity(Plane::new(Vec3::new(0.0, half_width, 0.0), -Vec3::Y, mirror));
        scene.add_entity(Plane::new(Vec3::new(0.0, -half_width, 0.0), Vec3::Y, mirror));
        scene.add_entity(Plane::new(Vec3::new(0.0, 0.0, wall_z), -Vec3::Z, white()));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 0.0, wall_z - 0.5), Color::ONE));
        scene
    }

    #[test]
    fn test_depth_of_field_rays_start_one_level_deep() {
        // Pixel (0, 0) of a 1x2 image looks up at a slope with z = 1
        let camera = Camera::new(1, 2);
        let half_width = camera.primary_direction(0, 0).y;
        let lens = SceneOptions::default().with_lens(1e-3, 10.0).with_seed(4);
        let mut rng = StdRng::seed_from_u64(4);

        // Ten reflections: the wall is shaded at depth 10 from a pinhole ray
        // but at depth 11 from a lens ray
        let pinhole = mirror_corridor(SceneOptions::default(), half_width, 20.0);
        let lit = pinhole.render_pixel(&camera, 0, 0, &mut rng);
        assert!(lit.min_element() > 0.9, "got {:?}", lit);

        let blurred = mirror_corridor(lens, half_width, 20.0);
        assert_eq!(blurred.render_pixel(&camera, 0, 0, &mut rng), Color::ZERO);

        // Nine reflections stay within reach of the lens rays
        let blurred = mirror_corridor(lens, half_width, 18.0);
        let lit = blurred.render_pixel(&camera, 0, 0, &mut rng);
        assert!(lit.min_element() > 0.9, "got {:?}", lit);

        assert_eq!(DOF_START_DEPTH, 1);
    }

    /// Closest distance from `point` to the primary ray through pixel (x, y).
    fn primary_ray_clearance(camera: &Camera, x: u32, y: u32, point: Vec3) -> f32 {
        let dir = camera.primary_direction(x, y).normalize();
        let to_point = point - CAMERA_ORIGIN;
        (to_point - dir * to_point.dot(dir)).length()
    }

    #[test]
    fn test_white_sphere_lit_from_above() {
        let center = Vec3::new(0.0, 0.0, 5.0);
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(center, 1.0, white()));
        scene.add_point_light(PointLight::new(Vec3::new(0.0, 5.0, 5.0), Color::ONE));

        let mut image = ImageBuffer::new(100, 100);
        scene.render(&mut image);
        let camera = Camera::new(100, 100);

        for y in 0..100 {
            for x in 0..100 {
                if primary_ray_clearance(&camera, x, y, center) > 1.01 {
                    assert_eq!(image.get(x, y), Color::ZERO, "pixel ({}, {})", x, y);
                }
            }
        }

        // Upper hemisphere faces the light, lower hemisphere faces away
        assert!(image.get(50, 35).min_element() > 0.0);
        assert_eq!(image.get(50, 65), Color::ZERO);
    }

    #[test]
    fn test_white_sphere_lit_from_eye_is_brightest_at_center() {
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white()));
        scene.add_point_light(PointLight::new(Vec3::ZERO, Color::ONE));

        let mut image = ImageBuffer::new(100, 100);
        scene.render(&mut image);

        let center = image.get(50, 50);
        let edge = image.get(66, 50);
        assert!(edge.x > 0.0);
        assert!(center.x > edge.x);
        assert!(center.x > 0.99);
    }

    #[test]
    fn test_plane_without_lights_is_black() {
        let floor = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, white());
        let mut scene = Scene::new(SceneOptions::default());
        scene.add_entity(floor.clone());

        let mut image = ImageBuffer::new(20, 20);
        scene.render(&mut image);
        assert!(image.pixels.iter().all(|c| *c == Color::ZERO));

        // The lower rows really do see the plane
        let camera = Camera::new(20, 20);
        let ray = Ray::normalized(CAMERA_ORIGIN, camera.primary_direction(10, 19));
        assert!(floor.intersect(&ray).is_some());
    }

    #[test]
    fn test_from_description() {
        let description = lumen_core::load_scene_from_str(
            r#"{
                "materials": [
                    { "name": "white", "type": "diffuse", "color": [1, 1, 1] },
                    { "name": "mirror", "type": "reflective", "color": [1, 1, 1] }
                ],
                "entities": [
                    { "type": "sphere", "center": [0, 0, 5], "radius": 1, "material": "white" },
                    { "type": "plane", "center": [0, -1, 0], "normal": [0, 1, 0], "material": "mirror" },
                    { "type": "triangle", "v0": [-1, -1, 8], "v1": [0, 1, 8], "v2": [1, -1, 8], "material": "white" }
                ],
                "lights": [{ "position": [0, 0, 0], "color": [1, 1, 1] }]
            }"#,
        )
        .unwrap();

        let scene = Scene::from_description(SceneOptions::default(), &description).unwrap();
        assert_eq!(scene.entities().len(), 3);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.entities()[1].material().kind(), MaterialType::Reflective);

        let color = scene.cast_ray(Vec3::ZERO, Vec3::Z, 0);
        assert!(approx_eq(color, Color::ONE));
    }
}
