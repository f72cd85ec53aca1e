//! Simple ray tracer example.
//!
//! Builds a small scene in code and saves it as a PNG.

use lumen_renderer::{
    Color, ImageBuffer, Material, Plane, PointLight, Scene, SceneOptions, Sphere, Vec3,
};

fn main() -> image::ImageResult<()> {
    println!("Lumen - Simple Example");
    println!("======================");

    let options = SceneOptions::default().with_aa_multiplier(2);
    let scene = build_scene(options);

    let mut image = ImageBuffer::new(400, 300);
    let start = std::time::Instant::now();
    scene.render(&mut image);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image.save(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene(options: SceneOptions) -> Scene {
    let mut scene = Scene::new(options);

    // Ground
    scene.add_entity(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::diffuse(Color::new(0.8, 0.8, 0.8)),
    ));

    // Three main spheres
    scene.add_entity(Sphere::new(
        Vec3::new(0.0, 0.0, 6.0),
        1.0,
        Material::refractive(Color::ZERO, 1.5),
    ));
    scene.add_entity(Sphere::new(
        Vec3::new(-2.2, 0.0, 7.0),
        1.0,
        Material::diffuse(Color::new(0.4, 0.2, 0.1)),
    ));
    scene.add_entity(Sphere::new(
        Vec3::new(2.2, 0.0, 7.0),
        1.0,
        Material::reflective(Color::new(0.7, 0.6, 0.5)),
    ));

    scene.add_point_light(PointLight::new(Vec3::new(0.0, 4.0, 3.0), Color::ONE));
    scene
}
