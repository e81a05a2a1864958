//! Simple ray tracer example.
//!
//! Renders a field of small spheres in a BVH around three large ones and
//! saves the result as a PPM.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use traceify_renderer::{
    render, BvhNode, Color, Light, Material, Plane, RenderConfig, SceneObject, Sphere,
    Supersampling, Vec3, Viewport, World,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let world = build_scene()?;
    log::info!("Scene built in {:?}", start.elapsed());

    let output = render(&world)?;
    output.stats.log_summary();

    let filename = "output.ppm";
    output.image.save(filename)?;
    Ok(())
}

fn build_scene() -> Result<World, Box<dyn std::error::Error>> {
    let mut world = World::new(
        Viewport::new(800, 450, 1.6, 1.5),
        Vec3::new(0.0, 2.0, -12.0),
        Color::new(0.5, 0.7, 1.0),
    )
    .with_config(RenderConfig {
        supersampling: Supersampling::adaptive(3),
        ..RenderConfig::default()
    });
    world.rotate_camera_x(-0.12);

    // Ground
    world.add_object(Plane::new(
        Vec3::Y,
        0.0,
        Material::diffuse(Color::new(0.5, 0.5, 0.5), 0.15),
    ));

    // Three main spheres
    let mut objects: Vec<SceneObject> = vec![
        Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Material::phong(Color::new(0.1, 0.1, 0.1), 80.0, 0.05).with_reflection(),
        )
        .into(),
        Sphere::new(
            Vec3::new(-4.0, 1.0, 0.0),
            1.0,
            Material::diffuse(Color::new(0.4, 0.2, 0.1), 0.1),
        )
        .into(),
        Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Material::full(Color::new(0.7, 0.6, 0.5), Color::new(0.7, 0.6, 0.5), 40.0, 0.1)
                .with_reflection(),
        )
        .into(),
    ];

    // Small seeded spheres
    let mut rng = StdRng::seed_from_u64(2024);
    for a in -5..5 {
        for b in -5..5 {
            let centre = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (centre - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let colour = Color::new(rng.gen(), rng.gen(), rng.gen());
            let material = if rng.gen::<f64>() < 0.8 {
                Material::phong(colour, 20.0, 0.1)
            } else {
                Material::phong(colour, 60.0, 0.05).with_reflection()
            };
            objects.push(Sphere::new(centre, 0.2, material).into());
        }
    }

    log::info!("Created {} objects", objects.len());
    world.add_object(BvhNode::build(objects)?);
    world.add_light(Light::new(Vec3::new(-10.0, 12.0, -10.0), Color::new(0.8, 0.8, 0.8)));
    world.add_light(Light::new(Vec3::new(10.0, 8.0, -6.0), Color::new(0.4, 0.4, 0.5)));
    Ok(world)
}
