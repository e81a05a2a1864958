//! Built-in scenes.

use std::fmt;
use std::str::FromStr;

use crate::description::{
    CameraDescription, ImageSettings, LightDescription, MaterialDescription, ObjectDescription,
    RenderOptions, SceneDescription, Shading,
};

/// Named scenes that ship with the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// One lit sphere in front of the camera
    SingleSphere,
    /// A near sphere partly hiding a far one
    Occlusion,
    /// Spheres inside a closed box of mirrors
    MirrorBox,
    /// Floor, mirrors, a BVH of spheres and a cluster
    Showcase,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::SingleSphere,
        Preset::Occlusion,
        Preset::MirrorBox,
        Preset::Showcase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::SingleSphere => "single-sphere",
            Preset::Occlusion => "occlusion",
            Preset::MirrorBox => "mirror-box",
            Preset::Showcase => "showcase",
        }
    }

    pub fn description(self) -> SceneDescription {
        match self {
            Preset::SingleSphere => single_sphere(),
            Preset::Occlusion => occlusion(),
            Preset::MirrorBox => mirror_box(),
            Preset::Showcase => showcase(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

fn phong(colour: [f64; 3], specularity: f64, ambient: f64) -> MaterialDescription {
    MaterialDescription {
        shading: Shading::Phong {
            colour,
            specularity,
            ambient,
            specular_colour: None,
        },
        reflective: false,
    }
}

fn mirror(colour: [f64; 3], tint: [f64; 3]) -> MaterialDescription {
    MaterialDescription {
        shading: Shading::Phong {
            colour,
            specularity: 60.0,
            ambient: 0.05,
            specular_colour: Some(tint),
        },
        reflective: true,
    }
}

fn diffuse(colour: [f64; 3], ambient: f64) -> MaterialDescription {
    MaterialDescription {
        shading: Shading::Diffuse { colour, ambient },
        reflective: false,
    }
}

fn sphere(centre: [f64; 3], radius: f64, material: MaterialDescription) -> ObjectDescription {
    ObjectDescription::Sphere {
        centre,
        radius,
        material,
    }
}

fn plane(normal: [f64; 3], k: f64, material: MaterialDescription) -> ObjectDescription {
    ObjectDescription::Plane {
        normal,
        k,
        material,
    }
}

fn light(position: [f64; 3], colour: [f64; 3]) -> LightDescription {
    LightDescription { position, colour }
}

fn scene(name: &str, size: u32, position: [f64; 3]) -> SceneDescription {
    SceneDescription {
        name: name.to_string(),
        image: ImageSettings {
            width: size,
            height: size,
        },
        camera: CameraDescription {
            position,
            sensor_width: 2.0,
            focal_distance: 2.0,
            rotate_y_degrees: 0.0,
            rotate_x_degrees: 0.0,
        },
        background: [0.05, 0.05, 0.15],
        render: RenderOptions::default(),
        lights: Vec::new(),
        objects: Vec::new(),
    }
}

fn single_sphere() -> SceneDescription {
    let mut desc = scene("single-sphere", 256, [0.0, 0.0, -5.0]);
    desc.objects
        .push(sphere([0.0, 0.0, 0.0], 1.0, phong([0.8, 0.2, 0.2], 20.0, 0.1)));
    desc.lights.push(light([5.0, 5.0, -5.0], [1.0, 1.0, 1.0]));
    desc
}

fn occlusion() -> SceneDescription {
    let mut desc = scene("occlusion", 256, [0.0, 0.0, -6.0]);
    desc.objects
        .push(sphere([0.8, 0.3, 3.0], 1.5, phong([0.2, 0.3, 0.9], 30.0, 0.1)));
    desc.objects
        .push(sphere([-0.3, -0.2, 0.0], 0.9, phong([0.9, 0.6, 0.1], 30.0, 0.1)));
    desc.lights.push(light([-4.0, 6.0, -6.0], [1.0, 1.0, 1.0]));
    desc
}

fn mirror_box() -> SceneDescription {
    let mut desc = scene("mirror-box", 256, [0.0, 0.0, -4.0]);
    desc.render.supersampling = 3;

    let wall = mirror([0.15, 0.15, 0.2], [0.6, 0.6, 0.6]);
    for axis in 0..3 {
        let mut normal = [0.0; 3];
        normal[axis] = 1.0;
        desc.objects.push(plane(normal, 5.0, wall.clone()));
        normal[axis] = -1.0;
        desc.objects.push(plane(normal, 5.0, wall.clone()));
    }

    desc.objects.push(ObjectDescription::Cluster {
        objects: vec![
            sphere([-1.5, -1.0, 1.0], 1.0, phong([0.9, 0.2, 0.2], 40.0, 0.1)),
            sphere([1.5, -1.0, 1.5], 1.0, phong([0.2, 0.9, 0.3], 40.0, 0.1)),
            sphere([0.0, 1.2, 2.0], 0.8, mirror([0.1, 0.1, 0.1], [0.9, 0.9, 0.9])),
        ],
    });
    desc.lights.push(light([0.0, 4.0, -2.0], [0.9, 0.9, 0.9]));
    desc
}

fn showcase() -> SceneDescription {
    let mut desc = scene("showcase", 512, [0.0, 2.0, -10.0]);
    desc.image.height = 384;
    desc.camera.sensor_width = 2.4;
    desc.camera.rotate_x_degrees = -8.0;
    desc.background = [0.45, 0.6, 0.9];
    desc.render.supersampling = 3;

    // Floor y = 0
    desc.objects
        .push(plane([0.0, 1.0, 0.0], 0.0, diffuse([0.6, 0.6, 0.55], 0.15)));

    let grid = (-4..=4)
        .flat_map(|a| (-2..=4).map(move |b| (a, b)))
        .map(|(a, b)| {
            let x = a as f64 * 1.1;
            let z = b as f64 * 1.1 + 2.0;
            let hue = ((a + 4) as f64 / 8.0, (b + 2) as f64 / 6.0);
            sphere(
                [x, 0.25, z],
                0.25,
                phong([hue.0, 0.4, hue.1], 25.0, 0.1),
            )
        })
        .collect();
    desc.objects.push(ObjectDescription::Bvh { objects: grid });

    desc.objects.push(ObjectDescription::Cluster {
        objects: vec![
            sphere([-2.2, 1.6, 3.0], 1.0, mirror([0.05, 0.05, 0.05], [0.85, 0.85, 0.85])),
            sphere([2.2, 1.6, 3.0], 1.0, mirror([0.6, 0.5, 0.2], [0.8, 0.7, 0.4])),
            sphere([0.0, 2.2, 6.0], 1.6, phong([0.9, 0.9, 0.9], 80.0, 0.05)),
        ],
    });

    desc.lights.push(light([-8.0, 10.0, -8.0], [0.8, 0.8, 0.75]));
    desc.lights.push(light([8.0, 6.0, -4.0], [0.35, 0.35, 0.45]));
    desc
}
