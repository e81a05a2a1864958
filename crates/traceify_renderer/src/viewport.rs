//! Pinhole camera: the sensor rectangle (viewport) and the camera basis.

use traceify_math::{Ray, Vec3};

/// Pixel grid and the sensor rectangle it is laid over.
///
/// The sensor sits at `focal_distance` in front of the camera and spans
/// `[left, right] x [bottom, top]` in camera space. Pixel `(0, 0)` is the
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    focal_distance: f64,
    u_spread: f64,
    v_spread: f64,
}

impl Viewport {
    /// Create a viewport `sensor_width` units across. The sensor height keeps
    /// the pixel aspect ratio.
    pub fn new(width: u32, height: u32, sensor_width: f64, focal_distance: f64) -> Self {
        let sensor_height = if width > 0 {
            sensor_width * height as f64 / width as f64
        } else {
            0.0
        };

        let left = -0.5 * sensor_width;
        let right = 0.5 * sensor_width;
        let bottom = -0.5 * sensor_height;
        let top = 0.5 * sensor_height;

        Self {
            width,
            height,
            left,
            right,
            bottom,
            top,
            focal_distance,
            u_spread: spread(right - left, width),
            v_spread: spread(top - bottom, height),
        }
    }

    /// Square viewport `pixels` wide and tall.
    pub fn square(pixels: u32, sensor_width: f64, focal_distance: f64) -> Self {
        Self::new(pixels, pixels, sensor_width, focal_distance)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn focal_distance(&self) -> f64 {
        self.focal_distance
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Horizontal sensor coordinate of sub-sample `sub` in column `i`.
    ///
    /// The pixel is divided into `grid` cells per side; `jitter` shifts the
    /// sample away from the cell centre, in units of one cell.
    pub fn u_amount(&self, i: u32, grid: u32, sub: u32, jitter: f64) -> f64 {
        self.left + self.u_spread * sub_position(i, grid, sub, jitter)
    }

    /// Vertical sensor coordinate of sub-sample `sub` in row `j`.
    pub fn v_amount(&self, j: u32, grid: u32, sub: u32, jitter: f64) -> f64 {
        self.bottom + self.v_spread * sub_position(j, grid, sub, jitter)
    }
}

fn spread(extent: f64, pixels: u32) -> f64 {
    if pixels == 0 {
        0.0
    } else {
        extent / pixels as f64
    }
}

fn sub_position(pixel: u32, grid: u32, sub: u32, jitter: f64) -> f64 {
    let grid = grid.max(1) as f64;
    pixel as f64 + (sub as f64 + 0.5 + jitter) / grid
}

/// Camera position and orthonormal basis.
///
/// Primary rays leave `position` along `-w * d + u * u_amount + v * v_amount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Camera at `position` with `u = +x`, `v = +y` and `w = -z`, so it looks along `+z`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            u: Vec3::X,
            v: Vec3::Y,
            w: -Vec3::Z,
        }
    }

    pub fn u(&self) -> Vec3 {
        self.u
    }

    pub fn v(&self) -> Vec3 {
        self.v
    }

    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Rotate the basis about the camera's own x axis by `theta` radians (pitch).
    pub fn rotate_x(&mut self, theta: f64) {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let v = self.v * cos_theta + self.w * sin_theta;
        let w = self.v * -sin_theta + self.w * cos_theta;
        self.v = v;
        self.w = w;
    }

    /// Rotate the basis about the camera's own y axis by `theta` radians (yaw).
    pub fn rotate_y(&mut self, theta: f64) {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let u = self.u * cos_theta + self.w * sin_theta;
        let w = self.u * -sin_theta + self.w * cos_theta;
        self.u = u;
        self.w = w;
    }

    /// Primary ray through the given sensor coordinates.
    pub fn ray(&self, focal_distance: f64, u_amount: f64, v_amount: f64) -> Ray {
        let direction = self.w * -focal_distance + self.u * u_amount + self.v * v_amount;
        Ray::new(self.position, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
