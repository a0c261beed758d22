use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::gradient::GradientTable;
use crate::utils::lerp;

// Interpolation kernel applied to each fractional coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Easing {
    // Ken Perlin's 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1,
    // so cell borders don't show up as creases
    #[default]
    Quintic,
    // (3 − 2t)t^2
    Cubic,
    Linear,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Quintic => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Easing::Cubic => (3.0 - 2.0 * t) * t * t,
            Easing::Linear => t,
        }
    }
}

// Classic gradient (Perlin) noise, output in [−1, 1]
#[derive(Debug, Clone)]
pub struct Perlin {
    table: GradientTable,
    easing: Easing,
}

impl Perlin {
    pub fn new(seed: f64) -> Self {
        Self {
            table: GradientTable::new(seed),
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        let t = &self.table;
        // Find unit square that contains point
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        // Relative x/y within the square
        let xf = x - x.floor();
        let yf = y - y.floor();

        // Gradient influence of each corner
        let n00 = t.grad(xi + t.perm(yi)).dot2(xf, yf);
        let n01 = t.grad(xi + t.perm(yi + 1)).dot2(xf, yf - 1.0);
        let n10 = t.grad(xi + 1 + t.perm(yi)).dot2(xf - 1.0, yf);
        let n11 = t.grad(xi + 1 + t.perm(yi + 1)).dot2(xf - 1.0, yf - 1.0);

        let u = self.easing.apply(xf);
        let v = self.easing.apply(yf);
        lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
    }

    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let t = &self.table;
        // Find unit cube that contains point
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let zi = (z.floor() as i32 & 255) as usize;
        // Relative coordinates within cube
        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        // Hash corners of the cube
        let corner = |dx: usize, dy: usize, dz: usize| {
            t.grad(xi + dx + t.perm(yi + dy + t.perm(zi + dz)))
                .dot3(xf - dx as f64, yf - dy as f64, zf - dz as f64)
        };
        let n000 = corner(0, 0, 0);
        let n001 = corner(0, 0, 1);
        let n010 = corner(0, 1, 0);
        let n011 = corner(0, 1, 1);
        let n100 = corner(1, 0, 0);
        let n101 = corner(1, 0, 1);
        let n110 = corner(1, 1, 0);
        let n111 = corner(1, 1, 1);

        let u = self.easing.apply(xf);
        let v = self.easing.apply(yf);
        let w = self.easing.apply(zf);

        // x first, then z, finally y
        lerp(
            lerp(lerp(n000, n100, u), lerp(n001, n101, u), w),
            lerp(lerp(n010, n110, u), lerp(n011, n111, u), w),
            v,
        )
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl NoiseGenerator for Perlin {
    fn seed(&mut self, seed: f64) {
        self.table.reseed(seed);
    }

    fn xy(&mut self, x: f64, y: f64) -> f64 {
        self.noise2(x, y)
    }

    fn xyz(&mut self, x: f64, y: f64, z: f64) -> f64 {
        self.noise3(x, y, z)
    }
}
