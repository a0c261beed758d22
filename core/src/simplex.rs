use crate::NoiseGenerator;
use crate::gradient::GradientTable;

// Approximate value of sqrt(3)
const SQRT_3: f64 = 1.732_050_807_568_877_293_5;
// Skewing/Unskewing factors for 2D simplex
const F2: f64 = 0.5 * (SQRT_3 - 1.0); // compresses the square into a rhombus of two triangles
const G2: f64 = (3.0 - SQRT_3) / 6.0; // reverses the skewing
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

// Simplex noise, scaled to roughly [−1, 1]
// Simplex divides space into triangles (tetrahedra in 3D) rather than squares,
// which gives better isotropy and fewer corners per sample
#[derive(Debug, Clone, Default)]
pub struct Simplex {
    table: GradientTable,
}

impl Simplex {
    pub fn new(seed: f64) -> Self {
        Self {
            table: GradientTable::new(seed),
        }
    }

    pub fn noise2(&self, xin: f64, yin: f64) -> f64 {
        let t = &self.table;
        // Skew input space to determine simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor();
        let j = (yin + s).floor();

        // Unskew back to get the offset from the cell origin
        let u = (i + j) * G2;
        let x0 = xin - i + u;
        let y0 = yin - j + u;

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        // Offsets for remaining corners
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let g0 = t.grad(ii + t.perm(jj));
        let g1 = t.grad(ii + i1 + t.perm(jj + j1));
        let g2 = t.grad(ii + 1 + t.perm(jj + 1));

        let n0 = falloff(0.5 - x0 * x0 - y0 * y0) * g0.dot2(x0, y0);
        let n1 = falloff(0.5 - x1 * x1 - y1 * y1) * g1.dot2(x1, y1);
        let n2 = falloff(0.5 - x2 * x2 - y2 * y2) * g2.dot2(x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    pub fn noise3(&self, xin: f64, yin: f64, zin: f64) -> f64 {
        let t = &self.table;
        let s = (xin + yin + zin) * F3;
        let i = (xin + s).floor();
        let j = (yin + s).floor();
        let k = (zin + s).floor();

        let u = (i + j + k) * G3;
        let x0 = xin - i + u;
        let y0 = yin - j + u;
        let z0 = zin - k + u;

        // Which of the six tetrahedra: offsets of the second and third corner
        let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
            if y0 >= z0 {
                ((1, 0, 0), (1, 1, 0))
            } else if x0 >= z0 {
                ((1, 0, 0), (1, 0, 1))
            } else {
                ((0, 0, 1), (1, 0, 1))
            }
        } else if y0 < z0 {
            ((0, 0, 1), (0, 1, 1))
        } else if x0 < z0 {
            ((0, 1, 0), (0, 1, 1))
        } else {
            ((0, 1, 0), (1, 1, 0))
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i as i32 & 255) as usize;
        let jj = (j as i32 & 255) as usize;
        let kk = (k as i32 & 255) as usize;
        let g0 = t.grad(ii + t.perm(jj + t.perm(kk)));
        let g1 = t.grad(ii + i1 + t.perm(jj + j1 + t.perm(kk + k1)));
        let g2 = t.grad(ii + i2 + t.perm(jj + j2 + t.perm(kk + k2)));
        let g3 = t.grad(ii + 1 + t.perm(jj + 1 + t.perm(kk + 1)));

        let n0 = falloff(0.6 - x0 * x0 - y0 * y0 - z0 * z0) * g0.dot3(x0, y0, z0);
        let n1 = falloff(0.6 - x1 * x1 - y1 * y1 - z1 * z1) * g1.dot3(x1, y1, z1);
        let n2 = falloff(0.6 - x2 * x2 - y2 * y2 - z2 * z2) * g2.dot3(x2, y2, z2);
        let n3 = falloff(0.6 - x3 * x3 - y3 * y3 - z3 * z3) * g3.dot3(x3, y3, z3);

        32.0 * (n0 + n1 + n2 + n3)
    }
}

// (r² − d²)^4 inside the kernel radius, zero outside
#[inline]
fn falloff(t: f64) -> f64 {
    if t > 0.0 {
        let t2 = t * t;
        t2 * t2
    } else {
        0.0
    }
}

impl NoiseGenerator for Simplex {
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
