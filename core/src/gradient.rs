// Seeded permutation/gradient lookup shared by Perlin and Simplex noise.

// Ken Perlin's reference permutation
const BASE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

// The 12 edge midpoints of a cube
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient([f64; 3]);

impl Gradient {
    #[inline]
    pub fn dot2(&self, x: f64, y: f64) -> f64 {
        self.0[0] * x + self.0[1] * y
    }

    #[inline]
    pub fn dot3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.0[0] * x + self.0[1] * y + self.0[2] * z
    }
}

// Both tables hold 256 entries duplicated into 512
// so wrapped lookups like perm[x + 1 + perm[y]] never need a modulo
#[derive(Debug, Clone)]
pub struct GradientTable {
    perm: [u8; 512],
    grad: [Gradient; 512],
}

impl GradientTable {
    pub fn new(seed: f64) -> Self {
        let mut table = Self {
            perm: [0; 512],
            grad: [Gradient(GRAD3[0]); 512],
        };
        table.reseed(seed);
        table
    }

    // Regenerate both tables from `seed`
    pub fn reseed(&mut self, seed: f64) {
        let seed = fold_seed(seed);
        let lo = (seed & 255) as u8;
        let hi = ((seed >> 8) & 255) as u8;

        for i in 0..256 {
            let v = BASE_PERMUTATION[i] ^ if i & 1 == 1 { lo } else { hi };
            let g = Gradient(GRAD3[v as usize % 12]);
            self.perm[i] = v;
            self.perm[i + 256] = v;
            self.grad[i] = g;
            self.grad[i + 256] = g;
        }
    }

    #[inline]
    pub fn perm(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    #[inline]
    pub fn grad(&self, i: usize) -> &Gradient {
        &self.grad[i]
    }
}

impl Default for GradientTable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// Sub-unit seeds are scaled up so 0.25 and 0.5 differ;
// small seeds copy their low byte into the next one so both halves vary.
fn fold_seed(seed: f64) -> i32 {
    let seed = if seed > 0.0 && seed < 1.0 {
        seed * 65536.0
    } else {
        seed
    };
    // saturating float cast, then wrap to 32 bits
    let mut seed = seed.floor() as i64 as i32;
    if seed.unsigned_abs() < 256 {
        seed |= seed << 8;
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_doubled() {
        let t = GradientTable::new(1234.0);
        for i in 0..256 {
            assert_eq!(t.perm(i), t.perm(i + 256));
            assert_eq!(t.grad(i), t.grad(i + 256));
        }
    }

    #[test]
    fn gradients_follow_permutation() {
        let t = GradientTable::new(42.0);
        for i in 0..256 {
            assert_eq!(t.grad(i).0, GRAD3[t.perm(i) % 12]);
        }
    }

    #[test]
    fn small_and_fractional_seeds_fold() {
        assert_eq!(fold_seed(5.0), 5 | (5 << 8));
        assert_eq!(fold_seed(0.5), 32768);
        assert_eq!(fold_seed(1000.7), 1000);
    }

    #[test]
    fn negative_small_seed_folds() {
        assert_eq!(fold_seed(-5.0), -5 | (-5 << 8));
        let neg = GradientTable::new(-5.0);
        let pos = GradientTable::new(5.0);
        assert_ne!(neg.perm, pos.perm);
    }

    #[test]
    fn seed_zero_keeps_base_permutation() {
        let t = GradientTable::new(0.0);
        for i in 0..256 {
            assert_eq!(t.perm(i), BASE_PERMUTATION[i] as usize);
        }
    }

    #[test]
    fn distinct_seeds_give_distinct_tables() {
        let a = GradientTable::new(1.0);
        let b = GradientTable::new(2.0);
        assert!((0..256).any(|i| a.perm(i) != b.perm(i)));
    }

    #[test]
    fn reseed_matches_fresh_table() {
        let mut t = GradientTable::new(7.0);
        t.reseed(99.0);
        let fresh = GradientTable::new(99.0);
        assert_eq!(t.perm, fresh.perm);
    }
}
