// 2D grid: row‐major Vec<Vec<f32>>, access as `map[y][x]`.
// This is the nested-grid raster target shape.
pub type HeightMap2D = Vec<Vec<f32>>;

// flatten a 2D grid (row‐major) into a single Vec<f32>
pub fn flatten2(map: &[Vec<f32>]) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// Linear interpolation
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Map a [−1, 1] sample into [0, 255]
#[inline]
pub fn to_channel(v: f64) -> f64 {
    lerp(0.0, 255.0, (v + 1.0) / 2.0)
}

// Round and clamp a channel value into a byte
#[inline]
pub fn to_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
