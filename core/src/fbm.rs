use crate::NoiseGenerator;
use crate::error::NoiseError;

// Fractal Brownian motion over any generator: sums several octaves of the
// source, each at a higher frequency and lower amplitude
pub struct Fbm<N> {
    source: N,
    octaves: usize,    // number of octaves to sum
    persistence: f64, // amplitude scaling per octave
    lacunarity: f64,  // frequency scaling per octave
}

impl<N: NoiseGenerator> Fbm<N> {
    pub fn new(source: N, octaves: usize, persistence: f64) -> Result<Self, NoiseError> {
        if octaves == 0 {
            return Err(NoiseError::InvalidOctaves(octaves));
        }
        Ok(Self {
            source,
            octaves,
            persistence,
            lacunarity: 2.0,
        })
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn into_inner(self) -> N {
        self.source
    }

    fn accumulate<F>(&mut self, mut sample: F) -> f64
    where
        F: FnMut(&mut N, f64) -> f64,
    {
        let mut amplitude = 1.0; // Weight of the current octave
        let mut freq = 1.0; // How zoomed in we are on the noise pattern
        let mut total = 0.0; // Accumulated noise value
        let mut max_amp = 0.0; // Maximum possible amplitude to normalize the result

        for _ in 0..self.octaves {
            total += sample(&mut self.source, freq) * amplitude;
            max_amp += amplitude;
            amplitude *= self.persistence;
            freq *= self.lacunarity;
        }

        // Normalize so a [−1, +1] source stays in [−1, +1]
        total / max_amp
    }
}

impl<N: NoiseGenerator> NoiseGenerator for Fbm<N> {
    fn seed(&mut self, seed: f64) {
        self.source.seed(seed);
    }

    fn xy(&mut self, x: f64, y: f64) -> f64 {
        self.accumulate(|n, f| n.xy(x * f, y * f))
    }

    fn xyz(&mut self, x: f64, y: f64, z: f64) -> f64 {
        self.accumulate(|n, f| n.xyz(x * f, y * f, z * f))
    }
}
