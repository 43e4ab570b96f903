use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Gradient-noise sampler behind terrain synthesis. Stateless after
/// construction: every sample is a pure function of the seed and coordinates.
pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // The fractal accumulators scale coordinates themselves.
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    /// Plain fractal sum. Coordinates are pre-scaled by `frequency` once,
    /// then stretched by `lacunarity` per octave while the amplitude shrinks
    /// by `persistence`. The sum is intentionally left unnormalized.
    pub fn fractal3(
        &self,
        x: f32,
        y: f32,
        z: f32,
        octaves: i32,
        frequency: f32,
        lacunarity: f32,
        persistence: f32,
    ) -> f32 {
        let mut value = 0.0f32;
        let mut amplitude = 1.0f32;
        let (mut x, mut y, mut z) = (x * frequency, y * frequency, z * frequency);
        for _ in 0..octaves {
            value += self.noise.get_noise_3d(x, y, z) * amplitude;
            x *= lacunarity;
            y *= lacunarity;
            z *= lacunarity;
            amplitude *= persistence;
        }
        value
    }

    /// Ridged multifractal: sharp crests where the base noise crosses zero.
    /// Per-octave amplitude decays by 1/lacunarity and each octave is gated
    /// by the previous one's signal (clamped feedback weight).
    pub fn ridged3(
        &self,
        x: f32,
        y: f32,
        z: f32,
        octaves: i32,
        frequency: f32,
        lacunarity: f32,
    ) -> f32 {
        let (mut x, mut y, mut z) = (x * frequency, y * frequency, z * frequency);
        let mut value = 0.0f32;
        let mut weight = 1.0f32;
        let offset = 1.0f32;
        let gain = 2.0f32;
        let mut amplitude = 1.0f32;
        let persistence = 1.0 / lacunarity;
        for _ in 0..octaves {
            let mut signal = offset - self.noise.get_noise_3d(x, y, z).abs();
            signal *= signal;
            signal *= weight;
            weight = (signal * gain).clamp(0.0, 1.0);
            value += signal * amplitude;
            x *= lacunarity;
            y *= lacunarity;
            z *= lacunarity;
            amplitude *= persistence;
        }
        value * 1.25 - 1.0
    }
}
