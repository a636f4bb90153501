//! Seedable dice used for cat variants and collision nudges.

/// Thin wrapper over `fastrand::Rng` exposing the inclusive integer rolls the
/// gameplay is written against.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: fastrand::Rng,
}

impl Dice {
    /// Seed from host entropy (`getrandom` with the `rng` feature, else a clock).
    pub fn from_entropy() -> Self {
        Self::with_seed(entropy_seed())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform integer in `min..=max`.
    pub fn roll(&mut self, min: i32, max: i32) -> i32 {
        self.rng.i32(min..=max)
    }
}

#[cfg(feature = "rng")]
fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}), seeding from clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed() -> u64 {
    clock_seed()
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    // Sub-millisecond bits carry most of the variation.
    (crate::performance_now() * 1_000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}
