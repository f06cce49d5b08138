//! ChaCha20 CSPRNG seeded from OS entropy.
//!
//! # Seeding Model
//!
//! - Initial seed is read from `OsRng`
//! - Reseeding replaces the ChaCha key with fresh OS entropy
//! - Fixed seeds are available for reproducible tests and benchmarks

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, OsRng, RngCore, SeedableRng};

/// A ChaCha20 CSPRNG used for every password draw.
///
/// Tracks how many bytes have been produced since the last seed so
/// callers can reseed long-lived generators periodically.
pub struct PasswordRng {
    /// The underlying ChaCha20 CSPRNG.
    inner: ChaCha20Rng,
    /// Total reseeds performed.
    reseed_count: u64,
    /// Bytes generated since last (re)seed.
    bytes_since_reseed: u64,
}

impl PasswordRng {
    /// Creates a new CSPRNG seeded from the OS entropy source.
    pub fn from_os_entropy() -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(os_seed()),
            reseed_count: 0,
            bytes_since_reseed: 0,
        }
    }

    /// Creates a CSPRNG from a known seed.
    ///
    /// Output is fully determined by `seed`. Only use this where
    /// reproducibility matters more than unpredictability.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: ChaCha20Rng::from_seed(seed),
            reseed_count: 0,
            bytes_since_reseed: 0,
        }
    }

    /// Replaces the current key with fresh OS entropy.
    pub fn reseed_from_os(&mut self) {
        self.inner = ChaCha20Rng::from_seed(os_seed());
        self.reseed_count += 1;
        self.bytes_since_reseed = 0;

        tracing::info!(reseed_count = self.reseed_count, "CSPRNG reseeded from OS entropy");
    }

    /// Returns the number of reseeds performed.
    pub fn reseed_count(&self) -> u64 {
        self.reseed_count
    }

    /// Returns bytes generated since last reseed.
    pub fn bytes_since_reseed(&self) -> u64 {
        self.bytes_since_reseed
    }
}

impl Default for PasswordRng {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl std::fmt::Debug for PasswordRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordRng")
            .field("reseed_count", &self.reseed_count)
            .field("bytes_since_reseed", &self.bytes_since_reseed)
            .finish_non_exhaustive()
    }
}

fn os_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    seed
}

impl RngCore for PasswordRng {
    fn next_u32(&mut self) -> u32 {
        self.bytes_since_reseed += 4;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.bytes_since_reseed += 8;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.bytes_since_reseed += dest.len() as u64;
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.bytes_since_reseed += dest.len() as u64;
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for PasswordRng {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_output() {
        let mut rng1 = PasswordRng::from_seed([0x01u8; 32]);
        let mut rng2 = PasswordRng::from_seed([0x01u8; 32]);

        let mut out1 = [0u8; 32];
        let mut out2 = [0u8; 32];
        rng1.fill_bytes(&mut out1);
        rng2.fill_bytes(&mut out2);

        assert_eq!(out1, out2);
    }

    #[test]
    fn test_different_seed_different_output() {
        let mut rng1 = PasswordRng::from_seed([0xAAu8; 32]);
        let mut rng2 = PasswordRng::from_seed([0xBBu8; 32]);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_bytes_since_reseed_tracking() {
        let mut rng = PasswordRng::from_os_entropy();

        let mut buf = [0u8; 100];
        rng.fill_bytes(&mut buf);
        rng.next_u32();

        assert_eq!(rng.bytes_since_reseed(), 104);
    }

    #[test]
    fn test_reseed_resets_counter_and_changes_output() {
        let mut rng1 = PasswordRng::from_seed([0x01u8; 32]);
        let mut rng2 = PasswordRng::from_seed([0x01u8; 32]);

        rng1.next_u64();
        rng1.reseed_from_os();
        rng2.next_u64();

        assert_eq!(rng1.reseed_count(), 1);
        assert_eq!(rng1.bytes_since_reseed(), 0);
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }
}
