//! Cryptographically secure randomness for password generation.
//!
//! Wraps a ChaCha20 CSPRNG seeded from the operating system so every
//! draw made by the generator comes from a vetted stream cipher.

mod csprng;

pub use csprng::PasswordRng;
