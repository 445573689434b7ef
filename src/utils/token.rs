use rand::Rng;
use uuid::{Builder, Uuid};

/// Generates a random (v4) UUID from the given random source.
pub fn random_token<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    Builder::from_random_bytes(bytes).into_uuid()
}
