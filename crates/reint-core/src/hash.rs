use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::ReintError;
use crate::serde_io::to_canonical_json_bytes;
use crate::types::{Benchmark, ExclusionCurve};

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, ReintError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Hash identifying a rescaling input: the curve and both configurations.
pub fn input_hash(
    curve: &ExclusionCurve,
    source: &Benchmark,
    target: &Benchmark,
) -> Result<String, ReintError> {
    stable_hash_string(&(curve, source, target))
}
