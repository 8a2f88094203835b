pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Short hex fingerprint of a seed, used when reporting runs.
pub fn seed_fingerprint(seed: &[u8; 32]) -> String {
    seed[..8].iter().map(|b| format!("{:02x}", b)).collect()
}
