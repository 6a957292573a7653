//! FNV-1a hashing for the deterministic timeline perturbation.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `input`.
pub fn fnv1a_32(input: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Map a hash onto `[0, 1]`.
pub fn unit_interval(hash: u32) -> f64 {
    f64::from(hash) / f64::from(u32::MAX)
}

/// Map a hash onto `[-amplitude, amplitude]`.
pub fn signed_noise(hash: u32, amplitude: f64) -> f64 {
    (unit_interval(hash) * 2.0 - 1.0) * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn noise_stays_within_amplitude() {
        for h in [0u32, 1, u32::MAX / 2, u32::MAX] {
            let n = signed_noise(h, 0.1);
            assert!((-0.1..=0.1).contains(&n), "{n}");
        }
        assert_eq!(signed_noise(0, 0.1), -0.1);
        assert_eq!(signed_noise(u32::MAX, 0.1), 0.1);
    }
}
