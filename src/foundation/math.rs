#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// SplitMix64 finalizer. FNV alone leaves the low bits poorly mixed for adjacent coordinates.
pub(crate) fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stateless per-coordinate hash: the same `(seed, x, y)` always yields the same value.
pub(crate) fn hash_u64(seed: u64, x: u32, y: u32) -> u64 {
    let mut h = Fnv1a64::new(seed ^ Fnv1a64::OFFSET_BASIS);
    h.write_u64(u64::from(x));
    h.write_u64(u64::from(y));
    mix64(h.finish())
}

/// Uniform sample in `[0, 1)` keyed by `(seed, x, y)`.
pub(crate) fn unit_f64(seed: u64, x: u32, y: u32) -> f64 {
    // 53 mantissa bits.
    (hash_u64(seed, x, y) >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Normalize degrees into `[0, 360)`.
pub(crate) fn wrap_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if d >= 360.0 { 0.0 } else { d }
}

pub(crate) fn lerp_u8(a: u8, b: u8, w: f64) -> u8 {
    let af = f64::from(a);
    let bf = f64::from(b);
    (af + w * (bf - af)).round().clamp(0.0, 255.0) as u8
}

/// Format `v` with at most `decimals` fractional digits, trimming trailing zeros.
pub(crate) fn fmt_trimmed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" { "0".to_owned() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv_matches_reference_vector() {
        let mut h = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
        h.write_bytes(b"a");
        assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn hash_is_stable_and_coordinate_sensitive() {
        assert_eq!(hash_u64(7, 3, 4), hash_u64(7, 3, 4));
        assert_ne!(hash_u64(7, 3, 4), hash_u64(7, 4, 3));
        assert_ne!(hash_u64(7, 3, 4), hash_u64(8, 3, 4));
    }

    #[test]
    fn unit_samples_stay_in_half_open_range() {
        for y in 0..64 {
            for x in 0..64 {
                let u = unit_f64(42, x, y);
                assert!((0.0..1.0).contains(&u));
            }
        }
    }

    #[test]
    fn unit_samples_are_roughly_uniform() {
        let n = 128 * 128;
        let mut sum = 0.0;
        for y in 0..128 {
            for x in 0..128 {
                sum += unit_f64(1, x, y);
            }
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean={mean}");
    }

    #[test]
    fn wrap_degrees_normalizes() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(405.0), 45.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-20) < 360.0);
    }

    #[test]
    fn lerp_rounds_half_away() {
        assert_eq!(lerp_u8(0, 255, 0.0), 0);
        assert_eq!(lerp_u8(0, 255, 1.0), 255);
        assert_eq!(lerp_u8(0, 3, 0.5), 2);
        assert_eq!(lerp_u8(200, 100, 0.5), 150);
    }

    #[test]
    fn trimmed_formatting() {
        assert_eq!(fmt_trimmed(45.0, 2), "45");
        assert_eq!(fmt_trimmed(33.333_333, 2), "33.33");
        assert_eq!(fmt_trimmed(0.3 / 100.0, 6), "0.003");
        assert_eq!(fmt_trimmed(-0.0001, 2), "0");
        assert_eq!(fmt_trimmed(12.5, 2), "12.5");
    }
}
