//! Throwaway identifiers and random integers.
//!
//! Nothing here is cryptographically secure. Ids are short enough that
//! collisions are possible and no bound on their probability is promised.

const ID_LEN: u32 = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A 9-character lowercase base-36 id, e.g. `"k3f9z0q1m"`.
#[must_use]
pub fn generate_id() -> String {
    let base = ID_ALPHABET.len() as u64;
    let mut n = rand::random::<u64>() % base.pow(ID_LEN);
    let mut digits = [b'0'; ID_LEN as usize];
    for slot in digits.iter_mut().rev() {
        *slot = ID_ALPHABET[(n % base) as usize];
        n /= base;
    }
    digits.iter().map(|&b| char::from(b)).collect()
}

/// Uniform integer in `[min, max]`, inclusive on both ends.
///
/// Bounds given in reverse order are swapped.
#[must_use]
pub fn random_between(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::random_range(lo..=hi)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{ID_LEN, generate_id, random_between};

    #[test]
    fn id_shape() {
        for _ in 0..200 {
            let id = generate_id();
            assert_eq!(id.len(), ID_LEN as usize);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn ids_vary() {
        let ids: HashSet<String> = (0..50).map(|_| generate_id()).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn random_between_stays_in_range() {
        for _ in 0..500 {
            let n = random_between(-3, 3);
            assert!((-3..=3).contains(&n));
        }
    }

    #[test]
    fn random_between_degenerate_and_reversed() {
        assert_eq!(random_between(7, 7), 7);
        for _ in 0..100 {
            let n = random_between(10, 1);
            assert!((1..=10).contains(&n));
        }
    }

    #[test]
    fn random_between_reaches_both_ends() {
        let seen: HashSet<i64> = (0..500).map(|_| random_between(0, 2)).collect();
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn random_between_wide_range_hits_odd_values() {
        // Spans wider than 2^53 must still reach odd values.
        let odd = (0..64)
            .map(|_| random_between(0, i64::MAX))
            .filter(|n| n % 2 == 1)
            .count();
        assert!(odd > 0);
    }

    #[test]
    fn random_between_full_range_does_not_overflow() {
        let n = random_between(i64::MIN, i64::MAX);
        assert!((i64::MIN..=i64::MAX).contains(&n));
    }
}
