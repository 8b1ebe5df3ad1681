//! Primality helpers used to keep the table capacity prime

/// Returns true if `n` is a prime number.
///
/// Uses trial division by odd factors, which is plenty for table capacities.
#[must_use]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor * factor <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }
    true
}

/// Returns the smallest odd prime that is `>= n`, or `None` if it does not fit in a `usize`.
///
/// Even inputs are bumped by one before the search starts, so the result is never 2.
#[must_use]
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = if n % 2 == 0 { n.checked_add(1)? } else { n };
    while !is_prime(candidate) {
        candidate = candidate.checked_add(2)?;
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_squares_are_not_prime() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_201)); // 101^2
    }

    #[test]
    fn test_next_prime_small_inputs() {
        assert_eq!(next_prime(0), Some(3));
        assert_eq!(next_prime(1), Some(3));
        assert_eq!(next_prime(2), Some(3));
        assert_eq!(next_prime(3), Some(3));
        assert_eq!(next_prime(10), Some(11));
        assert_eq!(next_prime(20), Some(23));
        assert_eq!(next_prime(46), Some(47));
        assert_eq!(next_prime(100), Some(101));
    }

    #[test]
    fn test_next_prime_past_usize_max() {
        // usize::MAX is divisible by 3 and nothing above it fits
        assert!(!is_prime(usize::MAX));
        assert_eq!(next_prime(usize::MAX), None);
        assert_eq!(next_prime(usize::MAX - 1), None);
    }

    proptest! {
        #[test]
        fn next_prime_is_smallest_odd_prime_at_or_above(n in 0usize..20_000) {
            let p = next_prime(n).unwrap_or_default();
            prop_assert!(p >= n);
            prop_assert!(p >= 3);
            prop_assert!(p % 2 == 1);
            prop_assert!(is_prime(p));
            prop_assert!((n..p).all(|c| c == 2 || !is_prime(c)));
        }
    }
}
