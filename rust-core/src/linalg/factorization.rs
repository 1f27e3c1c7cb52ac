/// All positive divisors of `n` in ascending order. Empty for `n == 0`.
pub fn factor(n: usize) -> Vec<usize> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            small.push(i);
            if i * i != n {
                large.push(n / i);
            }
        }
        i += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Every ordered `k`-tuple of positive integers whose product is `n`.
///
/// The first coordinate varies slowest; the search visits superlattices in
/// exactly this order, so keep it stable.
pub fn factor_sets(n: usize, k: usize) -> Vec<Vec<usize>> {
    match k {
        0 => Vec::new(),
        1 => vec![vec![n]],
        _ => {
            let mut sets = Vec::new();
            for first in factor(n) {
                for mut rest in factor_sets(n / first, k - 1) {
                    rest.insert(0, first);
                    sets.push(rest);
                }
            }
            sets
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_ascending() {
        assert_eq!(factor(1), vec![1]);
        assert_eq!(factor(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(factor(16), vec![1, 2, 4, 8, 16]);
        assert_eq!(factor(13), vec![1, 13]);
        assert!(factor(0).is_empty());
    }

    #[test]
    fn test_factor_sets_order_and_products() {
        let sets = factor_sets(4, 3);
        assert_eq!(
            sets,
            vec![
                vec![1, 1, 4],
                vec![1, 2, 2],
                vec![1, 4, 1],
                vec![2, 1, 2],
                vec![2, 2, 1],
                vec![4, 1, 1],
            ]
        );
        for set in factor_sets(36, 3) {
            assert_eq!(set.iter().product::<usize>(), 36);
        }
    }

    #[test]
    fn test_factor_sets_count() {
        // Ordered factorisations of p^2 q into three factors: 6 * 3
        assert_eq!(factor_sets(12, 3).len(), 18);
        assert_eq!(factor_sets(7, 1), vec![vec![7]]);
    }
}
