//! k-element combinations in lexicographic index order

/// Iterator over every `k`-element subset of `pool`, preserving pool order
/// within each subset and yielding subsets in lexicographic index order.
///
/// `k == 0` yields one empty subset; `k > pool.len()` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

impl<T: Copy> Combinations<T> {
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let done = k > pool.len();
        Combinations {
            pool,
            indices: (0..k).collect(),
            first: true,
            done,
        }
    }

    /// Rewind to the first combination
    pub fn reset(&mut self) {
        let k = self.indices.len();
        self.indices = (0..k).collect();
        self.first = true;
        self.done = k > self.pool.len();
    }

    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }
}

impl<T: Copy> Iterator for Combinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.current());
        }

        let n = self.pool.len();
        let k = self.indices.len();

        // Rightmost index that can still move forward
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + n - k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_order() {
        let combos: Vec<_> = Combinations::new(vec!['a', 'b', 'c', 'd'], 2).collect();
        let expected: Vec<Vec<char>> = vec![
            vec!['a', 'b'],
            vec!['a', 'c'],
            vec!['a', 'd'],
            vec!['b', 'c'],
            vec!['b', 'd'],
            vec!['c', 'd'],
        ];
        assert_eq!(combos, expected);
    }

    #[test]
    fn test_edge_sizes() {
        assert_eq!(
            Combinations::new(vec![1, 2, 3], 0).collect::<Vec<_>>(),
            vec![Vec::<i32>::new()]
        );
        assert_eq!(Combinations::new(vec![1, 2, 3], 3).collect::<Vec<_>>(), vec![vec![1, 2, 3]]);
        assert_eq!(Combinations::new(vec![1, 2, 3], 4).count(), 0);
        assert_eq!(Combinations::new(Vec::<i32>::new(), 0).count(), 1);
    }

    #[test]
    fn test_count_matches_binomial() {
        assert_eq!(Combinations::new((0..6).collect(), 3).count(), 20);
        assert_eq!(Combinations::new((0..10).collect(), 4).count(), 210);
    }

    #[test]
    fn test_reset_restarts() {
        let mut combos = Combinations::new(vec![1, 2, 3], 2);
        let first: Vec<_> = combos.by_ref().collect();
        combos.reset();
        let second: Vec<_> = combos.collect();
        assert_eq!(first, second);
    }
}
