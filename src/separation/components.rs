//! Weakly connected components over selected arcs.

/// Disjoint-set forest with union by size and path halving.
///
/// `find` is a loop, so memory stays at two vectors of length `n`
/// regardless of how deep the forest would otherwise grow.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `x`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets of `a` and `b`. Returns `false` if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    /// All sets, each sorted ascending, ordered by smallest member.
    pub fn sets(&mut self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot = vec![usize::MAX; n];
        let mut sets: Vec<Vec<usize>> = Vec::new();
        for x in 0..n {
            let root = self.find(x);
            if slot[root] == usize::MAX {
                slot[root] = sets.len();
                sets.push(Vec::new());
            }
            sets[slot[root]].push(x);
        }
        sets
    }
}

/// Partitions `0..n` into weakly connected components of the given arcs.
///
/// # Examples
///
/// ```
/// use u_vrptw::separation::components;
///
/// let comps = components(5, [(0, 1), (1, 0), (2, 3), (3, 4), (4, 2)]);
/// assert_eq!(comps, vec![vec![0, 1], vec![2, 3, 4]]);
/// ```
pub fn components<I>(n: usize, arcs: I) -> Vec<Vec<usize>>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut uf = UnionFind::new(n);
    for (i, j) in arcs {
        uf.union(i, j);
    }
    uf.sets()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let comps = components(3, std::iter::empty());
        assert_eq!(comps, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_direction_ignored() {
        let comps = components(4, [(3, 1), (2, 3)]);
        assert_eq!(comps, vec![vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn test_union_reports_merge() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 3));
        assert_eq!(uf.find(0), uf.find(2));
        assert_eq!(uf.len(), 4);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let n = 200_000;
        let comps = components(n, (1..n).map(|i| (i - 1, i)));
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].len(), n);
    }
}
