/// Why an edge was refused by the [`Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Loop,
    Cycle,
}

/// Disjoint-set forest over `[0, vertices)` that only accepts edges joining
/// two different components, so the edge set it accepted is always acyclic.
#[derive(Debug)]
pub struct Forest {
    parent: Vec<usize>,
    size: Vec<usize>,
    edges: usize,
}

impl Forest {
    pub fn new(vertices: usize) -> Self {
        Self {
            parent: (0..vertices).collect(),
            size: vec![1; vertices],
            edges: 0,
        }
    }

    /// Number of accepted edges.
    #[inline]
    pub fn edges(&self) -> usize {
        self.edges
    }

    pub fn find(&mut self, mut v: usize) -> usize {
        // path halving
        while self.parent[v] != v {
            let grand = self.parent[self.parent[v]];
            self.parent[v] = grand;
            v = grand;
        }
        v
    }

    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), Rejection> {
        if u == v {
            return Err(Rejection::Loop);
        }
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return Err(Rejection::Cycle);
        }
        // Hang the smaller tree under the bigger one.
        let (small, big) = if self.size[ru] < self.size[rv] { (ru, rv) } else { (rv, ru) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.edges += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_cycles_and_loops() {
        let mut f = Forest::new(6);
        f.add_edge(1, 2).unwrap();
        f.add_edge(2, 3).unwrap();
        f.add_edge(3, 4).unwrap();
        assert_eq!(f.add_edge(4, 2), Err(Rejection::Cycle));
        assert_eq!(f.add_edge(5, 5), Err(Rejection::Loop));
        assert_eq!(f.find(1), f.find(4));
        assert_ne!(f.find(1), f.find(5));
        assert_eq!(f.edges(), 3);
    }

    #[test]
    fn parallel_edge_is_a_cycle() {
        let mut f = Forest::new(3);
        f.add_edge(0, 1).unwrap();
        assert_eq!(f.add_edge(1, 0), Err(Rejection::Cycle));
    }
}
