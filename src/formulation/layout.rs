//! Variable layout: where x, t and u live in the column vector.

use super::VarId;

/// Maps arcs and nodes to formulation columns.
///
/// Columns are laid out as all arc variables `x(i,j)` (row-major over
/// `i`, skipping `i == j`), then `t(0..n)`, then `u(0..n)`.
#[derive(Debug, Clone)]
pub struct VarLayout {
    num_nodes: usize,
    arcs: Vec<Option<VarId>>,
    arc_list: Vec<(usize, usize, VarId)>,
    time: Vec<VarId>,
    load: Vec<VarId>,
}

impl VarLayout {
    pub fn new(num_nodes: usize) -> Self {
        let mut next = 0u32;
        let mut take = || {
            let id = VarId::new(next);
            next += 1;
            id
        };

        let mut arcs = vec![None; num_nodes * num_nodes];
        let mut arc_list = Vec::with_capacity(num_nodes * num_nodes.saturating_sub(1));
        for i in 0..num_nodes {
            for j in 0..num_nodes {
                if i != j {
                    let id = take();
                    arcs[i * num_nodes + j] = Some(id);
                    arc_list.push((i, j, id));
                }
            }
        }
        let time = (0..num_nodes).map(|_| take()).collect();
        let load = (0..num_nodes).map(|_| take()).collect();

        Self {
            num_nodes,
            arcs,
            arc_list,
            time,
            load,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Total number of columns.
    pub fn num_variables(&self) -> usize {
        self.arc_list.len() + 2 * self.num_nodes
    }

    /// Column of `x(i,j)`, `None` for `i == j`.
    pub fn arc(&self, i: usize, j: usize) -> Option<VarId> {
        self.arcs[i * self.num_nodes + j]
    }

    /// All arcs as `(i, j, column)`.
    pub fn arcs(&self) -> &[(usize, usize, VarId)] {
        &self.arc_list
    }

    /// Column of the service start `t(i)`.
    pub fn time(&self, i: usize) -> VarId {
        self.time[i]
    }

    /// Column of the cumulative load `u(i)`.
    pub fn load(&self, i: usize) -> VarId {
        self.load[i]
    }

    /// Arcs whose value reaches `threshold`.
    pub fn selected_arcs<'a>(
        &'a self,
        values: &'a [f64],
        threshold: f64,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.arc_list
            .iter()
            .filter(move |&&(_, _, id)| values[id.index()] >= threshold)
            .map(|&(i, j, _)| (i, j))
    }
}
