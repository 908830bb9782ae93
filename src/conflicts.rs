//! Conflict graph over (group, subject) assignment units. Two units are in
//! conflict when they can never share a time slot: they belong to the same
//! group, or their subjects share a qualified professor. The graph is built
//! once per instance and is read-only afterwards; the search itself keeps
//! its input order, and the graph feeds diagnostics such as the coloring
//! estimate logged before a solve.

use ndarray::Array2;

use crate::Instance;

/// One assignment unit: a group that must take a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitNode {
    pub group: usize,
    pub subject: usize,
    pub term: u32,
}

/// Undirected conflict graph with a dense symmetric adjacency matrix.
pub struct ConflictGraph {
    nodes: Vec<UnitNode>,
    adjacency: Array2<bool>,
}

impl ConflictGraph {
    /// Build the graph for an instance: one node per (group, subject) unit
    /// in subject-major input order, one edge per conflicting pair.
    pub fn build(instance: &Instance) -> ConflictGraph {
        let professors_by_subject: Vec<Vec<usize>> = instance
            .subjects
            .iter()
            .map(|subject| instance.qualified_professors(subject.index))
            .collect();

        let mut nodes = Vec::new();
        for subject in &instance.subjects {
            for &group in &subject.groups_taking {
                nodes.push(UnitNode {
                    group,
                    subject: subject.index,
                    term: subject.term,
                });
            }
        }

        let count = nodes.len();
        let mut adjacency = Array2::from_elem((count, count), false);
        for i in 0..count {
            for j in i + 1..count {
                if in_conflict(&nodes[i], &nodes[j], &professors_by_subject) {
                    adjacency[[i, j]] = true;
                    adjacency[[j, i]] = true;
                }
            }
        }

        ConflictGraph { nodes, adjacency }
    }

    pub fn nodes(&self) -> &[UnitNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges, each counted once.
    pub fn edge_count(&self) -> usize {
        let count = self.nodes.len();
        (0..count)
            .map(|i| (i + 1..count).filter(|&j| self.adjacency[[i, j]]).count())
            .sum()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&other| self.adjacency[[node, other]])
    }

    /// Edge density, 2E / N(N-1).
    pub fn density(&self) -> f64 {
        let count = self.node_count();
        if count < 2 {
            return 0.0;
        }
        (2 * self.edge_count()) as f64 / (count * (count - 1)) as f64
    }

    /// Greedy (Welsh-Powell) coloring over nodes in descending-degree order.
    /// Approximates how many mutually exclusive time slots the units need,
    /// which makes a cheap feasibility hint against the 35-slot week.
    pub fn greedy_coloring_estimate(&self) -> usize {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&node| std::cmp::Reverse(self.degree(node)));

        let mut colors: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for &node in &order {
            let taken: Vec<usize> = self.neighbors(node).filter_map(|n| colors[n]).collect();
            let mut color = 0;
            while taken.contains(&color) {
                color += 1;
            }
            colors[node] = Some(color);
        }

        colors.into_iter().flatten().max().map_or(0, |max| max + 1)
    }
}

fn in_conflict(a: &UnitNode, b: &UnitNode, professors_by_subject: &[Vec<usize>]) -> bool {
    if a.group == b.group {
        return true;
    }
    professors_by_subject[a.subject]
        .iter()
        .any(|professor| professors_by_subject[b.subject].contains(professor))
}
