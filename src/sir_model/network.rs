use {
    serde::{Serialize, Deserialize},
    net_ensembles::{GenericGraph, AdjContainer, Node},
    crate::error::SirError,
};

/// # Topology as seen by the epidemic
/// * nodes are the indices `0..node_count()`
/// * undirected, no self loops
pub trait ContactNetwork
{
    fn node_count(&self) -> usize;

    fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_;
}

impl<N> ContactNetwork for &N
where N: ContactNetwork + ?Sized
{
    #[inline]
    fn node_count(&self) -> usize
    {
        (**self).node_count()
    }

    #[inline]
    fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_
    {
        (**self).neighbors_of(node)
    }
}

impl<T, A> ContactNetwork for GenericGraph<T, A>
where T: Node,
    A: AdjContainer<T>
{
    fn node_count(&self) -> usize
    {
        self.vertex_count()
    }

    fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_
    {
        self.contained_iter_neighbors_with_index(node)
            .map(|(index, _)| index)
    }
}

/// Plain adjacency list. Neighbor lists are kept sorted and free of duplicates
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyNetwork
{
    adj: Vec<Vec<usize>>
}

impl AdjacencyNetwork
{
    /// `n` isolated nodes
    pub fn empty(n: usize) -> Self
    {
        Self{
            adj: vec![Vec::new(); n]
        }
    }

    pub fn complete(n: usize) -> Self
    {
        let adj = (0..n)
            .map(
                |i|
                (0..n).filter(|&j| j != i).collect()
            ).collect();
        Self{adj}
    }

    pub fn from_edges(n: usize, edges: &[[usize; 2]]) -> Result<Self, SirError>
    {
        let mut network = Self::empty(n);
        for &[i, j] in edges {
            network.add_edge(i, j)?;
        }
        Ok(network)
    }

    /// Copies the topology of any other network
    pub fn from_network<N>(network: &N) -> Self
    where N: ContactNetwork + ?Sized
    {
        let adj = (0..network.node_count())
            .map(
                |i|
                {
                    let mut neighbors: Vec<_> = network.neighbors_of(i)
                        .filter(|&j| j != i)
                        .collect();
                    neighbors.sort_unstable();
                    neighbors.dedup();
                    neighbors
                }
            ).collect();
        Self{adj}
    }

    /// returns false if the edge already existed
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<bool, SirError>
    {
        let n = self.adj.len();
        if i >= n || j >= n {
            return Err(
                SirError::invalid(format!("edge ({i}, {j}) out of range for {n} nodes"))
            );
        }
        if i == j {
            return Err(SirError::invalid(format!("self loop at node {i}")));
        }
        match self.adj[i].binary_search(&j) {
            Ok(_) => Ok(false),
            Err(pos_i) => {
                self.adj[i].insert(pos_i, j);
                let pos_j = self.adj[j].binary_search(&i)
                    .unwrap_or_else(|pos| pos);
                self.adj[j].insert(pos_j, i);
                Ok(true)
            }
        }
    }

    pub fn degree(&self, node: usize) -> usize
    {
        self.adj[node].len()
    }

    pub fn edge_count(&self) -> usize
    {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn average_degree(&self) -> f64
    {
        if self.adj.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / self.adj.len() as f64
    }
}

impl ContactNetwork for AdjacencyNetwork
{
    #[inline]
    fn node_count(&self) -> usize
    {
        self.adj.len()
    }

    #[inline]
    fn neighbors_of(&self, node: usize) -> impl Iterator<Item = usize> + '_
    {
        self.adj[node].iter().copied()
    }
}
