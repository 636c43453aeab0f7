use {
    std::num::*,
    rand_pcg::Pcg64,
    net_ensembles::{
        SwEnsemble,
        ErEnsembleC,
        BAensemble,
        WithGraph,
        SimpleSample,
        MeasurableGraphQuantities,
        rand::SeedableRng,
    },
    tracing::{debug, warn},
    super::*,
    crate::{
        error::SirError,
        misc_types::*,
        monte_carlo::MonteCarloParam,
        single_run::SingleRunParam,
    },
};

pub type ErdosRenyiEnsemble = ErEnsembleC<InfectionState, Pcg64>;
pub type SmallWorldEnsemble = SwEnsemble<InfectionState, Pcg64>;
pub type BarabasiEnsemble = BAensemble<InfectionState, Pcg64>;

/// Everything needed to build the contact network
#[derive(Clone, Debug)]
pub struct NetworkOptions{
    pub graph_seed: u64,
    pub system_size: NonZeroUsize,
    pub graph_type: GraphType,
}

// the random ensembles are re-randomized until they are connected
macro_rules! randomize_until_connected {
    ($ensemble:ident) => {
        {
            let mut counter = 0_u32;
            while $ensemble.is_connected() == Some(false)
            {
                counter += 1;
                if counter > MAX_GRAPH_RANDOMIZATIONS {
                    return Err(
                        SirError::Network(
                            format!("no connected graph found after {MAX_GRAPH_RANDOMIZATIONS} tries")
                        )
                    );
                }
                $ensemble.randomize();
            }
            if counter > 0
            {
                warn!("Randomized the ensemble {} additional times to find a connected network", counter);
            }
        }
    };
}

impl NetworkOptions{
    pub fn from_monte_carlo_param(param: &MonteCarloParam) -> Self
    {
        Self{
            graph_seed: param.graph_seed,
            system_size: param.system_size,
            graph_type: param.graph_type.clone()
        }
    }

    pub fn from_single_run_param(param: &SingleRunParam) -> Self
    {
        Self{
            graph_seed: param.graph_seed,
            system_size: param.system_size,
            graph_type: param.graph_type.clone()
        }
    }

    /// same network family, different draw
    pub fn with_graph_seed(&self, graph_seed: u64) -> Self
    {
        Self{
            graph_seed,
            ..self.clone()
        }
    }

    pub fn build(&self) -> Result<AdjacencyNetwork, SirError>
    {
        let n = self.system_size.get();
        let network = match &self.graph_type {
            GraphType::Complete => AdjacencyNetwork::complete(n),
            GraphType::EdgeList(edges) => AdjacencyNetwork::from_edges(n, edges)?,
            &GraphType::ErdosRenyi(mean_degree) => {
                if n < 2 || !mean_degree.is_finite() || mean_degree < 0.0 || mean_degree > (n - 1) as f64 {
                    return Err(
                        SirError::invalid(
                            format!("Erdos Renyi graph needs N >= 2 and 0 <= mean degree <= N-1, got {mean_degree} for N={n}")
                        )
                    );
                }
                // isolated nodes are part of the ensemble, no connectivity check
                let graph_rng = Pcg64::seed_from_u64(self.graph_seed);
                let ensemble = ErdosRenyiEnsemble::new(n, mean_degree, graph_rng);
                AdjacencyNetwork::from_network(ensemble.graph())
            },
            &GraphType::SmallWorld(rewire_prob) => {
                if !(0.0..=1.0).contains(&rewire_prob) {
                    return Err(SirError::invalid(format!("rewire probability {rewire_prob} not in [0, 1]")));
                }
                if n < 5 {
                    return Err(SirError::invalid("small world graphs need at least 5 nodes"));
                }
                let graph_rng = Pcg64::seed_from_u64(self.graph_seed);
                let mut ensemble = SmallWorldEnsemble::new(n, rewire_prob, graph_rng);
                randomize_until_connected!(ensemble);
                AdjacencyNetwork::from_network(ensemble.graph())
            },
            &GraphType::Barabasi(m, source_n) => {
                if m == 0 || source_n <= m || n < source_n {
                    return Err(
                        SirError::invalid(
                            format!("Barabasi graph needs 0 < m < source_n <= N, got m={m} source_n={source_n} N={n}")
                        )
                    );
                }
                let graph_rng = Pcg64::seed_from_u64(self.graph_seed);
                let mut ensemble = BarabasiEnsemble::new(n, graph_rng, m, source_n);
                randomize_until_connected!(ensemble);
                AdjacencyNetwork::from_network(ensemble.graph())
            }
        };
        debug!(
            "built {} network with {} nodes and {} edges",
            self.graph_type.name(),
            network.node_count(),
            network.edge_count()
        );
        Ok(network)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn options(graph_type: GraphType, n: usize) -> NetworkOptions
    {
        NetworkOptions{
            graph_seed: DEFAULT_GRAPH_SEED,
            system_size: NonZeroUsize::new(n).unwrap(),
            graph_type
        }
    }

    #[test]
    fn small_world_is_connected_and_reproducible()
    {
        let opt = options(GraphType::SmallWorld(0.1), 200);
        let a = opt.build().unwrap();
        let b = opt.build().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.node_count(), 200);
        assert!(a.average_degree() > 1.0);
        assert!((0..200).all(|i| a.degree(i) > 0));
    }

    #[test]
    fn erdos_renyi_mean_degree_and_reproducible()
    {
        let opt = options(GraphType::ErdosRenyi(10.0), 1000);
        let a = opt.build().unwrap();
        assert_eq!(a, opt.build().unwrap());
        assert_eq!(a.node_count(), 1000);
        let c = a.average_degree();
        assert!((9.0..11.0).contains(&c), "mean degree {c}");

        let b = opt.with_graph_seed(DEFAULT_GRAPH_SEED + 1).build().unwrap();
        assert_ne!(a, b);

        assert!(options(GraphType::ErdosRenyi(-1.0), 100).build().is_err());
        assert!(options(GraphType::ErdosRenyi(100.0), 100).build().is_err());
        assert!(options(GraphType::ErdosRenyi(f64::NAN), 100).build().is_err());
    }

    #[test]
    fn barabasi()
    {
        let net = options(GraphType::Barabasi(2, 3), 100).build().unwrap();
        assert_eq!(net.node_count(), 100);
        assert!((0..100).all(|i| net.degree(i) >= 1));

        assert!(options(GraphType::Barabasi(3, 3), 100).build().is_err());
    }

    #[test]
    fn deterministic_graphs()
    {
        let net = options(GraphType::Complete, 6).build().unwrap();
        assert_eq!(net.edge_count(), 15);

        let net = options(GraphType::EdgeList(vec![[0, 1], [1, 2]]), 4).build().unwrap();
        assert_eq!(net.edge_count(), 2);
        assert!(options(GraphType::EdgeList(vec![[0, 9]]), 4).build().is_err());
        assert!(options(GraphType::SmallWorld(1.5), 100).build().is_err());
    }
}
