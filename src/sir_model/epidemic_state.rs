use {
    rand::{Rng, seq::index::sample},
    serde::{Serialize, Deserialize},
    super::*,
    crate::error::SirError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind{
    Infection,
    Recovery,
}

/// # Compartments and rates of all nodes
/// * the compartment is the only source of truth. The rate of a
///   susceptible node is derived from the number of its infected
///   neighbors, which is an integer and can not drift
/// * the network is passed in by the owner, it is never stored here
#[derive(Clone, Debug)]
pub struct EpidemicState{
    states: Vec<InfectionState>,
    infected_neighbors: Vec<u32>,
    rates: CumulativeRateIndex,
    tau: f64,
    gamma: f64,
    s: usize,
    i: usize,
    r: usize,
}

impl EpidemicState{
    /// All nodes susceptible, all rates 0
    pub fn new(n: usize, tau: f64, gamma: f64) -> Result<Self, SirError>
    {
        if n == 0 {
            return Err(SirError::invalid("network needs at least one node"));
        }
        if !tau.is_finite() || tau < 0.0 {
            return Err(SirError::invalid(format!("tau has to be finite and non-negative, got {tau}")));
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(SirError::invalid(format!("gamma has to be finite and positive, got {gamma}")));
        }
        Ok(
            Self{
                states: vec![InfectionState::Susceptible; n],
                infected_neighbors: vec![0; n],
                rates: CumulativeRateIndex::new(n),
                tau,
                gamma,
                s: n,
                i: 0,
                r: 0
            }
        )
    }

    pub fn n(&self) -> usize
    {
        self.states.len()
    }

    pub fn tau(&self) -> f64
    {
        self.tau
    }

    pub fn gamma(&self) -> f64
    {
        self.gamma
    }

    /// (S, I, R)
    pub fn counts(&self) -> (usize, usize, usize)
    {
        (self.s, self.i, self.r)
    }

    pub fn infected(&self) -> usize
    {
        self.i
    }

    pub fn state(&self, node: usize) -> InfectionState
    {
        self.states[node]
    }

    #[inline]
    pub fn rate(&self, node: usize) -> f64
    {
        self.rates.rate(node)
    }

    pub fn is_extinct(&self) -> bool
    {
        self.i == 0
    }

    /// # Sum over all node rates
    /// * exactly 0 iff no node is infected
    pub fn total_rate(&self) -> f64
    {
        if self.is_extinct() {
            0.0
        } else {
            self.rates.total()
        }
    }

    /// node whose rate interval contains `draw`, see `CumulativeRateIndex::select`
    pub fn select(&self, draw: f64) -> Option<usize>
    {
        self.rates.select(draw)
    }

    /// everyone back to susceptible
    pub fn clear(&mut self)
    {
        self.states.iter_mut()
            .for_each(|s| *s = InfectionState::Susceptible);
        self.infected_neighbors.iter_mut()
            .for_each(|c| *c = 0);
        self.rates.clear();
        self.s = self.states.len();
        self.i = 0;
        self.r = 0;
    }

    /// # Start a new epidemic
    /// * clears the state, then infects `initial_infected` distinct nodes,
    ///   drawn uniformly
    pub fn seed<N, R>(&mut self, network: &N, initial_infected: usize, rng: &mut R) -> Result<(), SirError>
    where N: ContactNetwork + ?Sized,
        R: Rng + ?Sized
    {
        let n = self.n();
        if network.node_count() != n {
            return Err(
                SirError::invalid(
                    format!("network has {} nodes, state has {n}", network.node_count())
                )
            );
        }
        if initial_infected == 0 || initial_infected >= n {
            return Err(
                SirError::invalid(
                    format!("initial infected has to be in 1..{n}, got {initial_infected}")
                )
            );
        }
        self.clear();
        for patient in sample(rng, n, initial_infected).into_iter() {
            self.apply_infection(network, patient)?;
        }
        Ok(())
    }

    #[inline]
    fn susceptible_rate(&self, node: usize) -> f64
    {
        self.tau * self.infected_neighbors[node] as f64
    }

    pub fn apply_infection<N>(&mut self, network: &N, node: usize) -> Result<(), SirError>
    where N: ContactNetwork + ?Sized
    {
        self.states[node].infect(node)?;
        self.rates.set(node, self.gamma);
        for neighbor in network.neighbors_of(node) {
            if self.states[neighbor].sus_check() {
                self.infected_neighbors[neighbor] += 1;
                let rate = self.susceptible_rate(neighbor);
                self.rates.set(neighbor, rate);
            }
        }
        self.s -= 1;
        self.i += 1;
        Ok(())
    }

    pub fn apply_recovery<N>(&mut self, network: &N, node: usize) -> Result<(), SirError>
    where N: ContactNetwork + ?Sized
    {
        self.states[node].recover(node)?;
        self.rates.set(node, 0.0);
        // infected or recovered neighbors do not carry a contribution of this node
        for neighbor in network.neighbors_of(node) {
            if self.states[neighbor].sus_check() {
                debug_assert!(self.infected_neighbors[neighbor] > 0);
                self.infected_neighbors[neighbor] -= 1;
                let rate = self.susceptible_rate(neighbor);
                self.rates.set(neighbor, rate);
            }
        }
        self.i -= 1;
        self.r += 1;
        Ok(())
    }

    /// # Fire the event of `node`
    /// * the compartment alone decides if it is an infection or a recovery
    pub fn apply_event<N>(&mut self, network: &N, node: usize) -> Result<EventKind, SirError>
    where N: ContactNetwork + ?Sized
    {
        match self.states[node] {
            InfectionState::Susceptible => {
                self.apply_infection(network, node)?;
                Ok(EventKind::Infection)
            },
            InfectionState::Infected => {
                self.apply_recovery(network, node)?;
                Ok(EventKind::Recovery)
            },
            InfectionState::Recovered => Err(
                SirError::ContractViolation{
                    node,
                    found: InfectionState::Recovered,
                    expected: InfectionState::Infected
                }
            )
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand_pcg::Pcg64;
    use rand::SeedableRng;

    fn path(n: usize) -> AdjacencyNetwork
    {
        let edges: Vec<_> = (1..n).map(|i| [i - 1, i]).collect();
        AdjacencyNetwork::from_edges(n, &edges).unwrap()
    }

    fn brute_force_rate(state: &EpidemicState, network: &AdjacencyNetwork, node: usize) -> f64
    {
        match state.state(node) {
            InfectionState::Susceptible => {
                let inf = network.neighbors_of(node)
                    .filter(|&j| state.state(j).inf_check())
                    .count();
                state.tau() * inf as f64
            },
            InfectionState::Infected => state.gamma(),
            InfectionState::Recovered => 0.0
        }
    }

    #[test]
    fn invalid_parameters()
    {
        assert!(EpidemicState::new(0, 1.0, 1.0).is_err());
        assert!(EpidemicState::new(3, -1.0, 1.0).is_err());
        assert!(EpidemicState::new(3, 1.0, 0.0).is_err());
        assert!(EpidemicState::new(3, f64::NAN, 1.0).is_err());

        let net = path(3);
        let mut state = EpidemicState::new(3, 1.0, 1.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        assert!(state.seed(&net, 0, &mut rng).is_err());
        assert!(state.seed(&net, 3, &mut rng).is_err());
        assert!(state.seed(&path(4), 1, &mut rng).is_err());
    }

    #[test]
    fn rates_add_up_over_infected_neighbors()
    {
        // 0 - 1 - 2, node 1 has two infected neighbors
        let net = path(3);
        let mut state = EpidemicState::new(3, 0.5, 2.0).unwrap();
        state.apply_infection(&net, 0).unwrap();
        state.apply_infection(&net, 2).unwrap();
        assert_eq!(state.rate(1), 1.0);
        assert_eq!(state.rate(0), 2.0);
        assert_eq!(state.total_rate(), 5.0);
        assert_eq!(state.counts(), (1, 2, 0));

        state.apply_recovery(&net, 0).unwrap();
        assert_eq!(state.rate(1), 0.5);
        assert_eq!(state.rate(0), 0.0);
        assert_eq!(state.counts(), (1, 1, 1));

        // node 2 recovers, node 1 is left without infected neighbors
        state.apply_recovery(&net, 2).unwrap();
        assert_eq!(state.rate(1), 0.0);
        assert!(state.is_extinct());
        assert_eq!(state.total_rate(), 0.0);
    }

    #[test]
    fn recovery_does_not_touch_infected_neighbors()
    {
        let net = path(3);
        let mut state = EpidemicState::new(3, 1.0, 3.0).unwrap();
        state.apply_infection(&net, 0).unwrap();
        state.apply_infection(&net, 1).unwrap();
        state.apply_recovery(&net, 0).unwrap();
        assert_eq!(state.rate(1), 3.0);
        assert_eq!(state.rate(2), 1.0);
    }

    #[test]
    fn events_follow_the_compartment()
    {
        let net = path(2);
        let mut state = EpidemicState::new(2, 1.0, 1.0).unwrap();
        assert_eq!(state.apply_event(&net, 0), Ok(EventKind::Infection));
        assert_eq!(state.apply_event(&net, 0), Ok(EventKind::Recovery));
        assert!(matches!(
            state.apply_event(&net, 0),
            Err(SirError::ContractViolation{node: 0, ..})
        ));
        assert!(state.apply_recovery(&net, 1).is_err());
    }

    #[test]
    fn seeding_matches_brute_force()
    {
        let net = AdjacencyNetwork::complete(10);
        let mut state = EpidemicState::new(10, 0.3, 1.0).unwrap();
        let mut rng = Pcg64::seed_from_u64(872);
        for k in 1..10 {
            state.seed(&net, k, &mut rng).unwrap();
            assert_eq!(state.counts(), (10 - k, k, 0));
            for node in 0..10 {
                assert!((state.rate(node) - brute_force_rate(&state, &net, node)).abs() < 1e-12);
            }
        }
    }
}
