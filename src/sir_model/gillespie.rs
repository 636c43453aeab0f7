use {
    rand_pcg::Pcg64,
    rand::{RngCore, SeedableRng},
    rand_distr::{Distribution, Open01},
    serde::{Serialize, Deserialize},
    super::*,
    crate::error::SirError,
};

/// An applied event
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event{
    pub time: f64,
    pub node: usize,
    pub kind: EventKind,
}

/// # Exact stochastic SIR simulation (Gillespie SSA)
/// * owns its random stream and its network. Pass `&network` to share
///   one topology between engines
/// * one run is strictly sequential, parallelism happens one level up
#[derive(Clone)]
pub struct GillespieEngine<N>{
    network: N,
    state: EpidemicState,
    rng: Pcg64,
    trajectory: Trajectory,
    initial_infected: usize,
    time: f64,
}

impl<N> GillespieEngine<N>
where N: ContactNetwork
{
    /// Create an engine and seed `initial_infected` uniformly drawn nodes
    pub fn new(
        network: N,
        tau: f64,
        gamma: f64,
        initial_infected: usize,
        rng_seed: u64
    ) -> Result<Self, SirError>
    {
        let state = EpidemicState::new(network.node_count(), tau, gamma)?;
        let (s, i, r) = state.counts();
        let mut engine = Self{
            network,
            state,
            rng: Pcg64::seed_from_u64(rng_seed),
            trajectory: Trajectory::new(s, i, r),
            initial_infected,
            time: 0.0
        };
        engine.reset()?;
        Ok(engine)
    }

    /// # New epidemic on the same network
    /// * the random stream keeps going, so consecutive runs differ
    pub fn reset(&mut self) -> Result<(), SirError>
    {
        self.state.seed(&self.network, self.initial_infected, &mut self.rng)?;
        let (s, i, r) = self.state.counts();
        self.trajectory.clear(s, i, r);
        self.time = 0.0;
        Ok(())
    }

    /// derive a new independent random stream, e.g. one per worker
    pub fn reseed_sir_rng(&mut self, rng: &mut Pcg64)
    {
        self.rng = Pcg64::seed_from_u64(rng.next_u64());
    }

    /// # Advance by exactly one event
    /// * returns `None` if the epidemic is extinct, nothing changes then
    pub fn step(&mut self) -> Result<Option<Event>, SirError>
    {
        let total = self.state.total_rate();
        if total <= 0.0 {
            return Ok(None);
        }

        // exponential waiting time of a Poisson process with rate `total`
        let u1: f64 = Open01.sample(&mut self.rng);
        self.time += -u1.ln() / total;

        let u2: f64 = Open01.sample(&mut self.rng);
        let node = self.state
            .select(u2 * total)
            .ok_or(SirError::EmptyRateIndex{total})?;

        let kind = self.state.apply_event(&self.network, node)?;

        let (s, i, r) = self.state.counts();
        self.trajectory.push(self.time, s, i, r);
        Ok(
            Some(
                Event{
                    time: self.time,
                    node,
                    kind
                }
            )
        )
    }

    /// Step until no infected node is left. Terminates almost surely on a finite network
    pub fn run_to_extinction(&mut self) -> Result<(), SirError>
    {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// # Step while the time is below `t_max`
    /// * the last event may overshoot `t_max`
    /// * stops early on extinction
    pub fn run_to_horizon(&mut self, t_max: f64) -> Result<(), SirError>
    {
        if t_max.is_nan() || t_max < 0.0 {
            return Err(SirError::invalid(format!("horizon has to be non-negative, got {t_max}")));
        }
        while self.time < t_max {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Run to `horizon` if given, else to extinction
    pub fn run(&mut self, horizon: Option<f64>) -> Result<(), SirError>
    {
        match horizon {
            Some(t_max) => self.run_to_horizon(t_max),
            None => self.run_to_extinction()
        }
    }

    /// Digitize the events so far, see `Trajectory::resample`
    pub fn resample(&self, dt: f64) -> Result<SirTable, SirError>
    {
        self.trajectory.resample(dt)
    }

    pub fn trajectory(&self) -> &Trajectory
    {
        &self.trajectory
    }

    pub fn time(&self) -> f64
    {
        self.time
    }

    /// (tau, gamma)
    pub fn rates(&self) -> (f64, f64)
    {
        (self.state.tau(), self.state.gamma())
    }

    pub fn total_rate(&self) -> f64
    {
        self.state.total_rate()
    }

    /// (S, I, R) right now
    pub fn counts(&self) -> (usize, usize, usize)
    {
        self.state.counts()
    }

    pub fn is_extinct(&self) -> bool
    {
        self.state.is_extinct()
    }

    pub fn initial_infected(&self) -> usize
    {
        self.initial_infected
    }

    pub fn peak_infected(&self) -> usize
    {
        self.trajectory.peak_infected()
    }

    /// everyone who is or was infected
    pub fn ever_infected(&self) -> usize
    {
        let (_, i, r) = self.state.counts();
        i + r
    }

    pub fn state(&self) -> &EpidemicState
    {
        &self.state
    }

    pub fn network(&self) -> &N
    {
        &self.network
    }
}
