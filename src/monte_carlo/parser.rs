use{
    structopt::StructOpt,
    serde::{Serialize, Deserialize},
    serde_json::Value,
    std::num::*,
    crate::{
        error::ConfigError,
        json_parsing::*,
        misc_types::*,
    },
    super::MonteCarloAggregator,
};

#[derive(Debug, StructOpt, Clone)]
/// Average many Gillespie runs and write the mean S I R curves
pub struct MonteCarlo
{
    /// Specify the json file with the options
    /// If not given, an example json will be printed
    #[structopt(long)]
    json: Option<String>,

    /// Number of threads to use, default: all available
    #[structopt(long)]
    num_threads: Option<NonZeroUsize>
}

impl MonteCarlo {
    pub fn parse(&self) -> Result<(MonteCarloParam, Value), ConfigError>
    {
        parse(self.json.as_ref())
    }

    pub fn execute(&self) -> Result<(), ConfigError>
    {
        let (param, json) = self.parse()?;
        super::execute::execute_monte_carlo(param, json, self.num_threads)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct MonteCarloParam
{
    pub system_size: NonZeroUsize,
    pub graph_type: GraphType,
    pub tau: f64,
    pub gamma: f64,
    pub initial_infected: usize,
    pub dt: f64,
    pub repetitions: usize,
    pub extinction_factor: f64,
    /// run to extinction if not given
    pub horizon: Option<f64>,
    pub graph_seed: u64,
    pub sir_seed: u64,
    /// draw a new random network for every repetition
    pub resample_graph: bool,
}

impl MonteCarloParam
{
    pub fn aggregator(&self) -> MonteCarloAggregator
    {
        MonteCarloAggregator{
            tau: self.tau,
            gamma: self.gamma,
            initial_infected: self.initial_infected,
            dt: self.dt,
            repetitions: self.repetitions,
            extinction_factor: self.extinction_factor,
            horizon: self.horizon,
            sir_seed: self.sir_seed
        }
    }

    pub fn quick_name(&self, num_threads: Option<NonZeroUsize>) -> String
    {
        let j = match num_threads
        {
            None => "".to_owned(),
            Some(v) => format!("j{}", v)
        };
        let h = match self.horizon
        {
            None => "Ext".to_owned(),
            Some(t) => format!("H{t}")
        };
        format!(
            "v{}MonteCarlo_N{}Tau{}Gamma{}InInf{}Dt{}Rep{}EF{}{h}Graph{}GS{}SS{}{}{j}.dat",
            crate::VERSION,
            self.system_size,
            self.tau,
            self.gamma,
            self.initial_infected,
            self.dt,
            self.repetitions,
            self.extinction_factor,
            self.graph_type.name(),
            self.graph_seed,
            self.sir_seed,
            if self.resample_graph { "RG" } else { "" }
        )
    }
}

impl Default for MonteCarloParam
{
    fn default() -> Self {
        Self{
            system_size: DEFAULT_SYSTEM_SIZE,
            graph_type: GraphType::ErdosRenyi(DEFAULT_MEAN_DEGREE),
            tau: DEFAULT_TAU,
            gamma: DEFAULT_GAMMA,
            initial_infected: DEFAULT_INITIAL_INFECTED,
            dt: DEFAULT_DT,
            repetitions: DEFAULT_REPETITIONS,
            extinction_factor: DEFAULT_EXTINCTION_FACTOR,
            horizon: None,
            graph_seed: DEFAULT_GRAPH_SEED,
            sir_seed: DEFAULT_SIR_SEED,
            resample_graph: true
        }
    }
}
