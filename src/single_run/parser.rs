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
};

#[derive(Debug, StructOpt, Clone)]
/// Simulate a single epidemic and write its event trajectory
pub struct SingleRun
{
    /// Specify the json file with the options
    /// If not given, an example json will be printed
    #[structopt(long)]
    json: Option<String>,
}

impl SingleRun {
    pub fn parse(&self) -> Result<(SingleRunParam, Value), ConfigError>
    {
        parse(self.json.as_ref())
    }

    pub fn execute(&self) -> Result<(), ConfigError>
    {
        let (param, json) = self.parse()?;
        super::execute::execute_single_run(param, json)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SingleRunParam
{
    pub system_size: NonZeroUsize,
    pub graph_type: GraphType,
    pub tau: f64,
    pub gamma: f64,
    pub initial_infected: usize,
    /// step of the resampled table
    pub dt: f64,
    /// run to extinction if not given
    pub horizon: Option<f64>,
    pub graph_seed: u64,
    pub sir_seed: u64,
}

impl SingleRunParam
{
    /// file names of the raw events and of the resampled table
    pub fn quick_names(&self) -> [String; 2]
    {
        let h = match self.horizon
        {
            None => "Ext".to_owned(),
            Some(t) => format!("H{t}")
        };
        let base = format!(
            "v{}SingleRun_N{}Tau{}Gamma{}InInf{}{h}Graph{}GS{}SS{}",
            crate::VERSION,
            self.system_size,
            self.tau,
            self.gamma,
            self.initial_infected,
            self.graph_type.name(),
            self.graph_seed,
            self.sir_seed
        );
        [
            format!("{base}_events.dat"),
            format!("{base}Dt{}_grid.dat", self.dt)
        ]
    }
}

impl Default for SingleRunParam
{
    fn default() -> Self {
        Self{
            system_size: DEFAULT_SYSTEM_SIZE,
            graph_type: GraphType::SmallWorld(0.1),
            tau: DEFAULT_TAU,
            gamma: DEFAULT_GAMMA,
            initial_infected: DEFAULT_INITIAL_INFECTED,
            dt: DEFAULT_DT,
            horizon: None,
            graph_seed: DEFAULT_GRAPH_SEED,
            sir_seed: DEFAULT_SIR_SEED
        }
    }
}
