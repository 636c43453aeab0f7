use{
    std::{
        process::exit,
        time::Instant
    },
    structopt::StructOpt,
    indicatif::*,
    tracing::{info, error},
    tracing_subscriber::EnvFilter,
};

pub mod error;
pub mod sir_model;
pub mod grid;
pub mod misc_types;
pub mod stats_methods;
pub mod json_parsing;
pub mod monte_carlo;
pub mod single_run;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let start_time = Instant::now();
    let opt = CmdOption::from_args();
    let result = match opt{
        CmdOption::MonteCarlo(o) => o.execute(),
        CmdOption::Trajectory(o) => o.execute(),
    };
    info!("Execution took {}", humantime::format_duration(start_time.elapsed()));
    if let Err(e) = result {
        error!("{}", e);
        exit(1);
    }
}

pub fn indication_bar(len: u64) -> ProgressBar
{
        // for indication on when it is finished
        let bar = ProgressBar::new(len);
        bar.set_style(ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise} - {eta_precise}] {wide_bar}"));
        bar
}


#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Exact stochastic SIR epidemics on contact networks!")]
pub enum CmdOption
{
    MonteCarlo(monte_carlo::MonteCarlo),
    Trajectory(single_run::SingleRun),
}
