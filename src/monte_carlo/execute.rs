use {
    super::*,
    serde_json::Value,
    std::num::*,
    rand_pcg::Pcg64,
    rand::{RngCore, SeedableRng},
    tracing::{info, warn},
    crate::{
        indication_bar,
        error::ConfigError,
        sir_model::*,
    },
};

pub fn execute_monte_carlo(
    param: MonteCarloParam,
    json: Value,
    num_threads: Option<NonZeroUsize>
) -> Result<(), ConfigError>
{
    if let Some(j) = num_threads {
        // limit number of threads to j
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(j.get()).build_global() {
            warn!("could not limit the thread pool: {}", e);
        }
    }
    info!(
        "averaging {} repetitions on {} graph with N={}, tau={}, gamma={}",
        param.repetitions,
        param.graph_type.name(),
        param.system_size,
        param.tau,
        param.gamma
    );

    let options = NetworkOptions::from_monte_carlo_param(&param);
    let aggregator = param.aggregator();
    let bar = indication_bar(param.repetitions as u64);

    let result = if param.resample_graph && param.graph_type.is_random() {
        let mut graph_rng = Pcg64::seed_from_u64(param.graph_seed);
        let graph_seeds: Vec<u64> = (0..param.repetitions)
            .map(|_| graph_rng.next_u64())
            .collect();
        aggregator.run(
            |repetition| options.with_graph_seed(graph_seeds[repetition]).build(),
            Some(&bar)
        )?
    } else {
        let base = options.build()?;
        info!("network has {} edges, average degree {:.3}", base.edge_count(), base.average_degree());
        aggregator.run(|_| Ok(base.clone()), Some(&bar))?
    };
    bar.finish_with_message("Done");

    let name = param.quick_name(num_threads);
    write_averages(&name, &result, &json)
        .map_err(|e| ConfigError::io(name.as_str(), e))?;
    info!("wrote {} rows to {}", result.table.len(), name);
    Ok(())
}

fn write_averages(name: &str, result: &AveragedCurves, json: &Value) -> std::io::Result<()>
{
    let mut writer = CurveWriter::new(name)?;
    writer.write_header(std::slice::from_ref(json))?;
    writer.write_comment(
        &format!("survivors {} discarded {}", result.survivors, result.discarded)
    )?;
    if let (Some(size), Some(peak)) = (result.final_size, result.peak_infected) {
        writer.write_comment(
            &format!(
                "final_size_mean {} final_size_var {} final_size_err {} peak_mean {} peak_var {} peak_err {}",
                size.mean(),
                size.variance(),
                size.mean_err(result.survivors),
                peak.mean(),
                peak.variance(),
                peak.mean_err(result.survivors)
            )
        )?;
    }
    writer.write_table(&result.table)?;
    writer.finish()
}
