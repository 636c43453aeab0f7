use {
    super::*,
    serde_json::Value,
    tracing::info,
    crate::{
        error::ConfigError,
        sir_model::*,
    },
};

pub fn execute_single_run(param: SingleRunParam, json: Value) -> Result<(), ConfigError>
{
    let network = NetworkOptions::from_single_run_param(&param).build()?;
    let mut engine = GillespieEngine::new(
        &network,
        param.tau,
        param.gamma,
        param.initial_infected,
        param.sir_seed
    )?;
    engine.run(param.horizon)?;
    let table = engine.resample(param.dt)?;

    let (s, i, r) = engine.counts();
    info!(
        "{} events until t={:.4}: S={} I={} R={}, peak of I {}",
        engine.trajectory().event_count(),
        engine.time(),
        s,
        i,
        r,
        engine.peak_infected()
    );

    let [events_name, grid_name] = param.quick_names();
    write_run(&events_name, &json, |w| w.write_trajectory(engine.trajectory()))
        .map_err(|e| ConfigError::io(events_name.as_str(), e))?;
    write_run(&grid_name, &json, |w| w.write_table(&table))
        .map_err(|e| ConfigError::io(grid_name.as_str(), e))?;
    info!("wrote {} and {}", events_name, grid_name);
    Ok(())
}

fn write_run<F>(name: &str, json: &Value, body: F) -> std::io::Result<()>
where F: FnOnce(&mut CurveWriter) -> std::io::Result<()>
{
    let mut writer = CurveWriter::new(name)?;
    writer.write_header(std::slice::from_ref(json))?;
    body(&mut writer)?;
    writer.finish()
}
