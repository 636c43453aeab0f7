use {
    indicatif::ProgressBar,
    rand::{RngCore, SeedableRng},
    rand_pcg::Pcg64,
    rayon::prelude::*,
    serde::{Serialize, Deserialize},
    tracing::{debug, info, warn},
    crate::{
        error::SirError,
        grid::TimeGrid,
        sir_model::*,
        stats_methods::MyVariance,
    },
};

/// Result of one repetition, already on the time grid
#[derive(Clone, Debug)]
pub struct RunOutcome
{
    pub table: SirTable,
    pub peak_infected: usize,
    pub final_recovered: usize,
    pub events: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AveragedCurves
{
    pub table: SirTable,
    pub survivors: usize,
    pub discarded: usize,
    /// R at the end of the surviving runs
    pub final_size: Option<MyVariance>,
    pub peak_infected: Option<MyVariance>,
}

/// # Runs many independent epidemics and averages them
/// * every repetition gets its own engine, network and random stream
/// * runs whose peak of I never exceeds `extinction_factor * initial_infected`
///   count as premature extinctions and are left out of the average
#[derive(Clone, Debug)]
pub struct MonteCarloAggregator
{
    pub tau: f64,
    pub gamma: f64,
    pub initial_infected: usize,
    pub dt: f64,
    pub repetitions: usize,
    pub extinction_factor: f64,
    pub horizon: Option<f64>,
    pub sir_seed: u64,
}

impl MonteCarloAggregator
{
    pub fn validate(&self) -> Result<(), SirError>
    {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SirError::invalid(format!("dt has to be finite and positive, got {}", self.dt)));
        }
        if !self.extinction_factor.is_finite() || self.extinction_factor < 0.0 {
            return Err(
                SirError::invalid(
                    format!("extinction factor has to be non-negative, got {}", self.extinction_factor)
                )
            );
        }
        if let Some(t_max) = self.horizon {
            if !t_max.is_finite() || t_max < 0.0 {
                return Err(SirError::invalid(format!("horizon has to be finite and non-negative, got {t_max}")));
            }
        }
        Ok(())
    }

    /// seeds of the repetitions, independent of the number of threads
    pub fn repetition_seeds(&self) -> Vec<u64>
    {
        let mut rng = Pcg64::seed_from_u64(self.sir_seed);
        (0..self.repetitions)
            .map(|_| rng.next_u64())
            .collect()
    }

    pub fn is_premature_extinction(&self, peak_infected: usize) -> bool
    {
        peak_infected as f64 <= self.extinction_factor * self.initial_infected as f64
    }

    /// One complete run on `network`
    pub fn run_repetition<N>(&self, network: N, seed: u64) -> Result<RunOutcome, SirError>
    where N: ContactNetwork
    {
        let mut engine = GillespieEngine::new(
            network,
            self.tau,
            self.gamma,
            self.initial_infected,
            seed
        )?;
        engine.run(self.horizon)?;
        let (_, _, r) = engine.counts();
        Ok(
            RunOutcome{
                table: engine.resample(self.dt)?,
                peak_infected: engine.peak_infected(),
                final_recovered: r,
                events: engine.trajectory().event_count()
            }
        )
    }

    /// # Run all repetitions in the current rayon pool
    /// * `network_for` is asked for the network of each repetition
    /// * averaging starts only after every repetition is done
    pub fn run<N, F>(&self, network_for: F, bar: Option<&ProgressBar>) -> Result<AveragedCurves, SirError>
    where N: ContactNetwork,
        F: Fn(usize) -> Result<N, SirError> + Sync
    {
        self.validate()?;
        let seeds = self.repetition_seeds();

        let outcomes: Vec<RunOutcome> = seeds.into_par_iter()
            .enumerate()
            .map(
                |(repetition, seed)| -> Result<RunOutcome, SirError>
                {
                    let network = network_for(repetition)?;
                    let outcome = self.run_repetition(network, seed)?;
                    debug!(
                        "repetition {} finished after {} events, peak {}",
                        repetition,
                        outcome.events,
                        outcome.peak_infected
                    );
                    if let Some(bar) = bar {
                        bar.inc(1);
                    }
                    Ok(outcome)
                }
            ).collect::<Result<_, SirError>>()?;

        Ok(self.combine(outcomes))
    }

    /// discard premature extinctions, average and trim the rest
    pub fn combine(&self, outcomes: Vec<RunOutcome>) -> AveragedCurves
    {
        let total = outcomes.len();
        let survivors: Vec<_> = outcomes.into_iter()
            .filter(|o| !self.is_premature_extinction(o.peak_infected))
            .collect();
        let discarded = total - survivors.len();

        if survivors.is_empty() {
            warn!("all {} repetitions died out prematurely, nothing to average", total);
            return AveragedCurves{
                table: SirTable{dt: self.dt, rows: Vec::new()},
                survivors: 0,
                discarded,
                final_size: None,
                peak_infected: None
            };
        }

        let final_sizes: Vec<_> = survivors.iter().map(|o| o.final_recovered).collect();
        let peaks: Vec<_> = survivors.iter().map(|o| o.peak_infected).collect();
        let final_size = MyVariance::from_slice(&final_sizes, None);
        let peak_infected = MyVariance::from_slice(&peaks, None);

        let tables: Vec<_> = survivors.into_iter().map(|o| o.table).collect();
        let mut table = average_tables(&tables, self.dt);
        if let Some(t_max) = self.horizon {
            truncate_at_horizon(&mut table, t_max);
        }
        let table = trim_dead_time(table);

        info!(
            "{} of {} repetitions survived, final size {:.3} (var {:.3}), peak {:.3} (var {:.3})",
            tables.len(),
            total,
            final_size.mean(),
            final_size.variance(),
            peak_infected.mean(),
            peak_infected.variance()
        );

        AveragedCurves{
            table,
            survivors: tables.len(),
            discarded,
            final_size: Some(final_size),
            peak_infected: Some(peak_infected)
        }
    }
}

/// # Elementwise mean of tables on the same grid
/// * shorter tables are continued with their last row. This is exact only for
///   runs that ended by extinction, since they stay in that state.
///   A run stopped at a horizon with I > 0 would keep evolving, so
///   cut the result with `truncate_at_horizon` in that case
pub fn average_tables(tables: &[SirTable], dt: f64) -> SirTable
{
    let len = tables.iter().map(SirTable::len).max().unwrap_or(0);
    let grid = TimeGrid::with_len(dt, len);
    let mut rows: Vec<SirRow> = grid.iter()
        .map(|t| SirRow{t, ..SirRow::default()})
        .collect();

    for table in tables.iter().filter(|t| !t.is_empty()) {
        let padding = std::iter::repeat(table.rows[table.len() - 1]);
        for (sum, row) in rows.iter_mut().zip(table.rows.iter().copied().chain(padding)) {
            sum.s += row.s;
            sum.i += row.i;
            sum.r += row.r;
        }
    }

    let count = tables.len() as f64;
    if count > 0.0 {
        rows.iter_mut()
            .for_each(
                |row|
                {
                    row.s /= count;
                    row.i /= count;
                    row.r /= count;
                }
            );
    }
    SirTable{dt, rows}
}

/// # Keep only grid points `<= t_max`
/// * every run reaches `t_max` unless it went extinct before, so no row
///   left over comes from padding a run that was still active
pub fn truncate_at_horizon(table: &mut SirTable, t_max: f64)
{
    if let Ok(grid) = TimeGrid::new(table.dt, t_max) {
        table.rows.truncate(grid.len());
    }
}

/// cut everything after the first row where R reaches its maximum
pub fn trim_dead_time(mut table: SirTable) -> SirTable
{
    let mut max_index = 0;
    for (index, row) in table.rows.iter().enumerate() {
        if row.r > table.rows[max_index].r {
            max_index = index;
        }
    }
    table.rows.truncate(max_index + 1);
    table
}
