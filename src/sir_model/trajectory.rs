use {
    serde::{Serialize, Deserialize},
    crate::{error::SirError, grid::TimeGrid},
};

/// # Event time series
/// * one entry per accepted event, plus the initial condition at t = 0
/// * time is strictly increasing, `s + i + r` is constant
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory{
    t: Vec<f64>,
    s: Vec<usize>,
    i: Vec<usize>,
    r: Vec<usize>,
}

impl Trajectory{
    pub fn new(s: usize, i: usize, r: usize) -> Self
    {
        Self{
            t: vec![0.0],
            s: vec![s],
            i: vec![i],
            r: vec![r]
        }
    }

    /// Build from raw columns. Checks time order, conservation and equal lengths
    pub fn from_columns(t: Vec<f64>, s: Vec<usize>, i: Vec<usize>, r: Vec<usize>) -> Result<Self, SirError>
    {
        if t.is_empty() || t.len() != s.len() || t.len() != i.len() || t.len() != r.len() {
            return Err(SirError::invalid("trajectory columns need equal, non-zero length"));
        }
        if t.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SirError::invalid("trajectory times have to increase strictly"));
        }
        let n = s[0] + i[0] + r[0];
        if s.iter().zip(i.iter()).zip(r.iter()).any(|((s, i), r)| s + i + r != n) {
            return Err(SirError::invalid("trajectory does not conserve the population"));
        }
        Ok(Self{t, s, i, r})
    }

    pub fn clear(&mut self, s: usize, i: usize, r: usize)
    {
        self.t.clear();
        self.s.clear();
        self.i.clear();
        self.r.clear();
        self.push(0.0, s, i, r);
    }

    #[inline]
    pub fn push(&mut self, t: f64, s: usize, i: usize, r: usize)
    {
        debug_assert!(self.t.last().map_or(true, |&last| t > last));
        self.t.push(t);
        self.s.push(s);
        self.i.push(i);
        self.r.push(r);
    }

    pub fn len(&self) -> usize
    {
        self.t.len()
    }

    /// number of events after the initial state
    pub fn event_count(&self) -> usize
    {
        self.t.len().saturating_sub(1)
    }

    pub fn time(&self) -> &[f64]
    {
        &self.t
    }

    pub fn susceptible(&self) -> &[usize]
    {
        &self.s
    }

    pub fn infected(&self) -> &[usize]
    {
        &self.i
    }

    pub fn recovered(&self) -> &[usize]
    {
        &self.r
    }

    pub fn final_time(&self) -> f64
    {
        self.t.last().copied().unwrap_or(0.0)
    }

    pub fn peak_infected(&self) -> usize
    {
        self.i.iter().copied().max().unwrap_or(0)
    }

    pub fn row(&self, index: usize) -> SirRow
    {
        SirRow{
            t: self.t[index],
            s: self.s[index] as f64,
            i: self.i[index] as f64,
            r: self.r[index] as f64
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = SirRow> + '_
    {
        (0..self.len()).map(|idx| self.row(idx))
    }

    /// # Digitize onto the grid `0, dt, 2dt, …`
    /// * the grid stops at the last event time
    /// * each grid point holds the last sample at or before it,
    ///   there is no interpolation
    pub fn resample(&self, dt: f64) -> Result<SirTable, SirError>
    {
        let grid = TimeGrid::new(dt, self.final_time())?;
        let mut rows = Vec::with_capacity(grid.len());
        let mut current = 0;
        for t in grid.iter() {
            while current + 1 < self.t.len() && self.t[current + 1] <= t {
                current += 1;
            }
            let mut row = self.row(current);
            row.t = t;
            rows.push(row);
        }
        Ok(SirTable{dt, rows})
    }
}

/// One line of an S I R table. Counts are floats so tables can be averaged
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SirRow{
    pub t: f64,
    pub s: f64,
    pub i: f64,
    pub r: f64,
}

/// S I R on an even time grid
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SirTable{
    pub dt: f64,
    pub rows: Vec<SirRow>,
}

impl SirTable{
    pub fn len(&self) -> usize
    {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&SirRow>
    {
        self.rows.last()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn three_events() -> Trajectory
    {
        Trajectory::from_columns(
            vec![0.0, 0.3, 0.9],
            vec![9, 8, 8],
            vec![1, 2, 1],
            vec![0, 0, 1]
        ).unwrap()
    }

    #[test]
    fn carries_last_value_forward()
    {
        let table = three_events().resample(0.5).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], SirRow{t: 0.0, s: 9.0, i: 1.0, r: 0.0});
        assert_eq!(table.rows[1], SirRow{t: 0.5, s: 8.0, i: 2.0, r: 0.0});
    }

    #[test]
    fn grid_hits_event_times()
    {
        let table = three_events().resample(0.3).unwrap();
        let t: Vec<_> = table.rows.iter().map(|r| r.t).collect();
        assert_eq!(t.len(), 4);
        assert_eq!(table.rows[1].i, 2.0);
        assert!((t[3] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn resampling_is_pure()
    {
        let traj = three_events();
        let copy = traj.clone();
        let a = traj.resample(0.1).unwrap();
        let b = traj.resample(0.1).unwrap();
        assert_eq!(a, b);
        assert_eq!(traj, copy);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn single_sample()
    {
        let traj = Trajectory::new(4, 1, 0);
        let table = traj.resample(1.0).unwrap();
        assert_eq!(table.rows, vec![SirRow{t: 0.0, s: 4.0, i: 1.0, r: 0.0}]);
        assert_eq!(traj.event_count(), 0);
        assert_eq!(three_events().event_count(), 2);
        assert_eq!(Trajectory::default().event_count(), 0);
    }

    #[test]
    fn invalid_input()
    {
        assert!(three_events().resample(0.0).is_err());
        assert!(three_events().resample(-1.0).is_err());
        assert!(Trajectory::from_columns(vec![0.0, 0.0], vec![1, 1], vec![0, 0], vec![0, 0]).is_err());
        assert!(Trajectory::from_columns(vec![0.0, 1.0], vec![1, 1], vec![0, 1], vec![0, 0]).is_err());
    }
}
