use crate::error::SirError;

/// grid points closer than this (in units of dt) to the end are still included
const END_TOLERANCE: f64 = 1e-9;

/// # Evenly spaced time points `0, dt, 2dt, …, <= end`
/// * points are computed as `k * dt`, so no error accumulates along the grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid
{
    dt: f64,
    len: usize
}

impl TimeGrid
{
    pub fn new(dt: f64, end: f64) -> Result<Self, SirError>
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SirError::invalid(format!("dt has to be finite and positive, got {dt}")));
        }
        if !end.is_finite() || end < 0.0 {
            return Err(SirError::invalid(format!("grid end has to be finite and non-negative, got {end}")));
        }
        let steps = (end / dt + END_TOLERANCE).floor();
        if steps >= usize::MAX as f64 {
            return Err(SirError::invalid(format!("dt {dt} is too small for a grid up to {end}")));
        }
        Ok(
            Self{
                dt,
                len: steps as usize + 1
            }
        )
    }

    /// grid with exactly `len` points
    pub fn with_len(dt: f64, len: usize) -> Self
    {
        Self{dt, len}
    }

    pub fn dt(&self) -> f64
    {
        self.dt
    }

    pub fn len(&self) -> usize
    {
        self.len
    }

    pub fn is_empty(&self) -> bool
    {
        self.len == 0
    }

    #[inline]
    pub fn point(&self, k: usize) -> f64
    {
        k as f64 * self.dt
    }

    pub fn iter(&self) -> impl Iterator<Item = f64>
    {
        let dt = self.dt;
        (0..self.len).map(move |k| k as f64 * dt)
    }
}

#[cfg(test)]
mod testing
{
    use super::*;

    #[test]
    fn iter_test()
    {
        let grid = TimeGrid::new(0.5, 0.9).unwrap();
        let mut iter = grid.iter();
        assert_eq!(Some(0.0), iter.next());
        assert_eq!(Some(0.5), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn end_point_survives_rounding()
    {
        // 0.9 / 0.1 is slightly below 9 in floating point
        let grid = TimeGrid::new(0.1, 0.9).unwrap();
        assert_eq!(grid.len(), 10);
        assert!((grid.point(9) - 0.9).abs() < 1e-12);

        assert_eq!(TimeGrid::new(1.0, 0.0).unwrap().len(), 1);
    }

    #[test]
    fn invalid_grids()
    {
        assert!(TimeGrid::new(0.0, 1.0).is_err());
        assert!(TimeGrid::new(-0.1, 1.0).is_err());
        assert!(TimeGrid::new(f64::NAN, 1.0).is_err());
        assert!(TimeGrid::new(0.1, f64::INFINITY).is_err());
    }
}
