//all the methods of calculating averages and variances etc.

use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MyVariance
{
    pub mean: f64,
    pub var: f64
}

impl MyVariance{

    pub fn mean(&self) -> f64
    {
        self.mean
    }

    pub fn variance(&self) -> f64
    {
        self.var
    }

    /// standard error of the mean
    pub fn mean_err(&self, samples: usize) -> f64
    {
        if samples < 2 {
            return f64::NAN;
        }
        (self.var / (samples - 1) as f64).sqrt()
    }

    /// `frac` rescales every value, e.g. by the system size
    pub fn from_slice(slice: &[usize], frac: Option<f64>) -> Self
    {
        let mean = calc_average(slice, frac);
        let var = calc_variance(slice, mean, frac);
        Self{
            mean,
            var
        }
    }
}

/// NaN for an empty slice
pub fn calc_average(slice: &[usize], frac: Option<f64>) -> f64
{
    let sum: u128 = slice.iter().map(|&v| v as u128).sum();
    let len = slice.len() as u128;
    if len == 0 {
        return f64::NAN;
    }
    let rest = sum % len;
    let div = sum / len;

    let res = div as f64 + (rest as f64) / (len as f64);
    match frac{
        None => res,
        Some(f) => res / f
    }
}

pub fn calc_variance(slice: &[usize], average: f64, frac: Option<f64>) -> f64
{
    let f = frac.unwrap_or(1.0);
    let var_sum: f64 = slice.iter()
        .map(
            |&val|
            {
                let dif = average - val as f64 / f;
                dif * dif
            }
        ).sum();

    var_sum / slice.len() as f64
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn mean_and_variance()
    {
        let v = MyVariance::from_slice(&[2, 4, 4, 4, 5, 5, 7, 9], None);
        assert_eq!(v.mean(), 5.0);
        assert_eq!(v.variance(), 4.0);

        let frac = MyVariance::from_slice(&[2, 4], Some(2.0));
        assert_eq!(frac.mean(), 1.5);
        assert_eq!(frac.variance(), 0.25);

        assert!(MyVariance::from_slice(&[], None).mean().is_nan());

        // var 4 over 8 samples
        assert_eq!(v.mean_err(8), (4.0_f64 / 7.0).sqrt());
        assert!(v.mean_err(1).is_nan());
    }
}
