// Inferential statistics: correlation significance, t-tests and F-tests

use log::warn;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::error::{Error, Result};
use crate::stats::descriptive::{mean, variance};
use crate::stats::{CorrelationResult, FTestResult, TTestResult};

/// Two-sided p-value of a t statistic with `df` degrees of freedom
fn t_two_sided_pvalue(t: f64, df: f64) -> f64 {
    if t.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

/// Upper-tail probability of an F statistic
fn f_upper_tail(f: f64, df1: f64, df2: f64) -> f64 {
    if f.is_nan() {
        return f64::NAN;
    }
    if f.is_infinite() {
        return 0.0;
    }
    match FisherSnedecor::new(df1, df2) {
        Ok(dist) => dist.sf(f),
        Err(_) => f64::NAN,
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Centered cross and square sums of two samples
fn centered_sums(x: &[f64], y: &[f64]) -> (f64, f64, f64) {
    let mean_x = mean(x);
    let mean_y = mean(y);

    x.iter()
        .zip(y.iter())
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (&xi, &yi)| {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
        })
}

/// Internal implementation of `stats::pearson`
pub(crate) fn pearson_impl(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    check_lengths(x, y)?;

    let n = x.len();
    if n < 2 {
        return Err(Error::InsufficientData(
            "correlation needs at least two observations".into(),
        ));
    }

    let (sxy, sxx, syy) = centered_sums(x, y);
    if sxx == 0.0 || syy == 0.0 {
        warn!("pearson: constant input, correlation is undefined");
        return Ok(CorrelationResult {
            r: f64::NAN,
            p_value: f64::NAN,
            n,
        });
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    let p_value = if n == 2 {
        1.0
    } else if r.abs() == 1.0 {
        0.0
    } else {
        let df = (n - 2) as f64;
        let t = r * (df / (1.0 - r * r)).sqrt();
        t_two_sided_pvalue(t, df)
    };

    Ok(CorrelationResult { r, p_value, n })
}

/// Internal implementation of `stats::ttest_1samp`
pub(crate) fn ttest_1samp_impl(sample: &[f64], popmean: f64) -> TTestResult {
    let n = sample.len();
    if n < 2 {
        return TTestResult {
            statistic: f64::NAN,
            pvalue: f64::NAN,
            df: n.saturating_sub(1),
        };
    }

    let std_err = (variance(sample) / n as f64).sqrt();
    // zero spread gives +-inf (p = 0) or NaN when the mean equals popmean
    let statistic = (mean(sample) - popmean) / std_err;
    let df = n - 1;

    TTestResult {
        statistic,
        pvalue: t_two_sided_pvalue(statistic, df as f64),
        df,
    }
}

/// Internal implementation of `stats::f_regression`
pub(crate) fn f_regression_impl(x: &[f64], y: &[f64]) -> Result<FTestResult> {
    check_lengths(x, y)?;

    let n = x.len();
    if n < 3 {
        return Err(Error::InsufficientData(
            "F-test needs at least three observations".into(),
        ));
    }

    let (sxy, sxx, syy) = centered_sums(x, y);
    let corr = sxy / (sxx.sqrt() * syy.sqrt());
    let corr2 = corr * corr;
    let dof = (n - 2) as f64;

    let f_statistic = if corr2 >= 1.0 {
        f64::INFINITY
    } else {
        corr2 / (1.0 - corr2) * dof
    };

    Ok(FTestResult {
        f_statistic,
        p_value: f_upper_tail(f_statistic, 1.0, dof),
    })
}
