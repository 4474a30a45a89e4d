//! Hypothesis tests for whether the coin flip behaves like a fair 50/50
//! process. Both tests are pure functions of the observed counts and require
//! at least one trial; callers guard the zero-match case.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessTest {
    pub chi2_statistic: f64,
    pub p_value: f64,
    pub is_fair: bool,
}

/// Pearson chi-square goodness-of-fit of the observed win/lose split against
/// an even split. One degree of freedom; the coin is called fair when
/// p > 0.05.
pub fn chi_square_test(coin_wins: u32, total_matches: u32) -> FairnessTest {
    debug_assert!(total_matches > 0);
    debug_assert!(coin_wins <= total_matches);

    let expected = f64::from(total_matches) * 0.5;
    let observed = [
        f64::from(coin_wins),
        f64::from(total_matches - coin_wins),
    ];
    let chi2_statistic: f64 = observed
        .iter()
        .map(|obs| (obs - expected).powi(2) / expected)
        .sum();
    let p_value = chi2_survival_1df(chi2_statistic);

    FairnessTest {
        chi2_statistic,
        p_value,
        is_fair: p_value > 0.05,
    }
}

/// Exact two-sided binomial test of `successes` in `trials` against p = 0.5:
/// the summed probability of every outcome no more likely than the observed
/// one.
pub fn binom_test(successes: u32, trials: u32) -> f64 {
    debug_assert!(trials > 0);
    debug_assert!(successes <= trials);

    let ln_observed = ln_binom_pmf(successes, trials);
    // small tolerance so outcomes tied with the observed pmf are included
    let cutoff = ln_observed + 1e-7;

    let mut p = 0.0;
    for k in 0..=trials {
        let ln_p = ln_binom_pmf(k, trials);
        if ln_p <= cutoff {
            p += ln_p.exp();
        }
    }
    p.min(1.0)
}

/// Survival function of the chi-square distribution with one degree of
/// freedom: P(X > x) = erfc(sqrt(x / 2)). The erfc approximation can
/// overshoot 1.0 marginally near zero, so the result is clamped.
fn chi2_survival_1df(x: f64) -> f64 {
    erfc((x / 2.0).sqrt()).min(1.0)
}

/// ln P(K = k) for K ~ Binomial(n, 0.5).
fn ln_binom_pmf(k: u32, n: u32) -> f64 {
    ln_choose(n, k) + f64::from(n) * 0.5f64.ln()
}

fn ln_choose(n: u32, k: u32) -> f64 {
    ln_gamma(f64::from(n) + 1.0) - ln_gamma(f64::from(k) + 1.0) - ln_gamma(f64::from(n - k) + 1.0)
}

/// Lanczos approximation of ln Γ(x), valid for x > 0.
fn ln_gamma(x: f64) -> f64 {
    const COEF: [f64; 6] = [
        76.18009172947146,
        -86.50532032941677,
        24.01409824083091,
        -1.231739572450155,
        0.1208650973866179e-2,
        -0.5395239384953e-5,
    ];

    let tmp = x + 5.5;
    let tmp = (x + 0.5) * tmp.ln() - tmp;
    let mut y = x;
    let mut ser = 1.000000000190015;
    for c in COEF {
        y += 1.0;
        ser += c / y;
    }
    tmp + (2.5066282746310005 * ser / x).ln()
}

/// Complementary error function, rational approximation accurate to ~1.2e-7.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let ans = t
        * (-z * z - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587
                                        + t * (-0.82215223 + t * 0.17087277)))))))))
            .exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}
