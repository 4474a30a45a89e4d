use duelstats_cli::fairness::{binom_test, chi_square_test};

#[test]
fn even_split_is_fair() {
    let t = chi_square_test(50, 100);
    assert!(t.chi2_statistic.abs() < 1e-12);
    // an exactly even split saturates the test; the p-value must still be a
    // probability, never above 1
    assert!(t.p_value <= 1.0, "p = {}", t.p_value);
    assert!((t.p_value - 1.0).abs() < 1e-6);
    assert!(t.is_fair);

    assert!((binom_test(50, 100) - 1.0).abs() < 1e-6);
}

#[test]
fn sixty_of_hundred_rejects_fairness() {
    let t = chi_square_test(60, 100);
    assert!((t.chi2_statistic - 4.0).abs() < 1e-12);
    // chi-square sf(4.0, 1 dof) = 0.04550
    assert!((t.p_value - 0.0455).abs() < 1e-3, "p = {}", t.p_value);
    assert!(!t.is_fair);

    // scipy binomtest(60, 100, 0.5).pvalue = 0.056888
    let p = binom_test(60, 100);
    assert!((p - 0.0569).abs() < 1e-3, "p = {p}");
}

#[test]
fn borderline_split_stays_fair() {
    // 55/100 is within noise: chi2 = 1.0, p = 0.3173
    let t = chi_square_test(55, 100);
    assert!((t.chi2_statistic - 1.0).abs() < 1e-12);
    assert!((t.p_value - 0.3173).abs() < 1e-3, "p = {}", t.p_value);
    assert!(t.is_fair);
}

#[test]
fn extreme_split_has_tiny_p_value() {
    let t = chi_square_test(20, 20);
    assert!((t.chi2_statistic - 20.0).abs() < 1e-12);
    assert!(t.p_value < 1e-4);
    assert!(!t.is_fair);

    // only the two most extreme outcomes qualify: 2 * (1/32)
    let p = binom_test(0, 5);
    assert!((p - 0.0625).abs() < 1e-9, "p = {p}");
}

#[test]
fn binom_test_is_symmetric_around_half() {
    let lo = binom_test(3, 10);
    let hi = binom_test(7, 10);
    assert!((lo - hi).abs() < 1e-9);
    // scipy binomtest(3, 10, 0.5).pvalue = 0.34375 exactly
    assert!((lo - 0.34375).abs() < 1e-6, "p = {lo}");
}

#[test]
fn p_values_stay_in_unit_interval() {
    for trials in [1u32, 2, 7, 20, 101, 250] {
        for successes in [0, trials / 2, trials] {
            let chi = chi_square_test(successes, trials);
            assert!((0.0..=1.0).contains(&chi.p_value));
            let p = binom_test(successes, trials);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
