//! Two-sided Student's t critical values, for confidence intervals on the
//! mean of a small number of replications.

use std::f64::consts::PI;

/// Quantile function of the standard normal distribution, using Peter J.
/// Acklam's rational approximation (relative error below 1.2e-9).
fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_690e+02,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        let numerator = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let denominator = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        numerator / denominator
    };
    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - P_LOW {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    }
}

/// The critical value `t` with `P(|T| > t) = alpha` for `degrees_of_freedom`
/// degrees of freedom.  One and two degrees of freedom have closed forms;
/// otherwise a Cornish-Fisher expansion around the normal quantile is used.
pub fn t_score(alpha: f64, degrees_of_freedom: usize) -> f64 {
    let p = 1.0 - alpha / 2.0;
    match degrees_of_freedom {
        0 => f64::INFINITY,
        1 => (PI * (p - 0.5)).tan(),
        2 => (2.0 * p - 1.0) / (2.0 * p * (1.0 - p)).sqrt(),
        _ => {
            let nu = degrees_of_freedom as f64;
            let z = inverse_normal_cdf(p);
            let z2 = z * z;
            let g1 = z * (z2 + 1.0) / 4.0;
            let g2 = z * ((5.0 * z2 + 16.0) * z2 + 3.0) / 96.0;
            let g3 = z * (((3.0 * z2 + 19.0) * z2 + 17.0) * z2 - 15.0) / 384.0;
            let g4 = z * ((((79.0 * z2 + 776.0) * z2 + 1482.0) * z2 - 1920.0) * z2 - 945.0)
                / 92160.0;
            z + g1 / nu + g2 / nu.powi(2) + g3 / nu.powi(3) + g4 / nu.powi(4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, relative_tolerance: f64) {
        assert!(
            (actual - expected).abs() / expected < relative_tolerance,
            "{} is not within {} of {}",
            actual,
            relative_tolerance,
            expected
        );
    }

    #[test]
    fn normal_quantiles_match_tables() {
        assert_close(inverse_normal_cdf(0.975), 1.959_964, 1.0e-6);
        assert_close(inverse_normal_cdf(0.995), 2.575_829, 1.0e-6);
        assert_close(-inverse_normal_cdf(0.01), 2.326_348, 1.0e-6);
    }

    #[test]
    fn closed_forms_match_tables() {
        assert_close(t_score(0.1, 1), 6.313_752, 1.0e-6);
        assert_close(t_score(0.05, 2), 4.302_653, 1.0e-6);
    }

    #[test]
    fn expansion_matches_tables() {
        assert_close(t_score(0.05, 9), 2.262_157, 1.0e-4);
        assert_close(t_score(0.05, 30), 2.042_272, 1.0e-4);
        assert_close(t_score(0.1, 5), 2.015_048, 1.0e-3);
        assert_close(t_score(0.01, 4), 4.604_095, 1.0e-2);
    }
}
