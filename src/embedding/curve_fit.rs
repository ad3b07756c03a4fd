extern crate nalgebra as na;

use na::{DMatrix, DVector, Matrix2, Vector2};

use crate::Float;

const SAMPLE_COUNT: usize = 300;
const MAX_ITERATIONS: usize = 200;
const TAU: Float = 1e-3;
const STEP_EPS: Float = 1e-12;

/// Smooth approximation `1/(1 + a x^(2b))` of the target membership curve.
pub fn membership_curve(x: Float, a: Float, b: Float) -> Float {
    1.0/(1.0 + a*x.powf(2.0*b))
}

/// Fits `a` and `b` of `membership_curve` against a curve that is 1 below `min_dist`
/// and decays as `exp(-(x - min_dist)/spread)` above it, sampled on `[0, 3*spread]`.
pub fn find_ab_params(spread: Float, min_dist: Float) -> (Float,Float) {
    let end = 3.0*spread;
    let xs = DVector::<Float>::from_fn(SAMPLE_COUNT, |i,_| end*(i as Float)/((SAMPLE_COUNT-1) as Float));
    let ys = xs.map(|x| match x < min_dist {
        true => 1.0,
        false => (-(x - min_dist)/spread).exp()
    });

    let mut params = Vector2::<Float>::new(1.0,1.0);
    let mut residuals = compute_residuals(&xs, &ys, &params);
    let mut jacobian = compute_jacobian(&xs, &params);
    let mut cost = 0.5*residuals.norm_squared();
    let mut mu: Option<Float> = None;
    let mut nu = 2.0;

    for _ in 0..MAX_ITERATIONS {
        let (delta, mu_val, gain_ratio_denom) = match levenberg_marquardt_step(&residuals, &jacobian, mu) {
            Some(step) => step,
            None => break
        };

        let new_params = params + delta;
        let new_residuals = compute_residuals(&xs, &ys, &new_params);
        let new_cost = 0.5*new_residuals.norm_squared();
        let cost_diff = cost - new_cost;
        let gain_ratio = match gain_ratio_denom {
            v if v != 0.0 => cost_diff/v,
            _ => Float::NAN
        };

        if new_cost.is_finite() && !gain_ratio.is_nan() && gain_ratio > 0.0 {
            params = new_params;
            residuals = new_residuals;
            jacobian = compute_jacobian(&xs, &params);
            cost = new_cost;
            mu = Some(mu_val*Float::max(1.0/3.0, 1.0 - (2.0*gain_ratio - 1.0).powi(3)));
            nu = 2.0;
        } else {
            mu = Some(nu*mu_val);
            nu *= 2.0;
        }

        if delta.norm() < STEP_EPS*(params.norm() + STEP_EPS) || nu.is_infinite() {
            break;
        }
    }

    (params.x, params.y)
}

fn compute_residuals(xs: &DVector<Float>, ys: &DVector<Float>, params: &Vector2<Float>) -> DVector<Float> {
    DVector::<Float>::from_fn(xs.nrows(), |i,_| membership_curve(xs[i], params.x, params.y) - ys[i])
}

fn compute_jacobian(xs: &DVector<Float>, params: &Vector2<Float>) -> DMatrix<Float> {
    let (a, b) = (params.x, params.y);
    let mut jacobian = DMatrix::<Float>::zeros(xs.nrows(), 2);
    for (i, &x) in xs.iter().enumerate() {
        if x <= 0.0 {
            continue;
        }
        let u = x.powf(2.0*b);
        let denom = (1.0 + a*u).powi(2);
        jacobian[(i,0)] = -u/denom;
        jacobian[(i,1)] = -2.0*a*u*x.ln()/denom;
    }
    jacobian
}

/// Damped normal equations `(J^T J + mu I) h = -J^T r`. The first call derives mu from the
/// largest diagonal entry. Returns the step, the damping used and the predicted cost decrease.
fn levenberg_marquardt_step(residuals: &DVector<Float>, jacobian: &DMatrix<Float>, mu: Option<Float>) -> Option<(Vector2<Float>, Float, Float)> {
    let jt = jacobian.transpose();
    let a_dyn = &jt*jacobian;
    let g_dyn = &jt*residuals;
    let a = Matrix2::new(a_dyn[(0,0)], a_dyn[(0,1)], a_dyn[(1,0)], a_dyn[(1,1)]);
    let g = Vector2::new(g_dyn[0], g_dyn[1]);

    let mu_val = match mu {
        None => TAU*a.diagonal().max(),
        Some(v) => v
    };
    let h = (a + mu_val*Matrix2::identity()).lu().solve(&(-g))?;
    let gain_ratio_denom = 0.5*h.dot(&(mu_val*h - g));
    Some((h, mu_val, gain_ratio_denom))
}
