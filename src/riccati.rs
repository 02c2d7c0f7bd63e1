use num_traits::ToPrimitive;

use crate::cost::CostModel;
use crate::error::{RegulatorError, Result};
use crate::linear::LinearDynamics;
use crate::linearize::{linearize, Perturbation};
use crate::model::{Model, ModelKind};
use crate::prelude::*;

/// Gains for every step of the horizon and the action derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct RiccatiSolution<T: Scalar, const N: usize, const M: usize> {
	/// `gains[0]` belongs to the current time, the last entry to the end of the horizon.
	pub gains: Vec<Matrix<T, N, N>>,
	pub action: Vector<T, M>,
}

/// Number of steps `ceil(horizon / dt)` the horizon is discretized into.
pub fn horizon_steps<T: Scalar>(horizon: T, dt: T) -> Result<usize> {
	if !(horizon > T::zero()) || !horizon.is_finite() {
		return Err(RegulatorError::InvalidHorizon {
			horizon: to_f64(horizon),
		});
	}
	if !(dt > T::zero()) || !dt.is_finite() {
		return Err(RegulatorError::InvalidTimeStep { dt: to_f64(dt) });
	}
	match (horizon / dt).ceil().to_usize() {
		Some(steps) if steps >= 1 => Ok(steps),
		_ => Err(RegulatorError::InvalidTimeStep { dt: to_f64(dt) }),
	}
}

/// One explicit Euler step of the differential Riccati equation, backward in time:
///
/// `K + dt * (K B R^-1 B' K + K A + A' K - Q)`
pub fn riccati_backstep<T: Scalar, const N: usize, const M: usize>(
	k: &Matrix<T, N, N>,
	dynamics: &LinearDynamics<T, N, M>,
	cost: &CostModel<T, N, M>,
	dt: T,
) -> Matrix<T, N, N> {
	let LinearDynamics { a, b } = dynamics;
	let quadratic = k * b * cost.inv_control() * b.tr_mul(k);
	k + (quadratic + k * a + a.tr_mul(k) - cost.state()) * dt
}

fn feedback<T: Scalar, const N: usize, const M: usize>(
	k: &Matrix<T, N, N>,
	b: &Matrix<T, N, M>,
	cost: &CostModel<T, N, M>,
	error: &Vector<T, N>,
) -> Vector<T, M> {
	cost.inv_control() * b.tr_mul(&(k * error))
}

/// Integrates the Riccati equation with the model's exact, time-invariant `A` and `B`.
///
/// The action is evaluated at the model's own state.
pub fn solve_linear<T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize>(
	model: &Mdl,
	cost: &CostModel<T, N, M>,
	target: &Vector<T, N>,
	horizon: T,
	dt: T,
) -> Result<RiccatiSolution<T, N, M>> {
	let steps = horizon_steps(horizon, dt)?;
	if model.kind() != ModelKind::Linear {
		return Err(RegulatorError::CapabilityMismatch);
	}
	let dynamics = model
		.jacobians()
		.ok_or(RegulatorError::CapabilityMismatch)?;

	let mut gains = Vec::with_capacity(steps);
	let mut k = -cost.end_state();
	for _ in 1..steps {
		let previous = riccati_backstep(&k, &dynamics, cost, dt);
		gains.push(k);
		k = previous;
	}
	gains.push(k);
	gains.reverse();

	let action = feedback(&gains[0], &dynamics.b, cost, &(model.state() - target));
	Ok(RiccatiSolution { gains, action })
}

/// Integrates the Riccati equation, re-linearizing a private copy of the model at every step.
///
/// Each step linearizes around the current action estimate, refreshes that estimate from
/// the more terminal gain `K[t]` and `state`, and only then steps to `K[t-1]`. The returned
/// action is the estimate from the final step, so it is built from `K[1]` rather than
/// `K[0]`, and is zero when the horizon is a single step.
pub fn solve_nonlinear<T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize>(
	model: &Mdl,
	cost: &CostModel<T, N, M>,
	target: &Vector<T, N>,
	horizon: T,
	perturbation: &Perturbation<T>,
	state: &Vector<T, N>,
	dt: T,
) -> Result<RiccatiSolution<T, N, M>> {
	let steps = horizon_steps(horizon, dt)?;

	let mut model = model.clone();
	let error = state - target;
	let mut action = Vector::<T, M>::zeros();

	let mut gains = Vec::with_capacity(steps);
	let mut k = -cost.end_state();
	for _ in 1..steps {
		let dynamics = linearize(
			&mut model,
			&action,
			perturbation.dx,
			perturbation.du,
			dt,
		);
		action = feedback(&k, &dynamics.b, cost, &error);
		let previous = riccati_backstep(&k, &dynamics, cost, dt);
		gains.push(k);
		k = previous;
	}
	gains.push(k);
	gains.reverse();

	Ok(RiccatiSolution { gains, action })
}
