use std::ops::Deref;

use crate::error::{RegulatorError, Result};
use crate::linear::LinearDynamics;
use crate::model::Model;
use crate::prelude::*;

/// Central-difference step sizes for the state (`dx`) and the action (`du`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation<T> {
	pub dx: T,
	pub du: T,
}

impl<T: Scalar> Perturbation<T> {
	pub fn new(dx: T, du: T) -> Result<Self> {
		let valid = |h: T| h > T::zero() && h.is_finite();
		if !valid(dx) || !valid(du) {
			return Err(RegulatorError::InvalidPerturbation {
				dx: to_f64(dx),
				du: to_f64(du),
			});
		}
		Ok(Perturbation { dx, du })
	}
}

impl<T: Scalar> Default for Perturbation<T> {
	fn default() -> Self {
		let h = T::from_subset(&0.1);
		Perturbation { dx: h, du: h }
	}
}

/// Offsets one state component of a model and puts the original value back on drop.
struct PerturbedState<'a, T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize> {
	model: &'a mut Mdl,
	index: usize,
	original: T,
}

impl<'a, T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize>
	PerturbedState<'a, T, Mdl, N, M>
{
	fn new(model: &'a mut Mdl, index: usize, delta: T) -> Self {
		let original = model.state()[index];
		model.state_mut()[index] = original + delta;
		PerturbedState {
			model,
			index,
			original,
		}
	}
}

impl<'a, T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize> Deref
	for PerturbedState<'a, T, Mdl, N, M>
{
	type Target = Mdl;

	fn deref(&self) -> &Mdl {
		&*self.model
	}
}

impl<'a, T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize> Drop
	for PerturbedState<'a, T, Mdl, N, M>
{
	fn drop(&mut self) {
		self.model.state_mut()[self.index] = self.original;
	}
}

/// Estimates the Jacobians of the one-step update `x + f(u) * dt` by central differences.
///
/// The update is anchored at the unperturbed state, so only `f` sees the offsets and the
/// result approximates `dt * df/dx` and `dt * df/du`. The model's state is perturbed one
/// component at a time and restored exactly before this returns; `action` is never
/// modified.
pub fn linearize<T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize>(
	model: &mut Mdl,
	action: &Vector<T, M>,
	dx: T,
	du: T,
	dt: T,
) -> LinearDynamics<T, N, M> {
	let two = T::one() + T::one();
	let x0 = *model.state();

	let mut a = Matrix::<T, N, N>::zeros();
	for i in 0..N {
		let forward = {
			let perturbed = PerturbedState::new(model, i, dx);
			x0 + perturbed.f(action) * dt
		};
		let backward = {
			let perturbed = PerturbedState::new(model, i, -dx);
			x0 + perturbed.f(action) * dt
		};
		a.set_column(i, &((forward - backward) / (two * dx)));
	}

	let mut b = Matrix::<T, N, M>::zeros();
	for j in 0..M {
		let mut u = *action;
		u[j] += du;
		let forward = x0 + model.f(&u) * dt;

		let mut u = *action;
		u[j] -= du;
		let backward = x0 + model.f(&u) * dt;

		b.set_column(j, &((forward - backward) / (two * du)));
	}

	LinearDynamics { a, b }
}
