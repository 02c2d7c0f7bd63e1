use crate::prelude::*;

/// A pair of Jacobians, `a` with respect to the state and `b` with respect to the action.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LinearDynamics<T: Scalar, const N: usize, const M: usize> {
	pub a: Matrix<T, N, N>,
	pub b: Matrix<T, N, M>,
}

impl<T: Scalar, const N: usize, const M: usize> LinearDynamics<T, N, M> {
	/// Evaluates `a * x + b * u`.
	pub fn derivative(&self, x: &Vector<T, N>, u: &Vector<T, M>) -> Vector<T, N> {
		&self.a * x + &self.b * u
	}

	pub fn scaled(&self, factor: T) -> Self {
		LinearDynamics {
			a: self.a * factor,
			b: self.b * factor,
		}
	}
}
