use crate::linear::LinearDynamics;
use crate::prelude::*;

/// Whether a model can hand out its exact Jacobians.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
	Linear,
	Nonlinear,
}

/// A continuous-time dynamical system `x' = f(x, u)` with its state stored inline.
///
/// The regulator only reads the state, except during linearization where single
/// components are perturbed and then restored. Models must be cheap enough to clone
/// once per nonlinear solve.
pub trait Model<T: Scalar, const N: usize, const M: usize>: Clone {
	fn state(&self) -> &Vector<T, N>;

	fn state_mut(&mut self) -> &mut Vector<T, N>;

	/// Time derivative of the state under `action`.
	fn f(&self, action: &Vector<T, M>) -> Vector<T, N>;

	fn set_target(&mut self, _target: &Vector<T, N>) {}

	fn kind(&self) -> ModelKind {
		ModelKind::Nonlinear
	}

	/// Exact `A`, `B`. Only meaningful for [`ModelKind::Linear`] models.
	fn jacobians(&self) -> Option<LinearDynamics<T, N, M>> {
		None
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;
	use nalgebra::{matrix, vector};

	/// Linear plant `x' = A x + B u`, reporting itself as linear or not on request.
	#[derive(Debug, Clone)]
	pub struct LinearPlant<const N: usize, const M: usize> {
		pub dynamics: LinearDynamics<f64, N, M>,
		pub state: Vector<f64, N>,
		pub target: Vector<f64, N>,
		pub kind: ModelKind,
	}

	impl<const N: usize, const M: usize> LinearPlant<N, M> {
		pub fn new(dynamics: LinearDynamics<f64, N, M>, state: Vector<f64, N>) -> Self {
			LinearPlant {
				dynamics,
				state,
				target: Vector::<f64, N>::zeros(),
				kind: ModelKind::Linear,
			}
		}

		pub fn opaque(self) -> Self {
			LinearPlant {
				kind: ModelKind::Nonlinear,
				..self
			}
		}
	}

	impl<const N: usize, const M: usize> Model<f64, N, M> for LinearPlant<N, M> {
		fn state(&self) -> &Vector<f64, N> {
			&self.state
		}

		fn state_mut(&mut self) -> &mut Vector<f64, N> {
			&mut self.state
		}

		fn f(&self, action: &Vector<f64, M>) -> Vector<f64, N> {
			self.dynamics.derivative(&self.state, action)
		}

		fn set_target(&mut self, target: &Vector<f64, N>) {
			self.target = *target;
		}

		fn kind(&self) -> ModelKind {
			self.kind
		}

		fn jacobians(&self) -> Option<LinearDynamics<f64, N, M>> {
			match self.kind {
				ModelKind::Linear => Some(self.dynamics),
				ModelKind::Nonlinear => None,
			}
		}
	}

	pub fn double_integrator(state: Vector<f64, 2>) -> LinearPlant<2, 1> {
		let dynamics = LinearDynamics {
			a: matrix![0.0, 1.0; 0.0, 0.0],
			b: matrix![0.0; 1.0],
		};
		LinearPlant::new(dynamics, state)
	}

	/// Torque-driven pendulum, `theta'' = -(g / l) sin(theta) + u`.
	#[derive(Debug, Clone)]
	pub struct Pendulum {
		pub g_over_l: f64,
		pub state: Vector<f64, 2>,
	}

	impl Pendulum {
		pub fn new(theta: f64, omega: f64) -> Self {
			Pendulum {
				g_over_l: 9.81,
				state: vector![theta, omega],
			}
		}

		pub fn exact_jacobians(&self) -> LinearDynamics<f64, 2, 1> {
			LinearDynamics {
				a: matrix![0.0, 1.0; -self.g_over_l * self.state[0].cos(), 0.0],
				b: matrix![0.0; 1.0],
			}
		}
	}

	impl Model<f64, 2, 1> for Pendulum {
		fn state(&self) -> &Vector<f64, 2> {
			&self.state
		}

		fn state_mut(&mut self) -> &mut Vector<f64, 2> {
			&mut self.state
		}

		fn f(&self, action: &Vector<f64, 1>) -> Vector<f64, 2> {
			vector![
				self.state[1],
				-self.g_over_l * self.state[0].sin() + action[0]
			]
		}
	}
}
