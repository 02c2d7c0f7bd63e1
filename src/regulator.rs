use crate::cost::{CostModel, CostWeights};
use crate::error::{RegulatorError, Result};
use crate::linearize::Perturbation;
use crate::model::{Model, ModelKind};
use crate::prelude::*;
use crate::riccati::{solve_linear, solve_nonlinear, RiccatiSolution};

/// Finite-horizon LQR controller around a single model.
///
/// Linear models are solved with their exact Jacobians; anything else is re-linearized by
/// finite differences at every step of the backward pass. Which of the two happens is
/// decided once, when the regulator is built.
#[derive(Debug, Clone)]
pub struct Regulator<T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize> {
	model: Mdl,
	kind: ModelKind,
	cost: CostModel<T, N, M>,
	horizon: T,
	target: Vector<T, N>,
	perturbation: Perturbation<T>,
}

impl<T: Scalar, Mdl: Model<T, N, M>, const N: usize, const M: usize> Regulator<T, Mdl, N, M> {
	pub fn new(model: Mdl, weights: &CostWeights<T>, horizon: T) -> Result<Self> {
		Self::with_cost_model(model, CostModel::new(weights)?, horizon)
	}

	pub fn with_cost_model(model: Mdl, cost: CostModel<T, N, M>, horizon: T) -> Result<Self> {
		if !(horizon > T::zero()) || !horizon.is_finite() {
			return Err(RegulatorError::InvalidHorizon {
				horizon: to_f64(horizon),
			});
		}
		Ok(Regulator {
			kind: model.kind(),
			model,
			cost,
			horizon,
			target: Vector::<T, N>::zeros(),
			perturbation: Perturbation::default(),
		})
	}

	/// Overrides the finite-difference steps used for nonlinear models.
	pub fn with_perturbation(mut self, dx: T, du: T) -> Result<Self> {
		self.perturbation = Perturbation::new(dx, du)?;
		Ok(self)
	}

	pub fn set_target(&mut self, target: Vector<T, N>) {
		self.model.set_target(&target);
		self.target = target;
	}

	pub fn target(&self) -> &Vector<T, N> {
		&self.target
	}

	pub fn model(&self) -> &Mdl {
		&self.model
	}

	/// Mutable access for the caller's simulation loop. Targets should still go through
	/// [`Regulator::set_target`] so both copies stay in sync.
	pub fn model_mut(&mut self) -> &mut Mdl {
		&mut self.model
	}

	pub fn kind(&self) -> ModelKind {
		self.kind
	}

	pub fn cost(&self) -> &CostModel<T, N, M> {
		&self.cost
	}

	pub fn horizon(&self) -> T {
		self.horizon
	}

	pub fn perturbation(&self) -> &Perturbation<T> {
		&self.perturbation
	}

	/// Optimal action for the current step.
	pub fn compute_action(&self, state: &Vector<T, N>, dt: T) -> Result<Vector<T, M>> {
		self.solve(state, dt).map(|solution| solution.action)
	}

	/// Like [`Regulator::compute_action`], but also hands back the gain trajectory.
	pub fn solve(&self, state: &Vector<T, N>, dt: T) -> Result<RiccatiSolution<T, N, M>> {
		match self.kind {
			ModelKind::Linear => self.solve_linear(dt),
			ModelKind::Nonlinear => self.solve_nonlinear(state, dt),
		}
	}

	pub fn solve_linear(&self, dt: T) -> Result<RiccatiSolution<T, N, M>> {
		if self.kind != ModelKind::Linear {
			return Err(RegulatorError::CapabilityMismatch);
		}
		solve_linear(&self.model, &self.cost, &self.target, self.horizon, dt)
	}

	pub fn solve_nonlinear(
		&self,
		state: &Vector<T, N>,
		dt: T,
	) -> Result<RiccatiSolution<T, N, M>> {
		solve_nonlinear(
			&self.model,
			&self.cost,
			&self.target,
			self.horizon,
			&self.perturbation,
			state,
			dt,
		)
	}
}
