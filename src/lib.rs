//! Finite-horizon linear quadratic regulation by backward integration of the
//! differential Riccati equation, for models with exact or finite-difference Jacobians.

mod cost;
mod error;
mod linear;
mod linearize;
mod model;
mod prelude;
mod regulator;
mod riccati;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub use cost::{CostModel, CostWeights};
pub use error::{RegulatorError, Result};
pub use linear::LinearDynamics;
pub use linearize::{linearize, Perturbation};
pub use model::{Model, ModelKind};
pub use prelude::*;
pub use regulator::Regulator;
pub use riccati::{
	horizon_steps, riccati_backstep, solve_linear, solve_nonlinear, RiccatiSolution,
};
