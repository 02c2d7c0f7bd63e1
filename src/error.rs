use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegulatorError>;

/// Errors raised while configuring or running a [`Regulator`](crate::Regulator).
///
/// All of them are configuration errors: nothing here is transient, and no partial
/// solution is ever returned alongside one.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RegulatorError {
	#[error("model does not expose exact linear dynamics")]
	CapabilityMismatch,

	#[error("control cost matrix is not invertible")]
	SingularControlCost,

	#[error("invalid {name} weight: {value} (must be >= 0)")]
	InvalidWeight { name: &'static str, value: f64 },

	#[error("invalid time step: {dt} (must be > 0 and yield at least one step)")]
	InvalidTimeStep { dt: f64 },

	#[error("invalid horizon: {horizon} (must be > 0)")]
	InvalidHorizon { horizon: f64 },

	#[error("invalid perturbation: dx={dx}, du={du} (both must be > 0)")]
	InvalidPerturbation { dx: f64, du: f64 },

	#[error("{what} dimension mismatch: expected {expected}, got {got}")]
	DimensionMismatch {
		what: &'static str,
		expected: usize,
		got: usize,
	},
}
