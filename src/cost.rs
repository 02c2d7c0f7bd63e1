use crate::error::{RegulatorError, Result};
use crate::prelude::*;

/// Scalar weights for the quadratic cost
/// `(x - r)' Q (x - r) + u' R u`, with `Qf` applied at the end of the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights<T> {
	pub state: T,
	pub control: T,
	pub end_state: T,
}

impl<T: Scalar> CostWeights<T> {
	pub fn new(state: T, control: T, end_state: T) -> Self {
		CostWeights {
			state,
			control,
			end_state,
		}
	}
}

impl<T: Scalar> Default for CostWeights<T> {
	fn default() -> Self {
		CostWeights::new(T::one(), T::one(), T::one())
	}
}

/// Diagonal cost matrices `Q`, `R`, `Qf`, together with the cached inverse of `R`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel<T: Scalar, const N: usize, const M: usize> {
	state: Matrix<T, N, N>,
	control: Matrix<T, M, M>,
	end_state: Matrix<T, N, N>,
	inv_control: Matrix<T, M, M>,
}

impl<T: Scalar, const N: usize, const M: usize> CostModel<T, N, M> {
	/// Expands scalar weights into identity-scaled matrices.
	pub fn new(weights: &CostWeights<T>) -> Result<Self> {
		Self::from_diagonals(
			&[weights.state; N],
			&[weights.control; M],
			&[weights.end_state; N],
		)
	}

	/// Builds the cost from one weight per state or action component.
	pub fn from_diagonals(state: &[T], control: &[T], end_state: &[T]) -> Result<Self> {
		let state = diagonal::<T, N>("state cost", state)?;
		let control = diagonal::<T, M>("control cost", control)?;
		let end_state = diagonal::<T, N>("end state cost", end_state)?;

		check_nonnegative("state", &state)?;
		check_nonnegative("end state", &end_state)?;
		if control.iter().any(|&w| !(w > T::zero()) || !w.is_finite()) {
			return Err(RegulatorError::SingularControlCost);
		}

		let control = Matrix::from_diagonal(&control);
		let inv_control = control
			.try_inverse()
			.ok_or(RegulatorError::SingularControlCost)?;

		Ok(CostModel {
			state: Matrix::from_diagonal(&state),
			control,
			end_state: Matrix::from_diagonal(&end_state),
			inv_control,
		})
	}

	pub fn state(&self) -> &Matrix<T, N, N> {
		&self.state
	}

	pub fn control(&self) -> &Matrix<T, M, M> {
		&self.control
	}

	pub fn end_state(&self) -> &Matrix<T, N, N> {
		&self.end_state
	}

	pub fn inv_control(&self) -> &Matrix<T, M, M> {
		&self.inv_control
	}
}

fn diagonal<T: Scalar, const D: usize>(
	what: &'static str,
	weights: &[T],
) -> Result<Vector<T, D>> {
	if weights.len() != D {
		return Err(RegulatorError::DimensionMismatch {
			what,
			expected: D,
			got: weights.len(),
		});
	}
	Ok(Vector::<T, D>::from_column_slice(weights))
}

fn check_nonnegative<T: Scalar, const D: usize>(
	name: &'static str,
	weights: &Vector<T, D>,
) -> Result<()> {
	match weights.iter().find(|&&w| !(w >= T::zero()) || !w.is_finite()) {
		Some(&value) => Err(RegulatorError::InvalidWeight {
			name,
			value: to_f64(value),
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::proptest::*;
	use proptest::prelude::*;

	#[test]
	fn scalar_weights_scale_identity() {
		let cost = CostModel::<f64, 3, 2>::new(&CostWeights::new(2.0, 0.5, 7.0)).unwrap();
		assert_eq!(cost.state(), &(Matrix::<f64, 3, 3>::identity() * 2.0));
		assert_eq!(cost.control(), &(Matrix::<f64, 2, 2>::identity() * 0.5));
		assert_eq!(cost.end_state(), &(Matrix::<f64, 3, 3>::identity() * 7.0));
		assert_eq!(cost.inv_control(), &(Matrix::<f64, 2, 2>::identity() * 2.0));
	}

	#[test]
	fn zero_control_weight_is_singular() {
		let result = CostModel::<f64, 2, 1>::new(&CostWeights::new(1.0, 0.0, 1.0));
		assert_eq!(result, Err(RegulatorError::SingularControlCost));
	}

	#[test]
	fn negative_control_weight_is_singular() {
		let result = CostModel::<f64, 2, 1>::new(&CostWeights::new(1.0, -1.0, 1.0));
		assert_eq!(result, Err(RegulatorError::SingularControlCost));
	}

	#[test]
	fn negative_state_weight_is_rejected() {
		let result = CostModel::<f64, 2, 1>::new(&CostWeights::new(-1.0, 1.0, 1.0));
		assert_eq!(
			result,
			Err(RegulatorError::InvalidWeight {
				name: "state",
				value: -1.0
			})
		);
	}

	#[test]
	fn zero_state_weights_are_allowed() {
		let cost = CostModel::<f64, 2, 1>::new(&CostWeights::new(0.0, 1.0, 0.0)).unwrap();
		assert_eq!(cost.state(), &Matrix::<f64, 2, 2>::zeros());
		assert_eq!(cost.end_state(), &Matrix::<f64, 2, 2>::zeros());
	}

	#[test]
	fn per_component_diagonals() {
		let cost =
			CostModel::<f64, 2, 1>::from_diagonals(&[1.0, 3.0], &[4.0], &[5.0, 6.0]).unwrap();
		assert_eq!(cost.state()[(1, 1)], 3.0);
		assert_eq!(cost.state()[(0, 1)], 0.0);
		assert_eq!(cost.inv_control()[(0, 0)], 0.25);
		assert_eq!(cost.end_state()[(0, 0)], 5.0);
	}

	#[test]
	fn diagonal_length_must_match_dimensions() {
		let result = CostModel::<f64, 2, 1>::from_diagonals(&[1.0, 1.0, 1.0], &[1.0], &[1.0, 1.0]);
		assert_eq!(
			result,
			Err(RegulatorError::DimensionMismatch {
				what: "state cost",
				expected: 2,
				got: 3
			})
		);

		let result = CostModel::<f64, 2, 1>::from_diagonals(&[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]);
		assert!(matches!(
			result,
			Err(RegulatorError::DimensionMismatch {
				what: "control cost",
				..
			})
		));
	}

	proptest! {
		#[test]
		fn control_inverse_is_exact(weights in cost_weights()) {
			let cost = CostModel::<f64, 3, 2>::new(&weights).unwrap();
			let product = cost.control() * cost.inv_control();
			const EPSILON: f64 = 1e-12;
			prop_assert!((product - Matrix::<f64, 2, 2>::identity()).amax() < EPSILON);
		}
	}
}
