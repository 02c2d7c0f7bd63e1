use std::ops::RangeInclusive;

use crate::{prelude::*, CostWeights, LinearDynamics};
use nalgebra::Const;
use proptest::strategy::Strategy;

fn scalar() -> RangeInclusive<f64> {
	-2.0..=2.0
}

pub fn matrix<const N: usize, const M: usize>() -> impl Strategy<Value = Matrix<f64, N, M>> {
	nalgebra::proptest::matrix(scalar(), Const::<N>, Const::<M>)
}

pub fn vector<const N: usize>() -> impl Strategy<Value = Vector<f64, N>> {
	matrix::<N, 1>()
}

pub fn linear_dynamics<const N: usize, const M: usize>(
) -> impl Strategy<Value = LinearDynamics<f64, N, M>> {
	let a = matrix::<N, N>();
	let b = matrix::<N, M>();

	(a, b).prop_map(|(a, b)| LinearDynamics { a, b })
}

/// Weights with a control weight kept away from zero so `R` stays well conditioned.
pub fn cost_weights() -> impl Strategy<Value = CostWeights<f64>> {
	(0.0..=2.0, 0.5..=2.0, 0.0..=2.0)
		.prop_map(|(state, control, end_state)| CostWeights::new(state, control, end_state))
}
