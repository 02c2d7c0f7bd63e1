use nalgebra::{Const, OMatrix, RealField};
use num_traits::ToPrimitive;

pub type Matrix<T, const N: usize, const M: usize> = OMatrix<T, Const<N>, Const<M>>;
pub type Vector<T, const N: usize> = Matrix<T, N, 1>;

/// Real scalar the regulator is generic over, in practice `f32` or `f64`.
pub trait Scalar: RealField + Copy + ToPrimitive {}
impl<T> Scalar for T where T: RealField + Copy + ToPrimitive {}

/// Lossy conversion used when reporting scalars in errors.
pub(crate) fn to_f64<T: Scalar>(value: T) -> f64 {
	value.to_f64().unwrap_or(f64::NAN)
}
