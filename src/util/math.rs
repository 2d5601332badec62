use ndarray::{Array1, ArrayView1, array};

use crate::{MlErr, Result, config::Scalar, error::check_size};

/// Multiplies two sizes, checking for overflow before multiplying.
///
/// # Arguments
/// * `a` - The left operand.
/// * `b` - The right operand.
/// * `what` - What is being computed, used in the error.
///
/// # Returns
/// `a * b`, or `MlErr::Overflow` if it does not fit in a `usize`.
pub fn multiply(a: usize, b: usize, what: &'static str) -> Result<usize> {
    if a != 0 && b > usize::MAX / a {
        return Err(MlErr::Overflow { what });
    }

    Ok(a * b)
}

/// Multiplies two signed 32-bit counts, checking for overflow before multiplying.
///
/// # Returns
/// `a * b`, `MlErr::InvalidArgument` if an operand is negative or `MlErr::Overflow` if the
/// product does not fit in an `i32`.
pub fn multiply_i32(a: i32, b: i32, what: &'static str) -> Result<i32> {
    if a < 0 || b < 0 {
        return Err(MlErr::invalid(format!(
            "negative operand while computing {what}: {a} * {b}"
        )));
    }

    if a != 0 && b > i32::MAX / a {
        return Err(MlErr::Overflow { what });
    }

    Ok(a * b)
}

/// Computes the product of a sequence of dimensions.
///
/// An empty sequence yields 1, the element count of a scalar.
///
/// # Arguments
/// * `dims` - The dimensions.
/// * `what` - What is being computed, used in the error.
///
/// # Returns
/// The product or the first overflow found.
pub fn product(dims: &[usize], what: &'static str) -> Result<usize> {
    dims.iter().try_fold(1, |acc, &d| multiply(acc, d, what))
}

/// Computes the product of a sequence of signed counts as a size.
///
/// # Returns
/// The product, `MlErr::InvalidArgument` at the first negative count or `MlErr::Overflow`.
pub fn product_i32(dims: &[i32], what: &'static str) -> Result<usize> {
    dims.iter().try_fold(1, |acc, &d| {
        let d = usize::try_from(d)
            .map_err(|_| MlErr::invalid(format!("negative dimension {d} in {what}")))?;

        multiply(acc, d, what)
    })
}

/// Allocates a zero-filled buffer of `numel` scalars.
///
/// # Returns
/// The buffer, or `MlErr::Overflow` if it would span more than `isize::MAX` bytes.
pub fn zeroed(numel: usize, what: &'static str) -> Result<Vec<Scalar>> {
    let bytes = multiply(numel, size_of::<Scalar>(), what)?;
    if bytes > isize::MAX as usize {
        return Err(MlErr::Overflow { what });
    }

    Ok(vec![0.; numel])
}

/// Multiplies every element of `v` together, 1 for an empty vector.
pub fn elem_product(v: ArrayView1<Scalar>) -> Scalar {
    v.product()
}

/// Computes the dot product of two vectors of the same length.
pub fn dot(a: ArrayView1<Scalar>, b: ArrayView1<Scalar>) -> Result<Scalar> {
    check_size("dot product operands", b.len(), a.len())?;
    Ok(a.dot(&b))
}

/// Computes the cross product of two 3-D vectors.
pub fn cross(a: ArrayView1<Scalar>, b: ArrayView1<Scalar>) -> Result<Array1<Scalar>> {
    check_size("cross product lhs", a.len(), 3)?;
    check_size("cross product rhs", b.len(), 3)?;

    Ok(array![
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}
