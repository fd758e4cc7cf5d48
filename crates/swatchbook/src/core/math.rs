use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the rounding factor for
/// equality comparisons.
pub(crate) trait FloatExt {
    /// The factor determining rounding precision.
    ///
    /// When limiting a floating point number's precision, the number is
    /// multiplied by some factor, rounded, and divided by the same factor
    /// again. The factor is a power of ten, which directly translates into
    /// significant digits after the decimal.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e12;
}

// ----------------------------------------------------------------------------------------------------------

/// Multiply the M×N matrix with the N×P matrix, producing a new M×P matrix.
///
/// Row-vector and column-vector operands are just matrices with M = 1 or
/// P = 1; [`multiply_vector`] provides the column-vector shortcut without
/// allocating a superfluous dimension.
#[allow(dead_code)]
pub(crate) fn multiply<const M: usize, const N: usize, const P: usize>(
    lhs: &[[Float; N]; M],
    rhs: &[[Float; P]; N],
) -> [[Float; P]; M] {
    let mut result = [[0.0; P]; M];

    for (row, out) in lhs.iter().zip(result.iter_mut()) {
        for (column, cell) in out.iter_mut().enumerate() {
            *cell = row
                .iter()
                .zip(rhs.iter())
                .fold(0.0, |sum, (&a, b)| a.mul_add(b[column], sum));
        }
    }

    result
}

/// Multiply the M×N matrix with the N-element column vector, producing a new
/// M-element vector.
#[inline]
pub(crate) fn multiply_vector<const M: usize, const N: usize>(
    matrix: &[[Float; N]; M],
    vector: &[Float; N],
) -> [Float; M] {
    let mut result = [0.0; M];

    for (row, cell) in matrix.iter().zip(result.iter_mut()) {
        *cell = row
            .iter()
            .zip(vector.iter())
            .fold(0.0, |sum, (&a, &b)| a.mul_add(b, sum));
    }

    result
}

#[cfg(test)]
mod test {
    use super::{multiply, multiply_vector};

    #[test]
    fn test_multiply() {
        let lhs = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let rhs = [[7.0, 8.0, 9.0], [10.0, 11.0, 12.0]];

        assert_eq!(
            multiply(&lhs, &rhs),
            [[27.0, 30.0, 33.0], [61.0, 68.0, 75.0], [95.0, 106.0, 117.0]]
        );
    }

    #[test]
    fn test_multiply_vector() {
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(multiply_vector(&identity, &[0.1, 0.2, 0.3]), [0.1, 0.2, 0.3]);

        let matrix = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(multiply_vector(&matrix, &[1.0, 1.0, 1.0]), [6.0, 15.0]);

        // A column vector is a N×1 matrix; the shortcut must agree with the
        // general product.
        let column = [[1.0], [1.0], [1.0]];
        let product = multiply(&matrix, &column);
        assert_eq!(product, [[6.0], [15.0]]);
    }
}
