use nalgebra::RealField;

/// Univariate normal probability density.
pub fn gauss_pdf<T: RealField + Copy>(x: T, mu: T, sigma: T) -> T {
    let d = x - mu;
    let two = T::one() + T::one();
    (-(d * d) / (two * sigma * sigma)).exp() / (sigma * T::two_pi().sqrt())
}
