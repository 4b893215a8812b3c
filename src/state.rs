use std::collections::VecDeque;

use nalgebra::{DVector, RealField, SVector};
use rand_distr::num_traits::Zero;

/// Recursive traversal of a particle state's scalar components.
///
/// A state is a scalar real, a fixed-length array, or an ordered
/// sequence of states, nested to any depth. Policies that only care
/// about scalar leaves (initialization, noise, weighting, the weighted
/// mean) go through this trait instead of matching on the concrete
/// state representation.
pub trait StateShape: Clone {
    type Scalar: RealField + Copy;

    /// Applies `f` to every scalar leaf, in order.
    fn for_each_scalar<F: FnMut(&mut Self::Scalar)>(&mut self, f: &mut F);

    /// Folds `f` over the paired scalar leaves of `self` and `other`.
    /// Both values must have the same shape.
    fn fold_scalars<A, F: FnMut(A, Self::Scalar, Self::Scalar) -> A>(
        &self,
        other: &Self,
        acc: A,
        f: &mut F,
    ) -> A;

    /// `self[leaf] += other[leaf] * factor` for every leaf.
    fn scaled_add(&mut self, other: &Self, factor: Self::Scalar);

    /// A value of the same shape with every leaf set to zero.
    fn zeroed(&self) -> Self {
        let mut out = self.clone();
        out.for_each_scalar(&mut |x| *x = Self::Scalar::zero());
        out
    }
}

impl StateShape for f64 {
    type Scalar = f64;

    fn for_each_scalar<F: FnMut(&mut f64)>(&mut self, f: &mut F) {
        f(self);
    }

    fn fold_scalars<A, F: FnMut(A, f64, f64) -> A>(&self, other: &Self, acc: A, f: &mut F) -> A {
        f(acc, *self, *other)
    }

    fn scaled_add(&mut self, other: &Self, factor: f64) {
        *self += *other * factor;
    }
}

impl StateShape for f32 {
    type Scalar = f32;

    fn for_each_scalar<F: FnMut(&mut f32)>(&mut self, f: &mut F) {
        f(self);
    }

    fn fold_scalars<A, F: FnMut(A, f32, f32) -> A>(&self, other: &Self, acc: A, f: &mut F) -> A {
        f(acc, *self, *other)
    }

    fn scaled_add(&mut self, other: &Self, factor: f32) {
        *self += *other * factor;
    }
}

impl<S: StateShape, const N: usize> StateShape for [S; N] {
    type Scalar = S::Scalar;

    fn for_each_scalar<F: FnMut(&mut Self::Scalar)>(&mut self, f: &mut F) {
        for s in self.iter_mut() {
            s.for_each_scalar(f);
        }
    }

    fn fold_scalars<A, F: FnMut(A, Self::Scalar, Self::Scalar) -> A>(
        &self,
        other: &Self,
        mut acc: A,
        f: &mut F,
    ) -> A {
        for (a, b) in self.iter().zip(other.iter()) {
            acc = a.fold_scalars(b, acc, f);
        }
        acc
    }

    fn scaled_add(&mut self, other: &Self, factor: Self::Scalar) {
        for (a, b) in self.iter_mut().zip(other.iter()) {
            a.scaled_add(b, factor);
        }
    }
}

impl<S: StateShape> StateShape for Vec<S> {
    type Scalar = S::Scalar;

    fn for_each_scalar<F: FnMut(&mut Self::Scalar)>(&mut self, f: &mut F) {
        for s in self.iter_mut() {
            s.for_each_scalar(f);
        }
    }

    fn fold_scalars<A, F: FnMut(A, Self::Scalar, Self::Scalar) -> A>(
        &self,
        other: &Self,
        mut acc: A,
        f: &mut F,
    ) -> A {
        for (a, b) in self.iter().zip(other.iter()) {
            acc = a.fold_scalars(b, acc, f);
        }
        acc
    }

    fn scaled_add(&mut self, other: &Self, factor: Self::Scalar) {
        for (a, b) in self.iter_mut().zip(other.iter()) {
            a.scaled_add(b, factor);
        }
    }
}

impl<S: StateShape> StateShape for VecDeque<S> {
    type Scalar = S::Scalar;

    fn for_each_scalar<F: FnMut(&mut Self::Scalar)>(&mut self, f: &mut F) {
        for s in self.iter_mut() {
            s.for_each_scalar(f);
        }
    }

    fn fold_scalars<A, F: FnMut(A, Self::Scalar, Self::Scalar) -> A>(
        &self,
        other: &Self,
        mut acc: A,
        f: &mut F,
    ) -> A {
        for (a, b) in self.iter().zip(other.iter()) {
            acc = a.fold_scalars(b, acc, f);
        }
        acc
    }

    fn scaled_add(&mut self, other: &Self, factor: Self::Scalar) {
        for (a, b) in self.iter_mut().zip(other.iter()) {
            a.scaled_add(b, factor);
        }
    }
}

impl<T: RealField + Copy, const D: usize> StateShape for SVector<T, D> {
    type Scalar = T;

    fn for_each_scalar<F: FnMut(&mut T)>(&mut self, f: &mut F) {
        for x in self.iter_mut() {
            f(x);
        }
    }

    fn fold_scalars<A, F: FnMut(A, T, T) -> A>(&self, other: &Self, mut acc: A, f: &mut F) -> A {
        for (a, b) in self.iter().zip(other.iter()) {
            acc = f(acc, *a, *b);
        }
        acc
    }

    fn scaled_add(&mut self, other: &Self, factor: T) {
        *self += other * factor;
    }
}

impl<T: RealField + Copy> StateShape for DVector<T> {
    type Scalar = T;

    fn for_each_scalar<F: FnMut(&mut T)>(&mut self, f: &mut F) {
        for x in self.iter_mut() {
            f(x);
        }
    }

    fn fold_scalars<A, F: FnMut(A, T, T) -> A>(&self, other: &Self, mut acc: A, f: &mut F) -> A {
        for (a, b) in self.iter().zip(other.iter()) {
            acc = f(acc, *a, *b);
        }
        acc
    }

    fn scaled_add(&mut self, other: &Self, factor: T) {
        *self += other * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::StateShape;
    use nalgebra::{DVector, Vector3};
    use std::collections::VecDeque;

    #[test]
    fn scalar_leaf() {
        let mut x = 2.0;
        x.for_each_scalar(&mut |v| *v += 1.0);
        assert_eq!(x, 3.0);
    }

    #[test]
    fn nested_array_traversal() {
        let mut x = [[1.0, 2.0], [3.0, 4.0]];
        let mut count = 0;
        x.for_each_scalar(&mut |v| {
            *v *= 2.0;
            count += 1;
        });
        assert_eq!(count, 4);
        assert_eq!(x, [[2.0, 4.0], [6.0, 8.0]]);
    }

    #[test]
    fn sequence_of_arrays_traversal() {
        let mut x = vec![[0.0f64; 3]; 2];
        x.for_each_scalar(&mut |v| *v = 1.0);
        assert_eq!(x, vec![[1.0; 3]; 2]);
    }

    #[test]
    fn deque_traversal() {
        let mut x: VecDeque<f64> = VecDeque::from(vec![1.0, 2.0]);
        x.for_each_scalar(&mut |v| *v += 0.5);
        assert_eq!(x, VecDeque::from(vec![1.5, 2.5]));
    }

    #[test]
    fn fold_sums_squared_differences() {
        let a = [1.0, 2.0, 3.0];
        let b = [0.0, 0.0, 0.0];
        let sq = a.fold_scalars(&b, 0.0, &mut |acc, x, y| acc + (x - y) * (x - y));
        assert_eq!(sq, 14.0);
    }

    #[test]
    fn scaled_add_elementwise() {
        let mut acc = [0.0, 0.0];
        acc.scaled_add(&[1.0, 2.0], 0.5);
        acc.scaled_add(&[2.0, 2.0], 0.25);
        assert_eq!(acc, [1.0, 1.5]);
    }

    #[test]
    fn zeroed_keeps_shape() {
        let x = vec![vec![1.0, 2.0], vec![3.0]];
        let z = x.zeroed();
        assert_eq!(z, vec![vec![0.0, 0.0], vec![0.0]]);
    }

    #[test]
    fn nalgebra_vectors() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v.for_each_scalar(&mut |x| *x -= 1.0);
        assert_eq!(v, Vector3::new(0.0, 1.0, 2.0));

        let mut d = DVector::from_vec(vec![1.0, 1.0]);
        d.scaled_add(&DVector::from_vec(vec![2.0, 4.0]), 0.5);
        assert_eq!(d, DVector::from_vec(vec![2.0, 3.0]));
        assert_eq!(d.zeroed(), DVector::from_vec(vec![0.0, 0.0]));
    }
}
