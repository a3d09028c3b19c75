//! Random tensor construction.

use rand::Rng;
use rand::distr::StandardUniform;

use crate::strides::checked_len;
use crate::tensor::Tensor;

impl Tensor {
    /// Create a tensor of independent draws `floor(u * multiplier)`, `u` in [0, 1).
    ///
    /// For a positive integer `multiplier` every element is an integer in
    /// `[0, multiplier)`.
    ///
    /// # Panics
    ///
    /// Panics if the element count of `shape` overflows `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcuboid::Tensor;
    ///
    /// let t = Tensor::random(&[2, 3], 10.0);
    /// assert_eq!(t.shape(), &[2, 3]);
    /// assert!(t.values().all(|v| v.fract() == 0.0 && (0.0..10.0).contains(&v)));
    /// ```
    pub fn random(shape: &[usize], multiplier: f64) -> Self {
        Self::random_with_rng(shape, multiplier, &mut rand::rng())
    }

    /// Like [`Tensor::random`], drawing from a specific RNG.
    ///
    /// # Example
    ///
    /// ```
    /// use ndcuboid::Tensor;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let t1 = Tensor::random_with_rng(&[4], 100.0, &mut StdRng::seed_from_u64(42));
    /// let t2 = Tensor::random_with_rng(&[4], 100.0, &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1, t2);
    /// ```
    pub fn random_with_rng<R: Rng>(shape: &[usize], multiplier: f64, rng: &mut R) -> Self {
        let len = checked_len(shape).expect("shape element count overflows usize");
        let data: Vec<f64> = (0..len)
            .map(|_| {
                let u: f64 = rng.sample(StandardUniform);
                (u * multiplier).floor()
            })
            .collect();
        Self::from_vec(data, shape).expect("shape and data length should match")
    }
}
