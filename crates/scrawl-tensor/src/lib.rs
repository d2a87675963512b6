#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `scrawl-tensor` provides [`Tensor`], a contiguous, row-major, owned
//! multi-dimensional array with its rank fixed at compile time. It is the
//! storage behind images, image batches and sampling grids in the rest of
//! the workspace.
//!
//! ```rust
//! use scrawl_tensor::Tensor2;
//!
//! let t = Tensor2::<f32>::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.get([1, 2]), Some(&6.0));
//!
//! let t = t.reshape([3, 2]).unwrap();
//! assert_eq!(t.shape, [3, 2]);
//! ```

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;
