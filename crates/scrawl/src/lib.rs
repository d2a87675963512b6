//! Handwriting image preparation and augmentation.
//!
//! This crate re-exports the `scrawl-*` crates under short module names.

#[doc(inline)]
pub use scrawl_tensor as tensor;

#[doc(inline)]
pub use scrawl_image as image;

#[doc(inline)]
pub use scrawl_imgproc as imgproc;

#[doc(inline)]
pub use scrawl_tps as tps;

#[doc(inline)]
pub use scrawl_augment as augment;

#[doc(inline)]
pub use scrawl_io as io;

#[doc(inline)]
pub use scrawl_data as data;
