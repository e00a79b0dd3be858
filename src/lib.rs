//! CityScale: urban greenhouse-gas emissions simulator.
//!
//! The computation pipeline lives in [`cityscale_core`]; table loading and run
//! storage in [`cityscale_io`]. With the `python` feature enabled this crate also
//! builds the `cityscale._lib` extension module used by the Python front end.

pub use cityscale_core;
pub use cityscale_io;

#[cfg(feature = "python")]
pub mod python;
