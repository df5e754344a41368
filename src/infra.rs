#![doc(hidden)]

pub mod ops;
pub mod testing;

#[cfg(feature = "proptest")]
pub mod proptest;
