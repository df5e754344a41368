pub mod suggest;

pub use suggest::{suggest, Suggestions};
