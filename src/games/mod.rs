//! Concrete games built on the runtime.

pub mod dice;
