//! User-facing front ends built on the state layer

pub mod cli;
