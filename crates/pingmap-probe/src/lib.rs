#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod tcp;

pub use tcp::{DEFAULT_PROBE_TIMEOUT, TcpProber};
