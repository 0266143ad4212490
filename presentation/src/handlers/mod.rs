//! Request handlers, one module per endpoint

pub mod calculate;
pub mod council;
pub mod safety;
pub mod status;
pub mod supervisor;
