//! HomeDesigns AI outbound adapter.
//!
//! A thin reqwest implementation of the `DesignGenerator` port.

mod dto;
mod http_generator;

pub use http_generator::HomeDesignsHttpGenerator;
