//! Reconstruction of vehicle routes from a final arc selection.

mod decoder;

pub use decoder::RouteDecoder;
