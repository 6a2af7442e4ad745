pub mod constants;
pub mod document;
pub mod geo;
pub mod pins;
pub mod transform;
