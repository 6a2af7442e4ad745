pub mod azimuthal;
pub mod primitives;
pub mod raster;
pub mod scene;
