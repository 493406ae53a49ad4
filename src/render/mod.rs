pub(crate) mod backend;
pub(crate) mod document;
pub(crate) mod raster;
