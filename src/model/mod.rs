pub(crate) mod catalog;
pub(crate) mod palette;
pub(crate) mod slide;
