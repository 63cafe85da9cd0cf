pub(crate) mod consts;
pub(crate) mod paths;
pub(crate) mod vdf;
