pub(crate) mod amount;
pub(crate) mod classify;
pub(crate) mod payload;
pub(crate) mod signatures;
pub(crate) mod topics;
