pub(crate) mod drink;
pub(crate) mod event;
pub(crate) mod place;
pub(crate) mod user;
