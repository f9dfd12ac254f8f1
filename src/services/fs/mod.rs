pub mod finder;
pub mod listing;
pub mod ops;
pub mod workdir;
