pub mod prelude;

pub mod asset;
pub mod avatar;
pub mod cut;
pub mod episode;
pub mod script;
