pub mod events;
pub mod mowers;
