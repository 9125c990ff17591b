pub mod formations;
pub mod render;
pub mod search;
