pub mod inspect;
pub mod render;
