pub mod apply;
pub mod generate;
pub mod inspect;
