pub mod analyse;
pub mod inspect;
