pub mod identify;
pub mod inspect;
