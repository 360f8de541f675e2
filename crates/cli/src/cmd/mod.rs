pub mod fields;
pub mod generate;
