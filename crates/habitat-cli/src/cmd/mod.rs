pub mod cart;
pub mod export;
pub mod import;
pub mod inspect;
pub mod run;
