pub mod lexicon;
pub mod linker;
pub mod rank;
pub mod sample;
pub mod settings;
pub mod source;
pub mod store;
pub mod unicode;
