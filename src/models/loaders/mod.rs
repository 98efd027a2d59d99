pub mod toml_loader;

pub use toml_loader::{
    load_or_init_trivia_bank, load_trivia_bank, parse_trivia_bank, write_trivia_bank,
};
