pub mod trivia_store;

pub use trivia_store::{StoreState, TriviaStore};
