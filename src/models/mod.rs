pub mod bank;
pub mod category;
pub mod loaders;
pub mod question;
pub mod quiz;

pub use bank::TriviaBank;
pub use category::Category;
pub use loaders::{load_or_init_trivia_bank, load_trivia_bank, write_trivia_bank};
pub use question::{NewQuestion, Question};
pub use quiz::{QuizOutcome, QuizRequest};
