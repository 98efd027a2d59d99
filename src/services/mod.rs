pub mod category_directory;
pub mod paginator;
pub mod question_repository;
pub mod quiz_selector;

pub use category_directory::CategoryDirectory;
pub use paginator::{page, Paginator};
pub use question_repository::QuestionRepository;
pub use quiz_selector::{select_unseen, QuizSelector};
