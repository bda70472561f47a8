mod question;

pub use question::{AnswerOption, Question};
