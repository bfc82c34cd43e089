mod scanner;

pub use scanner::{ContentPattern, Scanner, Token};
