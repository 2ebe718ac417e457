pub mod ast;
pub mod interchange;
pub mod lexer;
pub mod parser;
pub mod token;

pub mod internal {
  pub use crate::ast::*;
  pub use crate::interchange::*;
  pub use crate::lexer::*;
  pub use crate::parser::*;
  pub use crate::token::*;
}
