use serde::{Deserialize, Serialize};

/// Every lexical shape the tokenizer can emit. The serialized name of a
/// kind is the `type` tag of the token interchange format, so renaming a
/// variant is a breaking change to previously written token files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
  Id,
  Proc,
  StaticVar,
  Return,
  BasicType,
  NumericLiteral,
  LParen,
  RParen,
  LCurly,
  RCurly,
  Colon,
  Semicolon,
  Comma,
  RightArrow,
  Assign,
  Equal,
  Plus,
  Minus,
  Asterisk,
  Slash,
  Tilda,
}

/// A lexical unit: kind plus the exact matched substring. Keyword tokens
/// keep the trailing space their symbol-table entry matched, so `text` is
/// always byte-for-byte what the lexer consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
  #[serde(rename = "type")]
  pub kind: TokenKind,
  #[serde(rename = "value")]
  pub text: String,
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
    Token { kind, text: text.into() }
  }
}
