use crate::internal::{TokenKind as T, *};

/// Ordered symbol table; the first matching entry wins, so entries sharing
/// a prefix are longest-first (`:=` before `:`, `->` before `-`). Keywords
/// carry a trailing space marker and only match when that space is present.
const SYMBOLS: &[(&str, TokenKind)] = &[
  ("proc ", T::Proc),
  ("staticvar ", T::StaticVar),
  ("return ", T::Return),
  (":=", T::Assign),
  (":", T::Colon),
  (";", T::Semicolon),
  (",", T::Comma),
  ("->", T::RightArrow),
  ("(", T::LParen),
  (")", T::RParen),
  ("{", T::LCurly),
  ("}", T::RCurly),
  ("+", T::Plus),
  ("-", T::Minus),
  ("*", T::Asterisk),
  ("/", T::Slash),
  ("~", T::Tilda),
  ("=", T::Equal),
];

const BASIC_TYPES: &[&str] = &["u8", "u32", "nil"];

/// Lex `source` into tokens. Total and pure: an unrecognized character
/// silently ends the stream rather than failing.
pub fn tokenize(source: &str) -> Vec<Token> {
  Lexer::new_str(source).tokenize()
}

#[derive(Debug)]
pub struct Lexer {
  src: String,
  pos: usize,
}

impl Lexer {
  pub fn new(src: String) -> Self {
    Lexer { src, pos: 0 }
  }

  pub fn new_str(src: &str) -> Self {
    Self::new(src.to_owned())
  }

  pub fn tokenize(mut self) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(64);
    while let Some(token) = self.next_token() {
      tokens.push(token);
    }
    tokens
  }

  /// One token, or `None` at end of input or at the first byte no rule
  /// recognizes (silent truncation, never an error).
  pub fn next_token(&mut self) -> Option<Token> {
    self.skip_insignificant();
    if self.eof() {
      return None;
    }

    for (symbol, kind) in SYMBOLS {
      if self.bytes()[self.pos..].starts_with(symbol.as_bytes()) {
        self.pos += symbol.len();
        return Some(Token::new(*kind, *symbol));
      }
    }

    let b = self.bytes()[self.pos];
    if b.is_ascii_digit() {
      return Some(self.numeric_literal());
    }
    if can_start_id(b) {
      return Some(self.ident_or_basic_type());
    }
    None
  }

  /// Skips runs of space, newline, and NUL bytes, and `#` line comments
  /// through their closing newline. A comment ending at end of input stops
  /// there instead of scanning past the buffer.
  fn skip_insignificant(&mut self) {
    loop {
      while !self.eof() && matches!(self.bytes()[self.pos], b' ' | b'\n' | b'\0') {
        self.pos += 1;
      }
      if self.eof() || self.bytes()[self.pos] != b'#' {
        return;
      }
      while !self.eof() && self.bytes()[self.pos] != b'\n' {
        self.pos += 1;
      }
      if !self.eof() {
        self.pos += 1; // the closing newline
      }
    }
  }

  fn numeric_literal(&mut self) -> Token {
    let start = self.pos;
    while !self.eof() && self.bytes()[self.pos].is_ascii_digit() {
      self.pos += 1;
    }
    Token::new(T::NumericLiteral, &self.src[start..self.pos])
  }

  fn ident_or_basic_type(&mut self) -> Token {
    let start = self.pos;
    self.pos += 1;
    while !self.eof() && can_continue_id(self.bytes()[self.pos]) {
      self.pos += 1;
    }
    let text = &self.src[start..self.pos];
    if BASIC_TYPES.contains(&text) {
      Token::new(T::BasicType, text)
    } else {
      Token::new(T::Id, text)
    }
  }

  fn bytes(&self) -> &[u8] {
    self.src.as_bytes()
  }

  fn eof(&self) -> bool {
    self.pos >= self.src.len()
  }
}

const fn can_start_id(b: u8) -> bool {
  b.is_ascii_alphabetic() || b == b'_'
}

const fn can_continue_id(b: u8) -> bool {
  can_start_id(b) || b.is_ascii_digit()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds_and_texts(input: &str) -> Vec<(TokenKind, String)> {
    tokenize(input)
      .into_iter()
      .map(|t| (t.kind, t.text))
      .collect()
  }

  #[test]
  fn punctuation_and_whitespace() {
    let cases: &[(T, &str)] = &[
      (T::LCurly, "{"),
      (T::RCurly, "}"),
      (T::LParen, "("),
      (T::RParen, ")"),
      (T::Semicolon, ";"),
      (T::Comma, ","),
      (T::Tilda, "~"),
      (T::Asterisk, "*"),
      (T::Slash, "/"),
      (T::Equal, "="),
    ];
    let tokens = tokenize("{ }(\n);,~ * / =");
    assert_eq!(tokens.len(), cases.len());
    for (token, (kind, text)) in tokens.iter().zip(cases) {
      assert_eq!(token.kind, *kind);
      assert_eq!(token.text, *text);
    }
  }

  #[test]
  fn assign_is_one_token() {
    assert_eq!(kinds_and_texts(":="), vec![(T::Assign, ":=".to_owned())]);
    assert_eq!(
      kinds_and_texts(": ="),
      vec![(T::Colon, ":".to_owned()), (T::Equal, "=".to_owned())]
    );
  }

  #[test]
  fn arrow_takes_priority_over_minus() {
    assert_eq!(
      kinds_and_texts("->-"),
      vec![(T::RightArrow, "->".to_owned()), (T::Minus, "-".to_owned())]
    );
  }

  #[test]
  fn keywords_need_their_trailing_space() {
    let tokens = tokenize("proc f");
    assert_eq!(tokens[0], Token::new(T::Proc, "proc "));
    assert_eq!(tokens[1], Token::new(T::Id, "f"));
    // without the space, `proc` is just an identifier
    assert_eq!(kinds_and_texts("proc"), vec![(T::Id, "proc".to_owned())]);
    assert_eq!(
      kinds_and_texts("return 1")[0],
      (T::Return, "return ".to_owned())
    );
    assert_eq!(
      kinds_and_texts("staticvar x")[0],
      (T::StaticVar, "staticvar ".to_owned())
    );
  }

  #[test]
  fn comments_contribute_no_tokens() {
    let tokens = kinds_and_texts("x := 1 # comment\ny := 2;");
    assert_eq!(
      tokens,
      vec![
        (T::Id, "x".to_owned()),
        (T::Assign, ":=".to_owned()),
        (T::NumericLiteral, "1".to_owned()),
        (T::Id, "y".to_owned()),
        (T::Assign, ":=".to_owned()),
        (T::NumericLiteral, "2".to_owned()),
        (T::Semicolon, ";".to_owned()),
      ]
    );
  }

  #[test]
  fn comment_without_closing_newline_ends_input() {
    let tokens = kinds_and_texts("x # trailing comment");
    assert_eq!(tokens, vec![(T::Id, "x".to_owned())]);
    assert_eq!(kinds_and_texts("# only a comment"), vec![]);
  }

  #[test]
  fn consecutive_comment_lines() {
    let tokens = kinds_and_texts("# one\n# two\n  # three\nx");
    assert_eq!(tokens, vec![(T::Id, "x".to_owned())]);
  }

  #[test]
  fn basic_type_names_are_a_closed_set() {
    assert_eq!(
      kinds_and_texts("u8 u32 nil u16 _u8 nil2"),
      vec![
        (T::BasicType, "u8".to_owned()),
        (T::BasicType, "u32".to_owned()),
        (T::BasicType, "nil".to_owned()),
        (T::Id, "u16".to_owned()),
        (T::Id, "_u8".to_owned()),
        (T::Id, "nil2".to_owned()),
      ]
    );
  }

  #[test]
  fn numeric_literals_are_maximal_digit_runs() {
    assert_eq!(
      kinds_and_texts("1234 007"),
      vec![
        (T::NumericLiteral, "1234".to_owned()),
        (T::NumericLiteral, "007".to_owned()),
      ]
    );
  }

  #[test]
  fn unrecognized_byte_truncates_silently() {
    assert_eq!(kinds_and_texts("x ? y"), vec![(T::Id, "x".to_owned())]);
    assert_eq!(kinds_and_texts("@"), vec![]);
    assert_eq!(kinds_and_texts(""), vec![]);
  }

  #[test]
  fn nul_bytes_skip_like_whitespace() {
    assert_eq!(
      kinds_and_texts("x\0\0y"),
      vec![(T::Id, "x".to_owned()), (T::Id, "y".to_owned())]
    );
  }
}
