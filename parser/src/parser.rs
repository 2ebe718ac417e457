use crate::internal::{TokenKind as T, *};
#[cfg(debug_assertions)]
use std::sync::Once;
use tracing::{instrument, trace};
#[cfg(debug_assertions)]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(debug_assertions)]
use tracing_subscriber::{EnvFilter, fmt};

/// Backtracking recursive-descent parser over an immutable token sequence.
///
/// There is no shared cursor: every `try_*` rule takes an absolute position
/// and either returns a fully built node or `None`, with no side effects.
/// Callers advance past a sub-parse by the returned node's `token_len()`,
/// so re-trying an alternative from the same position needs no reset step.
#[derive(Debug)]
pub struct Parser {
  tokens: Vec<Token>,
}

impl Parser {
  pub fn new(tokens: Vec<Token>) -> Parser {
    Parser { tokens }
  }

  pub fn new_str(src: &str) -> Parser {
    #[cfg(debug_assertions)]
    configure_test_tracing();
    Parser::new(tokenize(src))
  }

  /// Parses the whole token sequence as a sequence of global statements.
  /// Fails the entire program if any position fails before exactly
  /// reaching the end of input; no partial program is returned.
  #[instrument(skip_all)]
  pub fn parse_program(&self) -> Option<Program> {
    trace!(tokens = self.tokens.len(), "parse_program");
    let mut globals = Vec::new();
    let mut pos = 0;
    while pos < self.tokens.len() {
      let global = self.try_global_statement(pos)?;
      pos += global.token_len();
      globals.push(global);
    }
    Some(Program { globals })
  }

  #[instrument(skip_all)]
  fn try_global_statement(&self, pos: usize) -> Option<GlobalStatement> {
    if let Some(proc) = self.try_procedure_definition(pos) {
      return Some(GlobalStatement::Procedure(proc));
    }
    self
      .try_static_var_definition(pos)
      .map(GlobalStatement::StaticVar)
  }

  // ProcedureDefinition := 'proc' ID '(' Parameters ')' '->' BasicType Block
  #[instrument(skip_all)]
  fn try_procedure_definition(&self, pos: usize) -> Option<ProcedureDefinition> {
    let mut cur = pos;
    self.expect(cur, T::Proc)?;
    cur += 1;
    let name = self.expect_text(cur, T::Id)?;
    cur += 1;
    self.expect(cur, T::LParen)?;
    cur += 1;
    let parameters = self.try_parameters(cur)?;
    cur += parameters.token_len();
    self.expect(cur, T::RParen)?;
    cur += 1;
    self.expect(cur, T::RightArrow)?;
    cur += 1;
    let return_type = self.basic_type_at(cur)?;
    cur += 1;
    let body = self.try_block(cur)?;
    Some(ProcedureDefinition { name, parameters, return_type, body })
  }

  // StaticVarDefinition := 'staticvar' ID ':' BasicType ';'
  #[instrument(skip_all)]
  fn try_static_var_definition(&self, pos: usize) -> Option<StaticVarDefinition> {
    self.expect(pos, T::StaticVar)?;
    let name = self.expect_text(pos + 1, T::Id)?;
    self.expect(pos + 2, T::Colon)?;
    let ty = self.basic_type_at(pos + 3)?;
    self.expect(pos + 4, T::Semicolon)?;
    Some(StaticVarDefinition { name, ty })
  }

  // Parameters := (Parameter (',' Parameter)*)?
  //
  // Always matches, possibly empty. A comma not followed by a parameter is
  // left unconsumed; the enclosing rule then fails on its `)` expectation.
  fn try_parameters(&self, pos: usize) -> Option<Parameters> {
    let mut params = Vec::new();
    let mut cur = pos;
    if let Some(first) = self.try_parameter(cur) {
      cur += first.token_len();
      params.push(first);
      while self.expect(cur, T::Comma).is_some() {
        let Some(param) = self.try_parameter(cur + 1) else {
          break;
        };
        cur += 1 + param.token_len();
        params.push(param);
      }
    }
    Some(Parameters { params })
  }

  // Parameter := ID ':' BasicType
  fn try_parameter(&self, pos: usize) -> Option<Parameter> {
    let name = self.expect_text(pos, T::Id)?;
    self.expect(pos + 1, T::Colon)?;
    let ty = self.basic_type_at(pos + 2)?;
    Some(Parameter { name, ty })
  }

  // Block := '{' Statement* '}'
  #[instrument(skip_all)]
  fn try_block(&self, pos: usize) -> Option<Block> {
    let mut cur = pos;
    self.expect(cur, T::LCurly)?;
    cur += 1;
    let mut statements = Vec::new();
    while let Some(statement) = self.try_statement(cur) {
      cur += statement.token_len();
      statements.push(statement);
    }
    self.expect(cur, T::RCurly)?;
    Some(Block { statements })
  }

  // Statement := Expression ';'
  fn try_statement(&self, pos: usize) -> Option<Statement> {
    let expr = self.try_expression(pos)?;
    self.expect(pos + expr.token_len(), T::Semicolon)?;
    Some(Statement { expr, is_return: false })
  }

  // Expression := Assignment | Sum | Sub | Term
  //
  // Ordered choice: assignment first, so `x := 1+2` is an assignment
  // wrapping a sum rather than a failed arithmetic parse.
  fn try_expression(&self, pos: usize) -> Option<Expression> {
    if let Some(assignment) = self.try_assignment(pos) {
      return Some(Expression::Assignment(assignment));
    }
    if let Some(sum) = self.try_sum(pos) {
      return Some(Expression::Sum(sum));
    }
    if let Some(sub) = self.try_sub(pos) {
      return Some(Expression::Sub(sub));
    }
    self.try_term(pos).map(Expression::Term)
  }

  // Assignment := ID ':=' Expression
  fn try_assignment(&self, pos: usize) -> Option<Assignment> {
    let target = self.expect_text(pos, T::Id)?;
    self.expect(pos + 1, T::Assign)?;
    let value = self.try_expression(pos + 2)?;
    Some(Assignment { target, value: Box::new(value) })
  }

  // Sum := Term '+' Expression — right-recursive through Expression
  fn try_sum(&self, pos: usize) -> Option<Sum> {
    let left = self.try_term(pos)?;
    self.expect(pos + left.token_len(), T::Plus)?;
    let right = self.try_expression(pos + left.token_len() + 1)?;
    Some(Sum { left, right: Box::new(right) })
  }

  // Sub := Term '-' Expression
  fn try_sub(&self, pos: usize) -> Option<Sub> {
    let left = self.try_term(pos)?;
    self.expect(pos + left.token_len(), T::Minus)?;
    let right = self.try_expression(pos + left.token_len() + 1)?;
    Some(Sub { left, right: Box::new(right) })
  }

  // Term := ('+' | '-' | '~')? Primary
  fn try_term(&self, pos: usize) -> Option<Term> {
    let op = match self.token_at(pos)?.kind {
      T::Plus => Some(UnaryOp::Plus),
      T::Minus => Some(UnaryOp::Minus),
      T::Tilda => Some(UnaryOp::Not),
      _ => None,
    };
    let primary_pos = if op.is_some() { pos + 1 } else { pos };
    let primary = self.try_primary(primary_pos)?;
    Some(Term { op, primary })
  }

  // Primary := ID | NUMERIC_LITERAL
  fn try_primary(&self, pos: usize) -> Option<Primary> {
    let token = self.token_at(pos)?;
    matches!(token.kind, T::Id | T::NumericLiteral).then(|| Primary { token: token.clone() })
  }

  fn token_at(&self, pos: usize) -> Option<&Token> {
    self.tokens.get(pos)
  }

  /// Matches a fixed token. A position past the end of the sequence fails
  /// the expectation like any other mismatch.
  fn expect(&self, pos: usize, kind: TokenKind) -> Option<()> {
    match self.token_at(pos) {
      Some(token) if token.kind == kind => Some(()),
      _ => None,
    }
  }

  fn expect_text(&self, pos: usize, kind: TokenKind) -> Option<String> {
    match self.token_at(pos) {
      Some(token) if token.kind == kind => Some(token.text.clone()),
      _ => None,
    }
  }

  /// Closed mapping from an already-classified `BasicType` token to the
  /// type it names; any other text fails the surrounding rule.
  fn basic_type_at(&self, pos: usize) -> Option<BasicType> {
    let token = self.token_at(pos)?;
    if token.kind != T::BasicType {
      return None;
    }
    match token.text.as_str() {
      "u8" => Some(BasicType::U8),
      "u32" => Some(BasicType::U32),
      "nil" => Some(BasicType::Nil),
      _ => None,
    }
  }
}

#[cfg(debug_assertions)]
static INIT: Once = Once::new();

#[cfg(debug_assertions)]
fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}
