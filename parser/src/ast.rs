use serde::Serialize;

use crate::internal::*;

/// The one capability shared by every AST node: how many tokens its source
/// span occupies. Callers advance past a sub-parse by exactly this amount,
/// so each impl must account for every token its grammar rule consumed.
pub trait TokenLen {
  fn token_len(&self) -> usize;
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Program {
  pub globals: Vec<GlobalStatement>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub enum GlobalStatement {
  Procedure(ProcedureDefinition),
  StaticVar(StaticVarDefinition),
}

/// `proc NAME ( Parameters ) -> BasicType Block`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ProcedureDefinition {
  pub name: String,
  pub parameters: Parameters,
  pub return_type: BasicType,
  pub body: Block,
}

/// `staticvar NAME : BasicType ;`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StaticVarDefinition {
  pub name: String,
  pub ty: BasicType,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Parameters {
  pub params: Vec<Parameter>,
}

/// `NAME : BasicType`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
  pub name: String,
  pub ty: BasicType,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Block {
  pub statements: Vec<Statement>,
}

/// A statement is an expression terminated by `;`. Nothing downstream
/// consumes the expression yet; parsing validates it and records the span.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Statement {
  pub expr: Expression,
  // TODO: a `Statement := 'return' Expression ';'` rule; the `return`
  // keyword lexes but no production consumes it, so this is never set
  pub is_return: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub enum Expression {
  Assignment(Assignment),
  Sum(Sum),
  Sub(Sub),
  Term(Term),
}

/// `NAME := Expression`
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
  pub target: String,
  pub value: Box<Expression>,
}

/// `Term + Expression` — right-recursive, so `a+b+c` groups as `a+(b+c)`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Sum {
  pub left: Term,
  pub right: Box<Expression>,
}

/// `Term - Expression`, grouped like `Sum`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Sub {
  pub left: Term,
  pub right: Box<Expression>,
}

/// An optionally negated/complemented primary.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Term {
  pub op: Option<UnaryOp>,
  pub primary: Primary,
}

/// A single identifier or numeric-literal token.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Primary {
  pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
  Plus,
  Minus,
  Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BasicType {
  U8,
  U32,
  Nil,
}

impl TokenLen for Program {
  fn token_len(&self) -> usize {
    self.globals.iter().map(TokenLen::token_len).sum()
  }
}

impl TokenLen for GlobalStatement {
  fn token_len(&self) -> usize {
    match self {
      GlobalStatement::Procedure(proc) => proc.token_len(),
      GlobalStatement::StaticVar(var) => var.token_len(),
    }
  }
}

impl TokenLen for ProcedureDefinition {
  // `proc`, name, `(`, `)`, `->`, type
  fn token_len(&self) -> usize {
    6 + self.parameters.token_len() + self.body.token_len()
  }
}

impl TokenLen for StaticVarDefinition {
  // `staticvar`, name, `:`, type, `;`
  fn token_len(&self) -> usize {
    5
  }
}

impl TokenLen for Parameters {
  // the separating commas, not the enclosing parens
  fn token_len(&self) -> usize {
    let params: usize = self.params.iter().map(TokenLen::token_len).sum();
    params + self.params.len().saturating_sub(1)
  }
}

impl TokenLen for Parameter {
  // name, `:`, type
  fn token_len(&self) -> usize {
    3
  }
}

impl TokenLen for Block {
  fn token_len(&self) -> usize {
    let statements: usize = self.statements.iter().map(TokenLen::token_len).sum();
    2 + statements
  }
}

impl TokenLen for Statement {
  fn token_len(&self) -> usize {
    self.expr.token_len() + 1
  }
}

impl TokenLen for Expression {
  fn token_len(&self) -> usize {
    match self {
      Expression::Assignment(assignment) => assignment.token_len(),
      Expression::Sum(sum) => sum.token_len(),
      Expression::Sub(sub) => sub.token_len(),
      Expression::Term(term) => term.token_len(),
    }
  }
}

impl TokenLen for Assignment {
  fn token_len(&self) -> usize {
    2 + self.value.token_len()
  }
}

impl TokenLen for Sum {
  fn token_len(&self) -> usize {
    self.left.token_len() + 1 + self.right.token_len()
  }
}

impl TokenLen for Sub {
  fn token_len(&self) -> usize {
    self.left.token_len() + 1 + self.right.token_len()
  }
}

impl TokenLen for Term {
  fn token_len(&self) -> usize {
    self.primary.token_len() + usize::from(self.op.is_some())
  }
}

impl TokenLen for Primary {
  fn token_len(&self) -> usize {
    1
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::internal::TokenKind as T;

  fn ident_term(name: &str) -> Term {
    Term {
      op: None,
      primary: Primary { token: Token::new(T::Id, name) },
    }
  }

  #[test]
  fn leaf_and_term_lengths() {
    assert_eq!(ident_term("a").token_len(), 1);
    let negated = Term {
      op: Some(UnaryOp::Minus),
      primary: Primary { token: Token::new(T::NumericLiteral, "3") },
    };
    assert_eq!(negated.token_len(), 2);
  }

  #[test]
  fn composite_expression_lengths() {
    // a + ~b — 4 tokens
    let sum = Sum {
      left: ident_term("a"),
      right: Box::new(Expression::Term(Term {
        op: Some(UnaryOp::Not),
        primary: Primary { token: Token::new(T::Id, "b") },
      })),
    };
    assert_eq!(sum.token_len(), 4);

    // x := a + ~b — 6 tokens
    let assignment = Assignment {
      target: "x".to_owned(),
      value: Box::new(Expression::Sum(sum)),
    };
    assert_eq!(assignment.token_len(), 6);
  }

  #[test]
  fn declaration_lengths() {
    let var = StaticVarDefinition { name: "x".to_owned(), ty: BasicType::U32 };
    assert_eq!(var.token_len(), 5);

    // two parameters, one comma: 3 + 1 + 3
    let parameters = Parameters {
      params: vec![
        Parameter { name: "a".to_owned(), ty: BasicType::U8 },
        Parameter { name: "b".to_owned(), ty: BasicType::U32 },
      ],
    };
    assert_eq!(parameters.token_len(), 7);
    assert_eq!(Parameters { params: vec![] }.token_len(), 0);

    // empty body is just the two braces
    let proc = ProcedureDefinition {
      name: "f".to_owned(),
      parameters,
      return_type: BasicType::Nil,
      body: Block { statements: vec![] },
    };
    assert_eq!(proc.token_len(), 6 + 7 + 2);
  }

  #[test]
  fn block_length_sums_statements() {
    let block = Block {
      statements: vec![
        Statement {
          expr: Expression::Term(ident_term("a")),
          is_return: false,
        },
        Statement {
          expr: Expression::Term(ident_term("b")),
          is_return: false,
        },
      ],
    };
    assert_eq!(block.token_len(), 2 + 2 + 2);
  }
}
