use crate::internal::*;

/// Token stream interchange: a JSON array of `{"type", "value"}` records,
/// one per token, in stream order.
pub fn dump_tokens(tokens: &[Token]) -> Result<String, serde_json::Error> {
  serde_json::to_string_pretty(tokens)
}

/// Reads a token stream back from its interchange form. A structurally
/// malformed document or a record whose `type` names no known token kind
/// is an error; callers treat it as fatal.
pub fn load_tokens(json: &str) -> Result<Vec<Token>, serde_json::Error> {
  serde_json::from_str(json)
}

/// AST dump for the driver. The grammar reference left this boundary
/// unspecified; the format here is the serde projection of the AST types,
/// one JSON object per node with enum variants as tags.
pub fn dump_ast(program: &Program) -> Result<String, serde_json::Error> {
  serde_json::to_string_pretty(program)
}
