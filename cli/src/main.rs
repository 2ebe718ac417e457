//! `lute` — the Lute language front-end driver.
//!
//! ```text
//! lute tokenize <source_file> [dest]   # Lex a source file into tokens JSON
//! lute parse <tokens_file> [dest]      # Build an AST from a tokens JSON file
//! ```

use std::fs;
use std::process;

use lute_parser::interchange;
use lute_parser::lexer::Lexer;
use lute_parser::parser::Parser;

const DEFAULT_TOKENS_FILE: &str = "lute.tokens.json";
const DEFAULT_AST_FILE: &str = "lute.ast.json";

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args: Vec<String> = std::env::args().collect();
  if args.len() < 3 {
    print_usage();
    process::exit(1);
  }

  let dest = args.get(3).map(String::as_str);
  match args[1].as_str() {
    "tokenize" | "t" => cmd_tokenize(&args[2], dest),
    "parse" | "p" => cmd_parse(&args[2], dest),
    _ => {
      print_usage();
      process::exit(1);
    }
  }
}

fn cmd_tokenize(source_path: &str, dest: Option<&str>) {
  let source = read_file(source_path);
  let tokens = Lexer::new(source).tokenize();
  let json = match interchange::dump_tokens(&tokens) {
    Ok(json) => json,
    Err(err) => fatal(&format!("could not serialize tokens: {err}")),
  };
  let dest = dest.unwrap_or(DEFAULT_TOKENS_FILE);
  write_file(dest, &json);
  println!("wrote {} tokens to `{dest}`", tokens.len());
}

fn cmd_parse(tokens_path: &str, dest: Option<&str>) {
  let json = read_file(tokens_path);
  let tokens = match interchange::load_tokens(&json) {
    Ok(tokens) => tokens,
    Err(err) => fatal(&format!("could not load tokens from `{tokens_path}`: {err}")),
  };

  let parser = Parser::new(tokens);
  let Some(program) = parser.parse_program() else {
    // the parser reports no position or cause, only that no AST was produced
    fatal("parse failed: no AST produced");
  };

  let json = match interchange::dump_ast(&program) {
    Ok(json) => json,
    Err(err) => fatal(&format!("could not serialize AST: {err}")),
  };
  let dest = dest.unwrap_or(DEFAULT_AST_FILE);
  write_file(dest, &json);
  println!("wrote AST to `{dest}`");
}

fn read_file(path: &str) -> String {
  match fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(err) => fatal(&format!("could not read `{path}`: {err}")),
  }
}

fn write_file(path: &str, contents: &str) {
  if let Err(err) = fs::write(path, contents) {
    fatal(&format!("could not write `{path}`: {err}"));
  }
}

fn fatal(msg: &str) -> ! {
  eprintln!("error: {msg}");
  process::exit(1);
}

fn print_usage() {
  eprintln!("lute — Lute language front end\n");
  eprintln!("Usage:");
  eprintln!("  lute tokenize <source_file> [dest]   lex a source file into tokens JSON");
  eprintln!("                                       (default dest: {DEFAULT_TOKENS_FILE})");
  eprintln!("  lute parse <tokens_file> [dest]      build an AST from a tokens JSON file");
  eprintln!("                                       (default dest: {DEFAULT_AST_FILE})");
}
