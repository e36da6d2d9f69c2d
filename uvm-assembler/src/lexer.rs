//! # Lexer for UVM Assembly Language

use logos::Logos;
use std::fmt;

/// Tokens for UVM assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip comments
pub enum Token {
    /// Register (R0, r17, ...); range is checked against the table later
    #[regex(r"[Rr][0-9]+", |lex| lex.slice()[1..].parse::<u64>().ok(), priority = 3)]
    Register(u64),

    /// Identifier (instruction mnemonics)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal number
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(u64),

    /// Comma
    #[token(",")]
    Comma,

    /// Plus (inside memory expressions)
    #[token("+")]
    Plus,

    /// Left bracket
    #[token("[")]
    LBracket,

    /// Right bracket
    #[token("]")]
    RBracket,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Register(index) => write!(f, "register R{}", index),
            Token::Identifier(name) => write!(f, "identifier `{}`", name),
            Token::Number(value) => write!(f, "number {}", value),
            Token::Comma => f.write_str("`,`"),
            Token::Plus => f.write_str("`+`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
        }
    }
}
