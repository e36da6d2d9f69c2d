//! Assembly parser
//!
//! Turns one source line into a mnemonic and a list of operand tokens.
//! Errors raised here carry line 0; [`crate::assemble`] fills in the real
//! line number.

use logos::Logos;
use uvm_spec::{Instruction, OperandKind, Register};

use crate::encoder::resolve;
use crate::error::{AssemblerError, Result};
use crate::lexer::Token;

/// A resolved operand token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `R<n>`
    Register(u64),
    /// `<n>`
    Immediate(u64),
    /// `[R<base> + <offset>]`
    Memory { base: u64, offset: u64 },
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::Immediate(_) => OperandKind::Immediate,
            Operand::Memory { .. } => OperandKind::Memory,
        }
    }
}

/// An operand and the 1-based column it starts at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedOperand {
    pub operand: Operand,
    pub column: usize,
}

/// One tokenized, not yet validated, instruction line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub mnemonic: String,
    pub operands: Vec<ParsedOperand>,
}

impl ParsedLine {
    pub fn operand_values(&self) -> impl Iterator<Item = Operand> + '_ {
        self.operands.iter().map(|p| p.operand)
    }
}

fn syntax_error(column: usize, message: impl Into<String>) -> AssemblerError {
    AssemblerError::SyntaxError {
        line: 0,
        column,
        message: message.into(),
    }
}

/// Lex a line into tokens paired with their 1-based columns
fn tokenize(text: &str) -> Result<Vec<(Token, usize)>> {
    let mut lex = Token::lexer(text);
    let mut tokens = Vec::new();
    while let Some(token) = lex.next() {
        let column = lex.span().start + 1;
        match token {
            Ok(token) => tokens.push((token, column)),
            Err(()) => {
                return Err(syntax_error(
                    column,
                    format!("unexpected token `{}`", lex.slice()),
                ))
            }
        }
    }
    Ok(tokens)
}

/// Parse a single line. Returns `None` for blank or comment-only lines.
pub fn parse_line(text: &str) -> Result<Option<ParsedLine>> {
    let mut tokens = tokenize(text)?.into_iter();

    let mnemonic = match tokens.next() {
        None => return Ok(None),
        Some((Token::Identifier(name), _)) => name,
        Some((token, column)) => {
            return Err(syntax_error(
                column,
                format!("expected instruction mnemonic, found {}", token),
            ))
        }
    };

    let mut operands = Vec::new();
    while let Some((token, column)) = tokens.next() {
        let operand = match token {
            Token::Comma => continue,
            Token::Register(index) => Operand::Register(index),
            Token::Number(value) => Operand::Immediate(value),
            Token::LBracket => parse_memory_expression(&mut tokens, column)?,
            other => return Err(syntax_error(column, format!("unexpected {}", other))),
        };
        operands.push(ParsedOperand { operand, column });
    }

    Ok(Some(ParsedLine { mnemonic, operands }))
}

/// Parse the remainder of `[R<base> + <offset>]` after the opening bracket
fn parse_memory_expression(
    tokens: &mut impl Iterator<Item = (Token, usize)>,
    open_column: usize,
) -> Result<Operand> {
    let mut expect = |what: &str| {
        tokens.next().ok_or_else(|| {
            syntax_error(
                open_column,
                format!("malformed memory expression: unclosed `[`, expected {}", what),
            )
        })
    };

    let base = match expect("base register")? {
        (Token::Register(index), _) => index,
        (token, column) => {
            return Err(syntax_error(
                column,
                format!("malformed memory expression: expected base register, found {}", token),
            ))
        }
    };

    match expect("`+`")? {
        (Token::Plus, _) => {}
        (token, column) => {
            return Err(syntax_error(
                column,
                format!("malformed memory expression: expected `+`, found {}", token),
            ))
        }
    }

    let offset = match expect("offset")? {
        (Token::Number(value), _) => value,
        (token, column) => {
            return Err(syntax_error(
                column,
                format!("malformed memory expression: expected offset, found {}", token),
            ))
        }
    };

    match expect("`]`")? {
        (Token::RBracket, _) => Ok(Operand::Memory { base, offset }),
        (token, column) => Err(syntax_error(
            column,
            format!("malformed memory expression: expected `]`, found {}", token),
        )),
    }
}

/// Parse and resolve a single instruction from assembly text
pub fn parse_instruction(text: &str) -> Result<Instruction> {
    match parse_line(text)? {
        Some(line) => resolve(&line),
        None => Err(syntax_error(1, "empty instruction")),
    }
}

/// Parse register name
pub fn parse_register(name: &str) -> Result<Register> {
    let tokens = tokenize(name)?;
    match tokens.as_slice() {
        [(Token::Register(index), _)] => u8::try_from(*index)
            .map(Register::new)
            .map_err(|_| AssemblerError::InvalidRegister { line: 0, index: *index }),
        _ => Err(syntax_error(1, format!("invalid register `{}`", name.trim()))),
    }
}
