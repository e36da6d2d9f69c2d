//! Tests for malformed input handling in the assembler
//!
//! Tests error handling for various invalid inputs.

use uvm_assembler::{assemble, AssemblerError};

// ============================================================================
// Invalid Instruction Tests
// ============================================================================

#[test]
fn test_unknown_instruction() {
    let source = "FOO R1, 1";
    let result = assemble(source);

    if let Err(AssemblerError::UnknownInstruction { line, mnemonic }) = result {
        assert_eq!(line, 1);
        assert_eq!(mnemonic, "FOO");
    } else {
        panic!("Expected UnknownInstruction error");
    }
}

#[test]
fn test_unknown_instruction_after_valid_lines() {
    let source = r#"
        LOAD_CONST R1, 100
        LOAD_CONST R2, 200
        FOO R1, 1
    "#;
    let err = assemble(source).unwrap_err();
    assert!(matches!(err, AssemblerError::UnknownInstruction { line: 4, .. }));
}

#[test]
fn test_instruction_typo() {
    let source = "LOAD_CONTS R1, 1";
    assert!(matches!(
        assemble(source),
        Err(AssemblerError::UnknownInstruction { .. })
    ));
}

#[test]
fn test_syntax_checked_before_mnemonic() {
    // operands are parsed before the mnemonic is looked up
    let source = "FOO [R1 + ";
    assert!(matches!(assemble(source), Err(AssemblerError::SyntaxError { .. })));
}

// ============================================================================
// Invalid Operand Count Tests
// ============================================================================

#[test]
fn test_equal_with_two_operands() {
    let result = assemble("EQUAL R3, R1");
    assert!(matches!(
        result,
        Err(AssemblerError::ArityError { expected: 3, found: 2, .. })
    ));
}

#[test]
fn test_equal_with_four_operands() {
    let result = assemble("EQUAL R3, R1, R2, R4");
    assert!(matches!(
        result,
        Err(AssemblerError::ArityError { expected: 3, found: 4, .. })
    ));
}

#[test]
fn test_equal_with_three_operands() {
    assert!(assemble("EQUAL R3, R1, R2").is_ok());
}

#[test]
fn test_load_const_missing_immediate() {
    assert!(matches!(
        assemble("LOAD_CONST R1"),
        Err(AssemblerError::ArityError { expected: 2, found: 1, .. })
    ));
}

#[test]
fn test_mnemonic_without_operands() {
    assert!(matches!(
        assemble("WRITE_MEM"),
        Err(AssemblerError::ArityError { found: 0, .. })
    ));
}

// ============================================================================
// Memory Expression Tests
// ============================================================================

#[test]
fn test_memory_expression_missing_plus() {
    assert!(matches!(
        assemble("READ_MEM R4, [R1 0]"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

#[test]
fn test_memory_expression_missing_brackets() {
    assert!(assemble("READ_MEM R4, R1 + 0").is_err());
}

#[test]
fn test_memory_expression_unclosed() {
    assert!(matches!(
        assemble("WRITE_MEM R4, [R1 + 0"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

#[test]
fn test_memory_expression_offset_first() {
    assert!(assemble("READ_MEM R4, [0 + R1]").is_err());
}

#[test]
fn test_memory_expression_where_register_expected() {
    assert!(matches!(
        assemble("EQUAL [R1 + 0], R2, R3"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

// ============================================================================
// Invalid Register Tests
// ============================================================================

#[test]
fn test_register_out_of_range() {
    assert!(matches!(
        assemble("EQUAL R256, R1, R2"),
        Err(AssemblerError::InvalidRegister { index: 256, .. })
    ));
}

#[test]
fn test_wide_register_field_still_limited_to_255() {
    // LOAD_CONST reserves two bytes for the register, but only 256 exist
    assert!(matches!(
        assemble("LOAD_CONST R1000, 1"),
        Err(AssemblerError::InvalidRegister { index: 1000, .. })
    ));
}

#[test]
fn test_invalid_register_name() {
    assert!(assemble("EQUAL X1, R1, R2").is_err());
}

#[test]
fn test_negative_register() {
    assert!(matches!(
        assemble("EQUAL R-1, R1, R2"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

// ============================================================================
// Invalid Immediate Tests
// ============================================================================

#[test]
fn test_non_numeric_immediate() {
    assert!(assemble("LOAD_CONST R1, abc").is_err());
}

#[test]
fn test_negative_immediate() {
    assert!(matches!(
        assemble("LOAD_CONST R1, -5"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

#[test]
fn test_floating_point_immediate() {
    assert!(assemble("LOAD_CONST R1, 3.14").is_err());
}

#[test]
fn test_immediate_too_large() {
    assert!(matches!(
        assemble("LOAD_CONST R1, 4294967296"),
        Err(AssemblerError::OperandOutOfRange { .. })
    ));
}

#[test]
fn test_immediate_beyond_u64() {
    assert!(matches!(
        assemble("LOAD_CONST R1, 99999999999999999999999"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

#[test]
fn test_offset_too_large() {
    assert!(matches!(
        assemble("READ_MEM R1, [R2 + 70000]"),
        Err(AssemblerError::OperandOutOfRange { field: "offset", .. })
    ));
}

// ============================================================================
// Error Reporting
// ============================================================================

#[test]
fn test_error_line_numbers() {
    let source = "LOAD_CONST R1, 1\n# comment\n\nEQUAL R1, R2";
    let err = assemble(source).unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().contains("line 4"));
}

#[test]
fn test_syntax_error_column() {
    let err = assemble("LOAD_CONST R1, $5").unwrap_err();
    assert!(matches!(err, AssemblerError::SyntaxError { line: 1, column: 16, .. }));
}
