mod common;
use common::*;

#[test]
fn test_precedence() {
    assert_eq!(exec("print(2 + 3 * 4);"), "14\n");
    assert_eq!(exec("print((2 + 3) * 4);"), "20\n");
    assert_eq!(exec("print(10 - 4 - 3);"), "3\n");
    assert_eq!(exec("print(100 / 10 / 5);"), "2\n");
}

#[test]
fn test_unary_negate() {
    assert_eq!(exec("print(~3 + 1);"), "-2\n");
    assert_eq!(exec("print(~~5);"), "5\n");
    assert_eq!(exec("print(2 * ~(1 + 2));"), "-6\n");
}

#[test]
fn test_division_truncates() {
    assert_eq!(exec("print(7 / 2); print(~7 / 2);"), "3\n-3\n");
}

#[test]
fn test_comparisons() {
    assert_eq!(exec("print(3 > 2); print(3 < 2); print(2 == 2);"), "1\n0\n1\n");
    assert_eq!(exec("print(1 + 1 > 1);"), "1\n");
}

#[test]
fn test_logic() {
    assert_eq!(exec("print(1 & 0 | 1);"), "1\n");
    assert_eq!(exec("print(1 | 0 & 0);"), "1\n");
    assert_eq!(exec("print(!0); print(!5);"), "1\n0\n");
    assert_eq!(exec("print(!(1 > 2) & 3);"), "1\n");
    assert_eq!(exec("print(5 & 7);"), "1\n");
}

#[test]
fn test_not_applies_to_whole_comparison() {
    // !0 > 5 is !(0 > 5)
    assert_eq!(exec("print(!0 > 5);"), "1\n");
    assert_eq!(exec("print(!0 + 1);"), "0\n");
    assert_eq!(exec("print(!3 == 3 | 0);"), "0\n");
}

#[test]
fn test_arithmetic_faults() {
    assert_eq!(
        exec("int a; a = 5/0;"),
        "Runtime error at line 1, position 14: division by zero: 5 / 0 (pc 2)\n"
    );
    assert_eq!(
        exec("int a = 2147483647; a = a + 1;"),
        "Runtime error at line 1, position 29: integer overflow: 2147483647 + 1 (pc 4)\n"
    );
}
