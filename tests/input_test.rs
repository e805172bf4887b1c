mod common;
use common::*;

#[test]
fn test_read_scalar() {
    assert_eq!(exec_input("int x; read(x); print(x * 2);", "21"), "42\n");
}

#[test]
fn test_read_elements() {
    let program = r#"
        int n;
        read(n);
        int a[n];
        int i = 0;
        int sum = 0;
        while (i < n) {
            read(a[i]);
            sum = sum + a[i];
            i = i + 1;
        }
        print(sum);
    "#;
    assert_eq!(exec_input(program, "4\n1 2 3 -4"), "2\n");
}

#[test]
fn test_read_past_end() {
    assert_eq!(
        exec_input("int x; read(x); print(x); read(x);", "3"),
        "3\nRuntime error at line 1, position 32: malformed input: end of input (pc 3)\n"
    );
}

#[test]
fn test_malformed_input() {
    assert_eq!(
        exec_input("int x; read(x);", "x"),
        "Runtime error: malformed input: 'x'\n"
    );
}

#[test]
fn test_read_out_of_bounds_does_not_consume() {
    assert_eq!(
        exec_input("int a[1]; read(a[1]);", "9"),
        "Runtime error at line 1, position 19: array index out of bounds: a[1] with size 1 (pc 3)\n"
    );
}
