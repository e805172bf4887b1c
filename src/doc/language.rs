/*!
# The Integer Language

Programs are a sequence of statements. There is one data type, the
32-bit signed integer, held either in a scalar variable or in a
fixed-size array. Every name must be declared before it is used and
may only be declared once.

```text
int a;              // scalar, starts at 0
int b = a + 1;      // scalar with an initial value
int c[b];           // array of b elements, all 0
int d[3] = {1, 2};  // array with leading elements initialized
```

Names start with a letter or underbar followed by letters, digits
and underbars. The words `int if else while read print` are reserved.
Everything after `//` up to the end of the line is a comment.

## Statements

```text
a = expr;
c[expr] = expr;
if (cond) { ... } else { ... }
while (cond) { ... }
read(a);
read(c[expr]);
print(cond);
```

The `else` part is optional. `read` takes one integer from the input
and `print` writes one integer to the output.

## Expressions

From loosest to tightest binding:

 * `|` logical OR
 * `&` logical AND
 * `!` logical NOT
 * `>` `<` `==` comparison, at most one per operand pair
 * `+` `-`
 * `*` `/`
 * `~` unary negate

Comparisons and logic produce 1 for true and 0 for false. Any nonzero
value is true. `a < b < c` is rejected; write `a < b & b < c`.

Division truncates toward zero. Division by zero, arithmetic overflow
and array subscripts outside `0..size` stop the program with a
runtime error.

## Errors

Every error names its kind and, when known, where it happened.

```text
Semantic error at line 3, position 7: undeclared identifier: 'x'
Runtime error at line 1, position 14: division by zero: 5 / 0 (pc 2)
```

*/
