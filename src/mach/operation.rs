use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Checked integer operations
///
/// Arithmetic faults instead of wrapping. Comparisons and logic
/// produce 1 for true and 0 for false; any nonzero operand is true.

pub struct Operation {}

impl Operation {
    pub fn negate(val: i32) -> Result<i32> {
        match val.checked_neg() {
            Some(n) => Ok(n),
            None => Err(error!(Overflow; format!("~{}", val))),
        }
    }

    pub fn sum(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_add(rhs) {
            Some(n) => Ok(n),
            None => Err(error!(Overflow; format!("{} + {}", lhs, rhs))),
        }
    }

    pub fn subtract(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_sub(rhs) {
            Some(n) => Ok(n),
            None => Err(error!(Overflow; format!("{} - {}", lhs, rhs))),
        }
    }

    pub fn multiply(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_mul(rhs) {
            Some(n) => Ok(n),
            None => Err(error!(Overflow; format!("{} * {}", lhs, rhs))),
        }
    }

    pub fn divide(lhs: i32, rhs: i32) -> Result<i32> {
        match lhs.checked_div(rhs) {
            Some(n) => Ok(n),
            None => {
                if rhs == 0 {
                    Err(error!(DivisionByZero; format!("{} / 0", lhs)))
                } else {
                    Err(error!(Overflow; format!("{} / {}", lhs, rhs)))
                }
            }
        }
    }

    fn truth(b: bool) -> i32 {
        if b {
            1
        } else {
            0
        }
    }

    pub fn greater(lhs: i32, rhs: i32) -> i32 {
        Operation::truth(lhs > rhs)
    }

    pub fn less(lhs: i32, rhs: i32) -> i32 {
        Operation::truth(lhs < rhs)
    }

    pub fn equal(lhs: i32, rhs: i32) -> i32 {
        Operation::truth(lhs == rhs)
    }

    pub fn and(lhs: i32, rhs: i32) -> i32 {
        Operation::truth(lhs != 0 && rhs != 0)
    }

    pub fn or(lhs: i32, rhs: i32) -> i32 {
        Operation::truth(lhs != 0 || rhs != 0)
    }

    pub fn not(val: i32) -> i32 {
        Operation::truth(val == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_division() {
        assert_eq!(Operation::divide(7, 2).unwrap(), 3);
        assert_eq!(Operation::divide(-7, 2).unwrap(), -3);
        assert_eq!(
            Operation::divide(5, 0).unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
        assert_eq!(
            Operation::divide(i32::min_value(), -1).unwrap_err().code(),
            ErrorCode::Overflow
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            Operation::sum(i32::max_value(), 1).unwrap_err().code(),
            ErrorCode::Overflow
        );
        assert_eq!(
            Operation::negate(i32::min_value()).unwrap_err().code(),
            ErrorCode::Overflow
        );
        assert_eq!(Operation::subtract(2, 5).unwrap(), -3);
        assert_eq!(Operation::multiply(-4, 5).unwrap(), -20);
    }

    #[test]
    fn test_logic() {
        assert_eq!(Operation::and(3, -1), 1);
        assert_eq!(Operation::and(3, 0), 0);
        assert_eq!(Operation::or(0, 0), 0);
        assert_eq!(Operation::or(0, 7), 1);
        assert_eq!(Operation::not(0), 1);
        assert_eq!(Operation::not(9), 0);
        assert_eq!(Operation::greater(2, 1), 1);
        assert_eq!(Operation::less(2, 1), 0);
        assert_eq!(Operation::equal(4, 4), 1);
    }
}
