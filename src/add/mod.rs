//! Correlation-aware addition of two loosely typed numbers
//!
//! [`add_two_numbers`] coerces both operands to arbitrary-precision
//! integers, adds them and logs every step under a correlation ID.
//!
//! ```
//! use addnums::add::{add_two_numbers, BigInt};
//!
//! assert_eq!(add_two_numbers("10", 20, Some("req-1")), Ok(BigInt::from(30)));
//! assert!(add_two_numbers("ten", 20, Some("req-1")).is_err());
//! ```

pub mod correlation;
mod operand;

pub use correlation::{default_correlation_id, LogPrefixes, CORRELATION_ID_ENV};
pub use num_bigint::BigInt;
pub use operand::{AddError, Operand, Position};

use tracing::{error, info};

/// Add two values after converting each to an integer.
///
/// `correlation_id` of `None` uses the process default
/// ([`default_correlation_id`]); `Some("")` logs without any prefix.
///
/// Logs two info lines up front, then either a success line or a single
/// conversion error line. Failure is only ever reported through the
/// returned error; the sum itself cannot fail.
pub fn add_two_numbers(
    num1: impl Into<Operand>,
    num2: impl Into<Operand>,
    correlation_id: Option<&str>,
) -> Result<BigInt, AddError> {
    let num1 = num1.into();
    let num2 = num2.into();
    let prefixes = LogPrefixes::for_id(correlation::resolve(correlation_id));

    info!(
        "{}Function `add_two_numbers` called with num1={}, num2={}.",
        prefixes.info, num1, num2
    );
    info!("{}Attempting to convert inputs to integers.", prefixes.info);

    let (lhs, rhs) = match convert_both(&num1, &num2) {
        Ok(pair) => pair,
        Err(e) => {
            error!(
                "{}Failed to convert inputs to numbers. Details: {}",
                prefixes.error, e
            );
            return Err(e);
        }
    };

    let sum = &lhs + &rhs;
    info!(
        "{}Successfully added {} and {}. Result: {}",
        prefixes.info, lhs, rhs, sum
    );
    Ok(sum)
}

fn convert_both(num1: &Operand, num2: &Operand) -> Result<(BigInt, BigInt), AddError> {
    let lhs = num1.to_integer(Position::First)?;
    let rhs = num2.to_integer(Position::Second)?;
    Ok((lhs, rhs))
}
