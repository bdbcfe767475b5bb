//! Claim field validation
//!
//! Diagnosis codes follow the ICD-10 shape (`A12` or `A12.3456`),
//! procedure codes the five-digit CPT shape. Amounts are bounded to the
//! range the original intake accepted.

use rust_decimal::Decimal;

use crate::error::ClaimError;

const MIN_AMOUNT: Decimal = Decimal::ONE;
const MAX_AMOUNT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Validates an ICD-10 diagnosis code: an uppercase letter, two digits,
/// and an optional dot followed by one to four digits.
pub fn validate_diagnosis_code(code: &str) -> Result<(), ClaimError> {
    let invalid = || ClaimError::InvalidDiagnosisCode(code.to_owned());

    let bytes = code.as_bytes();
    let (head, rest) = match bytes {
        [letter, d1, d2, rest @ ..]
            if letter.is_ascii_uppercase() && d1.is_ascii_digit() && d2.is_ascii_digit() =>
        {
            (true, rest)
        }
        _ => (false, &[] as &[u8]),
    };
    if !head {
        return Err(invalid());
    }

    match rest {
        [] => Ok(()),
        [b'.', fraction @ ..]
            if (1..=4).contains(&fraction.len())
                && fraction.iter().all(u8::is_ascii_digit) =>
        {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Validates a CPT procedure code: exactly five digits
pub fn validate_procedure_code(code: &str) -> Result<(), ClaimError> {
    let bytes = code.as_bytes();
    if bytes.len() == 5 && bytes.iter().all(u8::is_ascii_digit) {
        Ok(())
    } else {
        Err(ClaimError::InvalidProcedureCode(code.to_owned()))
    }
}

/// Validates a claim amount: between 1 and 10,000,000 inclusive
pub fn validate_amount(amount: Decimal) -> Result<(), ClaimError> {
    if amount < MIN_AMOUNT || amount > MAX_AMOUNT {
        return Err(ClaimError::InvalidAmount(amount));
    }
    Ok(())
}
