//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs con `validator` para campos
//! que el derive no cubre (importes decimales, textos obligatorios).

use num_traits::Zero;
use validator::ValidationError;

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive<T>(value: &T) -> Result<(), ValidationError>
where
    T: PartialOrd + Zero + std::fmt::Display,
{
    if *value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.message = Some(format!("value must be positive, got {}", value).into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe no sea negativo (cero permitido)
pub fn validate_non_negative<T>(value: &T) -> Result<(), ValidationError>
where
    T: PartialOrd + Zero + std::fmt::Display,
{
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some(format!("value must not be negative, got {}", value).into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté en blanco
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(&Decimal::new(100, 2)).is_ok());
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::new(-5, 0)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(250, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("customer request").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
