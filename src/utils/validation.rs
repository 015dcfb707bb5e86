//! Utilidades de validación
//!
//! Funciones helper de validación que los servicios reutilizan como
//! defensa en profundidad, además de la validación de los DTOs.

use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que el mes de pago esté en el rango del calendario
pub fn validate_payment_month(month: i32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        let mut error = ValidationError::new("payment_month");
        error.add_param("value".into(), &month);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Rocinante").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_payment_month() {
        assert!(validate_payment_month(1).is_ok());
        assert!(validate_payment_month(12).is_ok());
        assert!(validate_payment_month(0).is_err());
        assert!(validate_payment_month(13).is_err());
    }
}
