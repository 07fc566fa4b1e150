//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Uses both custom validators and the `validator` crate for derive macros.

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    Ok(())
}

/// Validate water intake amount (in ml)
pub fn validate_water_amount(amount_ml: i32) -> Result<(), String> {
    if amount_ml <= 0 {
        return Err("Amount must be greater than 0".to_string());
    }
    if amount_ml > 10000 {
        return Err("Amount cannot exceed 10000ml".to_string());
    }
    Ok(())
}

/// Validate a daily step count
pub fn validate_steps(steps: u32) -> Result<(), String> {
    if steps > 200_000 {
        return Err("Step count unreasonably high".to_string());
    }
    Ok(())
}

/// Validate workout duration (in minutes)
pub fn validate_duration(minutes: i32) -> Result<(), String> {
    if minutes <= 0 {
        return Err("Duration must be greater than 0".to_string());
    }
    if minutes > 24 * 60 {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate goal text
pub fn validate_goal_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Goal text cannot be empty".to_string());
    }
    if text.len() > 200 {
        return Err("Goal text too long".to_string());
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    if value.is_nan() || value.is_infinite() {
        return Err("Percentage must be a valid number".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(80.0).is_ok());
        assert!(validate_weight(19.9).is_err());
        assert!(validate_weight(500.1).is_err());
        assert!(validate_weight(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_water_amount() {
        assert!(validate_water_amount(250).is_ok());
        assert!(validate_water_amount(0).is_err());
        assert!(validate_water_amount(10001).is_err());
    }

    #[test]
    fn test_validate_steps() {
        assert!(validate_steps(10_000).is_ok());
        assert!(validate_steps(200_001).is_err());
    }

    #[test]
    fn test_validate_duration() {
        assert!(validate_duration(45).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(24 * 60 + 1).is_err());
    }

    #[test]
    fn test_validate_goal_text() {
        assert!(validate_goal_text("Lose 5 kg").is_ok());
        assert!(validate_goal_text("   ").is_err());
        assert!(validate_goal_text(&"x".repeat(201)).is_err());
    }
}
