use crate::error::{AppError, AppResult};
use regex::Regex;

/// Validate an Indonesian mobile number in international form
/// (+628xxxxxxxxx, 9 to 13 digits after the country code).
pub fn validate_id_phone(phone: &str) -> AppResult<()> {
    let phone_regex = Regex::new(r"^\+628\d{8,12}$").unwrap();

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected Indonesian mobile format (+628xxxxxxxxx)".to_string(),
        ));
    }

    Ok(())
}

/// Normalize the common local spellings (08..., 628..., +62 8...) to +628...
pub fn format_id_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("62") {
        format!("+62{rest}")
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("+62{rest}")
    } else {
        phone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_phone() {
        assert!(validate_id_phone("+6281234567890").is_ok());
        assert!(validate_id_phone("+62812345").is_err()); // too short
        assert!(validate_id_phone("081234567890").is_err()); // local form
        assert!(validate_id_phone("+6581234567890").is_err()); // wrong country
    }

    #[test]
    fn test_format_id_phone() {
        assert_eq!(format_id_phone("081234567890"), "+6281234567890");
        assert_eq!(format_id_phone("6281234567890"), "+6281234567890");
        assert_eq!(format_id_phone("+62 812-3456-7890"), "+6281234567890");
    }
}
