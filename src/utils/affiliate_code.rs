use crate::entities::{invoice_entity as invoices, partner_entity as partners};
use crate::error::AppResult;
use chrono::Utc;
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

// No 0/O or 1/I, the codes get read out loud over WhatsApp.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn random_affiliate_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("MTR-{suffix}")
}

fn random_invoice_number() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!("INV-{}-{}", Utc::now().format("%Y%m%d"), suffix)
}

/// Generate an affiliate code not yet taken by any partner.
pub async fn generate_unique_affiliate_code(pool: &DatabaseConnection) -> AppResult<String> {
    loop {
        let code = random_affiliate_code();

        let exists = partners::Entity::find()
            .filter(partners::Column::AffiliateCode.eq(code.clone()))
            .count(pool)
            .await?;

        if exists == 0 {
            return Ok(code);
        }
    }
}

/// Generate an invoice number not yet present in the invoices table.
pub async fn generate_unique_invoice_number(pool: &DatabaseConnection) -> AppResult<String> {
    loop {
        let number = random_invoice_number();

        let exists = invoices::Entity::find()
            .filter(invoices::Column::InvoiceNumber.eq(number.clone()))
            .count(pool)
            .await?;

        if exists == 0 {
            return Ok(number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_affiliate_code_format() {
        let re = Regex::new(r"^MTR-[A-HJ-NP-Z2-9]{6}$").unwrap();
        for _ in 0..50 {
            let code = random_affiliate_code();
            assert!(re.is_match(&code), "unexpected code format: {code}");
        }
    }

    #[test]
    fn test_invoice_number_format() {
        let re = Regex::new(r"^INV-\d{8}-\d{4}$").unwrap();
        let number = random_invoice_number();
        assert!(re.is_match(&number), "unexpected invoice number: {number}");
    }
}
