pub mod affiliate_code;
pub mod jwt;
pub mod password;
pub mod phone;

pub use affiliate_code::{generate_unique_affiliate_code, generate_unique_invoice_number};
pub use jwt::*;
pub use password::*;
pub use phone::*;
