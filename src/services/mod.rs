pub mod auth_service;
pub mod invoice_service;
pub mod ledger_service;
pub mod partner_request_service;
pub mod partner_service;
pub mod product_service;
pub mod settings_service;
pub mod survey_service;
pub mod withdrawal_service;

pub use auth_service::*;
pub use invoice_service::*;
pub use ledger_service::*;
pub use partner_request_service::*;
pub use partner_service::*;
pub use product_service::*;
pub use settings_service::*;
pub use survey_service::*;
pub use withdrawal_service::*;
