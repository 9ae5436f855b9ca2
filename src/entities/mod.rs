pub mod app_settings;
pub mod invoices;
pub mod partner_requests;
pub mod partners;
pub mod products;
pub mod survey_schedules;
pub mod transactions;

pub use app_settings as app_setting_entity;
pub use invoices as invoice_entity;
pub use partner_requests as partner_request_entity;
pub use partners as partner_entity;
pub use products as product_entity;
pub use survey_schedules as survey_schedule_entity;
pub use transactions as transaction_entity;

pub use invoices::InvoiceStatus;
pub use partner_requests::{PartnerRequestStatus, PartnerRequestType};
pub use partners::{PartnerRole, PartnerStatus};
pub use survey_schedules::SurveyStatus;
pub use transactions::{TransactionStatus, TransactionType};
