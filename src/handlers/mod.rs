pub mod admin;
pub mod auth;
pub mod invoice;
pub mod ledger;
pub mod partner;
pub mod product;
pub mod settings;
pub mod survey;

pub use admin::admin_config;
pub use auth::auth_config;
pub use invoice::invoice_config;
pub use ledger::ledger_config;
pub use partner::partner_config;
pub use product::product_config;
pub use settings::settings_config;
pub use survey::survey_config;
