pub mod batch;
pub mod quote;
pub mod settings;

pub use batch::BatchPage;
pub use quote::QuotePage;
pub use settings::SettingsPage;
