pub mod config;
pub mod error;
pub mod money;

pub use config::AppConfig;
pub use error::{PricingError, PricingResult};
pub use money::Money;
