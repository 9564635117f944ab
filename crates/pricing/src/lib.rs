pub mod analysis;
pub mod calculator;
pub mod quote;
pub mod snapshot;

pub use calculator::{calculate_monthly_price, price_matrix, PriceBreakdown, QuoteInput};
pub use quote::{Quote, QuoteRequest, QuoteService};
pub use snapshot::{PricingSnapshot, SnapshotPayload, SnapshotPublisher};
