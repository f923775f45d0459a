pub mod history;

pub use history::{PriceBar, PriceHistory};
