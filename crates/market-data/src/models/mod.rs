//! Data models shared by market data sources.

pub mod price;

pub use price::PricePoint;
