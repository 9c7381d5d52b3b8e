mod model;
mod repository;

pub use model::TokenRecord;
pub use repository::TokenRepository;
