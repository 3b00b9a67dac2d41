pub mod news_repository;
pub mod newsapi_repository;

pub use news_repository::{NewsRepository, ProviderResponse, RepositoryError};
pub use newsapi_repository::NewsApiRepository;
