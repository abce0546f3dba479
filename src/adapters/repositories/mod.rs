mod pg_product_repository;
mod pg_user_repository;
mod redis_cache_repository;

pub use pg_product_repository::PgProductRepository;
pub use pg_user_repository::PgUserRepository;
pub use redis_cache_repository::RedisCacheRepository;
