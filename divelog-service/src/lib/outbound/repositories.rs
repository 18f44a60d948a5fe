pub mod dive_log;
pub mod user;

pub use dive_log::PostgresDiveLogRepository;
pub use user::PostgresUserRepository;
