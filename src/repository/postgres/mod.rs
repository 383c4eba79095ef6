mod category;
mod movement;
mod product;
mod user;

pub use category::PgCategoryRepository;
pub use movement::PgMovementRepository;
pub use product::PgProductRepository;
pub use user::PgUserRepository;

use crate::error::AppError;

fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}
