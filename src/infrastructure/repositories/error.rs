use crate::domain::errors::DomainError;

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return DomainError::Persistence(format!("database constraint violation: {constraint}"));
            }
            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::ColumnNotFound(column) => {
            DomainError::Configuration(format!("column `{column}` is not selected by the record type"))
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
