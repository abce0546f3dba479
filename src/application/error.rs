#[derive(Debug)]
pub enum ApplicationError {
    /// Duplicate email on signup. Surfaces as 400 like the rest of the
    /// validation failures, not 409.
    Conflict(String),
    /// Bad login. Always carries the same generic client message.
    InvalidCredentials,
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    DatabaseError(String),
    CacheError(String),
    InternalError(String),
}
