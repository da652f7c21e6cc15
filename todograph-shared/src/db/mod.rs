/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup
///   health check

pub mod pool;
