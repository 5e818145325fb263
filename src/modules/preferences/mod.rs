pub mod crud;
pub mod schema;
