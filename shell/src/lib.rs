//--------------------------------------------------------------------------------------------------

pub mod api;
pub mod auth;
pub mod cfg;
pub mod guard;
pub mod models;
pub mod routes;
pub mod session;
pub mod vault;

//--------------------------------------------------------------------------------------------------
