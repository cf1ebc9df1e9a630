//! FFI surface for the LifeLog Flutter app.
//! Each function opens the shared database, runs one use case and closes it.

pub mod api;
