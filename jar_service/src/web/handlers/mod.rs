// jar_service/src/web/handlers/mod.rs

pub mod health_handlers;
pub mod jar_handlers;
