// src/services/mod.rs
pub mod auth_service;
pub mod pedido_service;
pub mod user_service;
