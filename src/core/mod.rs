pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod conversation;
pub mod message;
pub mod notification;
pub mod turn_service;
