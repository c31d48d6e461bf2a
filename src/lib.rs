pub mod app;
pub mod core;
pub mod normalize;
pub mod notifications;
pub mod parser;
pub mod repository;
pub mod scanner;
