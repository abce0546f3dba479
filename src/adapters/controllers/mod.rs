pub mod auth_controller;
pub mod cart_controller;
pub mod health_controller;
pub mod product_controller;
