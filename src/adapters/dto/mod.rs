pub mod auth_dto;
pub mod cart_dto;
pub mod product_dto;
