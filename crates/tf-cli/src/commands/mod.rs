pub mod dispatch;
pub mod extract;
pub mod new;
pub mod publish;
pub mod schema;
pub mod sub_image;
pub mod types;
pub mod upload;
pub mod validate;
