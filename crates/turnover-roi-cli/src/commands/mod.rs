pub mod roi;
pub mod sensitivity;
