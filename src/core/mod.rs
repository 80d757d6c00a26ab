pub mod clock;
pub mod controller;
pub mod input_adapter;
pub mod window;
