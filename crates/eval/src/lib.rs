pub mod trade;
pub mod window;

pub use trade::simulate;
pub use window::extract;
