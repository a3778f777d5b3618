pub mod dashboard;
pub mod month;
pub mod price;

pub use dashboard::*;
pub use month::*;
pub use price::*;
