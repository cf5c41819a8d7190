pub mod classification;
pub mod link;
pub mod location;
pub mod status;

pub use classification::*;
pub use link::*;
pub use location::*;
pub use status::*;
