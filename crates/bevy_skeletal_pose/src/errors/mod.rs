mod asset_loader_error;
mod evaluation_error;
mod validation_error;

pub use asset_loader_error::*;
pub use evaluation_error::*;
pub use validation_error::*;
