pub mod dataset;
pub mod fields;
pub mod record;
pub mod selection;

pub use dataset::*;
pub use fields::*;
pub use record::*;
pub use selection::*;
