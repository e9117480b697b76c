//! Static sections of the landing page.

mod features;
mod footer;
mod hero;
pub mod visualization;

pub use features::{FEATURES, Feature, Features};
pub use footer::Footer;
pub use hero::Hero;
pub use visualization::Visualization;
