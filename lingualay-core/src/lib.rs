pub mod content;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod import;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod stats;
pub mod store;

pub use content::*;
pub use driver::*;
pub use engine::*;
pub use errors::*;
pub use import::*;
pub use models::*;
pub use scheduler::*;
pub use session::*;
pub use settings::*;
pub use stats::*;
pub use store::*;
