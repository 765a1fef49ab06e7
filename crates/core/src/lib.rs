pub mod model;
pub mod resource;
pub mod seed;
pub mod state;
pub mod store;

pub use resource::ResourceKind;
pub use seed::SeedData;
pub use state::SavedState;
pub use store::JsonFile;
