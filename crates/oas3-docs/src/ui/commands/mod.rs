pub mod build;
pub mod list;
pub mod sidebar;

pub use build::{BuildConfig, build_artifact};
pub use list::list_operations;
pub use sidebar::print_sidebar;
