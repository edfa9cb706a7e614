//! Configuration: tool settings and the device inventory.

mod inventory;
mod path;
mod settings;

pub use inventory::{INVENTORY_ENV, Inventory, NodeConfig, Transport};
pub use path::{home_dir, resolve_path};
pub use settings::Settings;
