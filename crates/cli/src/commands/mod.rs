pub mod create;
pub mod delete;
pub mod init;
pub mod menu;
pub mod update;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Write the store credentials and file locations to the config file
    Init(init::InitArgs),
    /// Interactive numbered menu (default)
    Menu,
    /// Create collections, products, customers and orders from the seed file
    Create,
    /// Apply the seed file's update documents to the saved products
    Update,
    /// Delete every order, product, collection and customer in the store
    Delete(delete::DeleteArgs),
}
