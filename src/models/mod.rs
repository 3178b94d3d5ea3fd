pub mod app_data;
pub mod inventory;
pub mod product;
pub mod stock;

pub use app_data::AppData;
pub use inventory::{
    Inventory, InventoryUpdate, Location, LocationUpdate, NewLocation, MAX_LOCATIONS,
};
pub use product::{ImageInput, ImageRef, NewProduct, Product, ProductDetails, ProductImage};
pub use stock::{stock_key, total_stock, ProductStock};
