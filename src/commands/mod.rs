//! Command layer: input validation and error mapping over the repositories.
//!
//! Each handler is an `_inner` function taking `&RwLock<Store>`, usable and
//! tested without Tauri. With the `desktop` feature each one also gets a
//! `#[tauri::command]` wrapper.
//!
//! Sub-modules are grouped by concern:
//! - [`inventories`]: inventory and location CRUD
//! - [`products`]: catalog, product links, stock counts, ordering
//! - [`orders`]: stock levels and order lists
//! - [`settings`]: currency and language preferences
//!
//! `plugin` (`desktop` only) bundles the wrappers so a host application
//! registers the whole surface with one `.plugin(..)` call. Frontends invoke
//! them as `plugin:stockpilot|<command>`.

pub mod inventories;
pub mod orders;
pub mod products;
pub mod settings;

#[cfg(feature = "desktop")]
use tauri::plugin::{Builder, TauriPlugin};
#[cfg(feature = "desktop")]
use tauri::{Manager, Runtime};

#[cfg(feature = "desktop")]
use crate::state::AppState;

/// Build the `stockpilot` plugin, taking ownership of `state`.
#[cfg(feature = "desktop")]
pub fn plugin<R: Runtime>(state: AppState) -> TauriPlugin<R> {
    Builder::new("stockpilot")
        .invoke_handler(tauri::generate_handler![
            inventories::list_inventories,
            inventories::get_inventory,
            inventories::create_inventory,
            inventories::update_inventory,
            inventories::delete_inventory,
            products::list_catalog,
            products::list_products_with_stock,
            products::get_product_with_stock,
            products::add_product_to_inventory,
            products::attach_product_to_inventory,
            products::update_product_stock,
            products::adjust_product_stock,
            products::update_inventory_product_order,
            products::move_product,
            products::update_product_details,
            products::delete_product_from_inventory,
            orders::stock_report,
            orders::suggest_order,
            orders::build_order_list,
            orders::render_order_list,
            settings::get_settings,
            settings::set_currency,
            settings::set_language,
        ])
        .setup(move |app, _api| {
            app.manage(state);
            tracing::info!("stockpilot plugin ready");
            Ok(())
        })
        .build()
}
