pub mod products;

use std::sync::Arc;

use catalog_db::ProductStore;
use catalog_http::SessionStore;
use catalog_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    store: Arc<dyn ProductStore>,
    sessions: SessionStore,
) -> anyhow::Result<()> {
    registry.register(products::create_module(store, sessions))?;
    Ok(())
}
