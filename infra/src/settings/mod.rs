//! Settings Provider Module
//!
//! Sources of the per-tenant connector properties read by the gate at the
//! start of every event.
//!
//! - **In-memory**: per-tenant maps, optionally loaded from a settings file
//! - **Environment**: `EVIDENT_VERIFY_*` variables shared by all tenants
//!
//! Both fill properties that are not configured with the connector defaults.

pub mod env;
pub mod memory;

pub use env::EnvSettingsProvider;
pub use memory::{InMemorySettingsProvider, TenantSettings};
