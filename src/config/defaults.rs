//! Built-in configuration defaults.

pub(crate) const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub(crate) const DEFAULT_WEB_BASE_URL: &str = "https://github.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// GitHub caps GraphQL connection pages at 100 nodes.
pub(crate) const MAX_PAGE_SIZE: u32 = 100;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

pub(crate) const CONFIG_DIR_NAME: &str = "forksweep";
pub(crate) const CONFIG_FILE_NAME: &str = "forksweep.toml";
