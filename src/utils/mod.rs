pub mod constants;
pub mod filename;
pub mod url_utils;

pub use constants::*;
pub use filename::sanitize_filename;
pub use url_utils::{image_filename, is_absolute_url, resolve_against, resolve_url};
