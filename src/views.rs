//! Static HTML pages. The pages talk to the JSON API themselves; the server
//! only hands them out.

/// Public registration form, served at `/`.
pub const INDEX_HTML: &str = include_str!("../templates/index.html");

/// Admin listing, served at `/admin`.
pub const ADMIN_HTML: &str = include_str!("../templates/admin.html");
