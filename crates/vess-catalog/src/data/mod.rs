//! Literal catalog data.
//!
//! Extension identity lives in [`definitions`]; installation data lives in
//! one sub-catalog per OS family and is merged per extension by
//! [`Catalog::builtin`](crate::Catalog::builtin).

mod alpine;
mod ubuntu;

use vess_common::types::OsFamily;

use crate::extension::{Extension, OsSupport};

const ALL_VERSIONS: &[&str] = &["7.4", "8.0", "8.1", "8.2", "8.3"];

/// Per-OS installation entries, keyed by extension name.
pub type SubCatalog = Vec<(String, OsSupport)>;

/// Returns the sub-catalog for `os`.
#[must_use]
pub fn sub_catalog(os: OsFamily) -> SubCatalog {
    let entries = match os {
        OsFamily::Alpine => alpine::entries(),
        OsFamily::Ubuntu => ubuntu::entries(),
    };
    entries
        .into_iter()
        .map(|(name, support)| (name.to_owned(), support))
        .collect()
}

/// Extension definitions without OS data.
#[must_use]
pub fn definitions() -> Vec<Extension> {
    vec![
        // Bundled with the PHP sources
        Extension::new("mysqli", "MySQL Improved Extension").versions(ALL_VERSIONS),
        Extension::new("pdo_mysql", "MySQL PDO Driver").versions(ALL_VERSIONS),
        Extension::new("pdo_pgsql", "PostgreSQL PDO Driver").versions(ALL_VERSIONS),
        Extension::new("pgsql", "PostgreSQL Extension").versions(ALL_VERSIONS),
        Extension::new("gd", "GD Graphics Library")
            .versions(ALL_VERSIONS)
            .configure_args(&["--with-freetype", "--with-jpeg"]),
        Extension::new("opcache", "Zend OPcache").versions(ALL_VERSIONS),
        Extension::new("zip", "Zip Archive Extension").versions(ALL_VERSIONS),
        Extension::new("intl", "Internationalization Extension").versions(ALL_VERSIONS),
        Extension::new("bcmath", "BC Math Extension").versions(ALL_VERSIONS),
        Extension::new("exif", "EXIF Extension").versions(ALL_VERSIONS),
        Extension::new("pcntl", "Process Control Extension").versions(ALL_VERSIONS),
        Extension::new("soap", "SOAP Extension").versions(ALL_VERSIONS),
        Extension::new("sockets", "Sockets Extension").versions(ALL_VERSIONS),
        // Unbundled from PHP in 8.1
        Extension::new("xmlrpc", "XML-RPC Extension").versions(&["7.4", "8.0"]),
        Extension::new("xsl", "XSL Extension").versions(ALL_VERSIONS),
        // PECL
        Extension::new("redis", "Redis Extension (PECL)").versions(ALL_VERSIONS),
        Extension::new("imagick", "ImageMagick Extension (PECL)").versions(ALL_VERSIONS),
        Extension::new("memcached", "Memcached Extension (PECL)").versions(ALL_VERSIONS),
        Extension::new("mongodb", "MongoDB Extension (PECL)").versions(ALL_VERSIONS),
        Extension::new("xdebug", "Xdebug Debugging Extension (PECL)").versions(ALL_VERSIONS),
        Extension::new("apcu", "APCu Cache Extension (PECL)").versions(ALL_VERSIONS),
        // Both register the Swoole\ namespace and cannot be loaded together.
        Extension::new("swoole", "Swoole Coroutine Framework (PECL)")
            .versions(ALL_VERSIONS)
            .conflicts(&["openswoole"]),
        Extension::new("openswoole", "Open Swoole Coroutine Framework (PECL)")
            .versions(ALL_VERSIONS)
            .conflicts(&["swoole"]),
    ]
}
