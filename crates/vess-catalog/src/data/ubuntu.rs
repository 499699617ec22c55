//! Ubuntu (`apt`) installation data.

use crate::extension::OsSupport;

pub(super) fn entries() -> Vec<(&'static str, OsSupport)> {
    vec![
        ("mysqli", OsSupport::bundled("mysqli", &[], &[])),
        ("pdo_mysql", OsSupport::bundled("pdo_mysql", &[], &[])),
        (
            "pdo_pgsql",
            OsSupport::bundled("pdo_pgsql", &["libpq-dev"], &["libpq5"]),
        ),
        ("pgsql", OsSupport::bundled("pgsql", &["libpq-dev"], &["libpq5"])),
        (
            "gd",
            OsSupport::new(
                &[
                    "libfreetype6-dev",
                    "libjpeg62-turbo-dev",
                    "libpng-dev",
                    "libwebp-dev",
                ],
                &["libfreetype6", "libjpeg62-turbo", "libpng16-16", "libwebp7"],
                "docker-php-ext-configure gd --with-freetype --with-jpeg --with-webp \
                 && docker-php-ext-install gd",
                false,
            ),
        ),
        ("opcache", OsSupport::bundled("opcache", &[], &[])),
        ("zip", OsSupport::bundled("zip", &["libzip-dev"], &["libzip4"])),
        ("intl", OsSupport::bundled("intl", &["libicu-dev"], &["libicu70"])),
        ("bcmath", OsSupport::bundled("bcmath", &[], &[])),
        ("exif", OsSupport::bundled("exif", &[], &[])),
        ("pcntl", OsSupport::bundled("pcntl", &[], &[])),
        ("soap", OsSupport::bundled("soap", &["libxml2-dev"], &["libxml2"])),
        ("sockets", OsSupport::bundled("sockets", &[], &[])),
        ("xmlrpc", OsSupport::bundled("xmlrpc", &["libxml2-dev"], &["libxml2"])),
        ("xsl", OsSupport::bundled("xsl", &["libxslt1-dev"], &["libxslt1.1"])),
        ("redis", OsSupport::pecl("redis", &[], &[])),
        (
            "imagick",
            OsSupport::pecl("imagick", &["libmagickwand-dev"], &["libmagickwand-6.q16-6"]),
        ),
        (
            "memcached",
            OsSupport::pecl(
                "memcached",
                &["libmemcached-dev", "zlib1g-dev"],
                &["libmemcached11"],
            ),
        ),
        ("mongodb", OsSupport::pecl("mongodb", &["libssl-dev"], &[])),
        ("xdebug", OsSupport::pecl("xdebug", &[], &[])),
        ("apcu", OsSupport::pecl("apcu", &[], &[])),
        ("swoole", OsSupport::pecl("swoole", &["libssl-dev"], &[])),
        ("openswoole", OsSupport::pecl("openswoole", &["libssl-dev"], &[])),
    ]
}
