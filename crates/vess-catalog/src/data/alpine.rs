//! Alpine (`apk`) installation data.

use crate::extension::OsSupport;

pub(super) fn entries() -> Vec<(&'static str, OsSupport)> {
    vec![
        ("mysqli", OsSupport::bundled("mysqli", &[], &[])),
        ("pdo_mysql", OsSupport::bundled("pdo_mysql", &[], &[])),
        (
            "pdo_pgsql",
            OsSupport::bundled("pdo_pgsql", &["postgresql-dev"], &["postgresql-libs"]),
        ),
        (
            "pgsql",
            OsSupport::bundled("pgsql", &["postgresql-dev"], &["postgresql-libs"]),
        ),
        (
            "gd",
            OsSupport::new(
                &["freetype-dev", "libjpeg-turbo-dev", "libpng-dev", "libwebp-dev"],
                &["freetype", "libjpeg-turbo", "libpng", "libwebp"],
                "docker-php-ext-configure gd --with-freetype --with-jpeg --with-webp \
                 && docker-php-ext-install gd",
                false,
            ),
        ),
        ("opcache", OsSupport::bundled("opcache", &[], &[])),
        ("zip", OsSupport::bundled("zip", &["libzip-dev"], &["libzip"])),
        ("intl", OsSupport::bundled("intl", &["icu-dev"], &["icu-libs"])),
        ("bcmath", OsSupport::bundled("bcmath", &[], &[])),
        ("exif", OsSupport::bundled("exif", &[], &[])),
        ("pcntl", OsSupport::bundled("pcntl", &[], &[])),
        ("soap", OsSupport::bundled("soap", &["libxml2-dev"], &["libxml2"])),
        ("sockets", OsSupport::bundled("sockets", &[], &[])),
        ("xmlrpc", OsSupport::bundled("xmlrpc", &["libxml2-dev"], &["libxml2"])),
        ("xsl", OsSupport::bundled("xsl", &["libxslt-dev"], &["libxslt"])),
        ("redis", OsSupport::pecl("redis", &[], &[])),
        (
            "imagick",
            OsSupport::pecl("imagick", &["imagemagick-dev"], &["imagemagick"]),
        ),
        (
            "memcached",
            OsSupport::pecl(
                "memcached",
                &["libmemcached-dev", "zlib-dev"],
                &["libmemcached-libs"],
            ),
        ),
        ("mongodb", OsSupport::pecl("mongodb", &["openssl-dev"], &[])),
        ("xdebug", OsSupport::pecl("xdebug", &["linux-headers"], &[])),
        ("apcu", OsSupport::pecl("apcu", &[], &[])),
        (
            "swoole",
            OsSupport::pecl("swoole", &["linux-headers", "openssl-dev"], &["libstdc++"]),
        ),
        (
            "openswoole",
            OsSupport::pecl(
                "openswoole",
                &["linux-headers", "openssl-dev"],
                &["libstdc++"],
            ),
        ),
    ]
}
