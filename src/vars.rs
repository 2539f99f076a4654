use chrono::{DateTime, Utc};
use std::sync::{LazyLock, OnceLock};

macro_rules! env_config {
    ($name:ident, $env_key:expr, $default:expr) => {
        paste::paste! {
            pub static [<RESIZD_ $name>]: ::std::sync::LazyLock<&'static str> = ::std::sync::LazyLock::new(|| {
                ::std::boxed::Box::leak(
                    ::std::env::var($env_key)
                        .unwrap_or_else(|_| $default.to_string())
                        .into_boxed_str()
                )
            });
        }
    };
    ($name:ident, $default:expr) => {
        env_config!($name, stringify!([<RESIZD_ $name>]), $default);
    };
}

env_config!(HOST, "localhost");
env_config!(PORT, "8080");
env_config!(DATABASE_URL, "sqlite://resizd.db?mode=rwc");
env_config!(PUBLIC_BASE, "public");
env_config!(MAX_UPLOAD_SIZE_MB, "50");

pub static MAX_UPLOAD_SIZE: LazyLock<usize> = LazyLock::new(|| {
    RESIZD_MAX_UPLOAD_SIZE_MB
        .parse::<usize>()
        .expect("Invalid RESIZD_MAX_UPLOAD_SIZE_MB value")
        * 1024
        * 1024
});

pub static STARTED_AT: OnceLock<DateTime<Utc>> = OnceLock::new();

pub fn init_started_at() {
    STARTED_AT
        .set(Utc::now())
        .expect("The start time has already been initialized");
}
