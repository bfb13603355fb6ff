#[cfg(any(target_os = "linux", target_os = "android"))]
mod user_namespace;
