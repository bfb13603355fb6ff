mod alternate_table;
#[cfg(target_os = "linux")]
mod live_table;
