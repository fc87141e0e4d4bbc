pub mod commands;
pub mod pipeline;

/// `-v` count -> default filter of env_logger. `RUST_LOG` still wins.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logger(verbose: u8) {
    let level = log_level(verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn levels() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(10), "trace");
    }
}
