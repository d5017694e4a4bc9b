/// Info by default; `FOLIO_LOG` and `FOLIO_LOG_STYLE` override.
pub fn init() {
    let log_environ = env_logger::Env::new()
        .filter("FOLIO_LOG")
        .write_style("FOLIO_LOG_STYLE");
    let mut log_builder = env_logger::Builder::new();

    log_builder.filter_level(log::LevelFilter::Info);
    log_builder.parse_env(log_environ);
    log_builder.init();
}
