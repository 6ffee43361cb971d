//! Shared setup for rendering tests.

use sprig::{Config, Flavor, InlineMode, parse_with_config, render_html, render_markdown};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn html(input: &str) -> String {
    html_with(input, &Config::default())
}

pub fn html_with(input: &str, config: &Config) -> String {
    init_logger();
    render_html(&parse_with_config(input, config))
}

pub fn markdown(input: &str) -> String {
    init_logger();
    render_markdown(&parse_with_config(input, &Config::default()))
}

pub fn flavor(flavor: Flavor) -> Config {
    Config::builder().flavor(flavor).build().unwrap()
}

pub fn simple() -> Config {
    Config::builder()
        .inline_mode(InlineMode::Simple)
        .build()
        .unwrap()
}

pub fn depth(max: usize) -> Config {
    Config::builder().max_nesting_depth(max).build().unwrap()
}
