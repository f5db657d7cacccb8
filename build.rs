use std::fs;

fn main() {
    // The shipped defaults are embedded with include_str!, so reject bad TOML here
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("mcqdoc: cannot read {}: {}", config_path, e),
    };

    if let Err(e) = toml::from_str::<toml::Table>(&content) {
        panic!("mcqdoc: {} is not valid TOML: {}", config_path, e);
    }
}
