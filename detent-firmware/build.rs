//! Build script for detent-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates input.toml and renders it into `input_config.rs`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use detent_core::config::{InputConfig, SourceKind};

/// Button GPIOs claimed by main.rs
const BOARD_BUTTON_PINS: [u8; 3] = [2, 3, 4];

/// Highest RP2040 GPIO
const MAX_GPIO: u8 = 29;

fn main() {
    setup_linker();
    let config = load_config();
    validate(&config);
    render(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

fn load_config() -> InputConfig {
    println!("cargo:rerun-if-changed=input.toml");

    let path = Path::new("input.toml");
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read input.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid input.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    }
}

fn validate(config: &InputConfig) {
    let mut errors = Vec::new();

    if let Err(e) = config.validate() {
        errors.push(e.to_string());
    }

    // Board wiring applies whichever source is selected
    let b = &config.buttons;
    let pins = [b.left, b.right, b.press];
    if let Some(pin) = pins.iter().find(|&&p| p > MAX_GPIO) {
        errors.push(format!("[buttons] GPIO{} does not exist on RP2040", pin));
    }
    if pins != BOARD_BUTTON_PINS {
        errors.push(format!(
            "[buttons] {:?} does not match board wiring {:?}",
            pins, BOARD_BUTTON_PINS
        ));
    }

    if !errors.is_empty() {
        fail("input.toml validation failed", &errors);
    }

    println!("cargo:warning=input.toml validated successfully");
}

/// Write the generated `INPUT_CONFIG` constant
fn render(config: &InputConfig) {
    let source = match config.source {
        SourceKind::Buttons => "SourceKind::Buttons",
        SourceKind::I2c => "SourceKind::I2c",
    };

    let code = format!(
        "/// Input configuration generated from input.toml\n\
         pub const INPUT_CONFIG: InputConfig = InputConfig {{\n    \
             source: {source},\n    \
             buttons: ButtonPins {{ left: {left}, right: {right}, press: {press} }},\n    \
             i2c: I2cEncoderConfig {{ address: 0x{addr:02X}, update_period_ms: {period} }},\n    \
             nav: NavConfig {{\n        \
                 read_period_ms: {read},\n        \
                 long_press_ms: {long},\n        \
                 long_press_repeat_ms: {repeat},\n        \
                 wrap: {wrap},\n    \
             }},\n\
         }};\n",
        source = source,
        left = config.buttons.left,
        right = config.buttons.right,
        press = config.buttons.press,
        addr = config.i2c.address,
        period = config.i2c.update_period_ms,
        read = config.nav.read_period_ms,
        long = config.nav.long_press_ms,
        repeat = config.nav.long_press_repeat_ms,
        wrap = config.nav.wrap,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("input_config.rs"), code).unwrap();
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  • {:<62} ║", truncate(line)))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 62 {
        let head: String = line.chars().take(59).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
