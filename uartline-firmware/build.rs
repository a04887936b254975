//! Build script for uartline-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates framer.toml and turns it into constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Limits mirrored from uartline-core's config module
const MAX_TERMINATORS: usize = 4;
const MAX_MSG_SIZE: i64 = 1024;
const MAX_QUEUE_DEPTH: i64 = 64;

/// Validated framer settings
struct FramerSettings {
    msg_size: usize,
    queue_depth: usize,
    idle_period_ms: u32,
    terminators: Vec<u8>,
    baudrate: u32,
}

fn main() {
    setup_linker();
    let settings = validate_config();
    write_constants(&settings);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate framer.toml at compile time
fn validate_config() -> FramerSettings {
    println!("cargo:rerun-if-changed=framer.toml");

    let config_path = Path::new("framer.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: framer.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a framer.toml configuration file in the   ║\n\
            ║  uartline-firmware directory.                                    ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read framer.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in framer.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let framer = match config.get("framer") {
        Some(toml::Value::Table(t)) => t.clone(),
        Some(_) => {
            errors.push("[framer] must be a table".to_string());
            toml::map::Map::new()
        }
        None => {
            errors.push("Missing [framer] section".to_string());
            toml::map::Map::new()
        }
    };

    let msg_size = read_int(&framer, "framer", "msg_size", 2, MAX_MSG_SIZE, &mut errors);
    let queue_depth = read_int(&framer, "framer", "queue_depth", 1, MAX_QUEUE_DEPTH, &mut errors);
    let idle_period_ms = read_int(
        &framer,
        "framer",
        "idle_period_ms",
        1,
        i64::from(u32::MAX),
        &mut errors,
    );

    let terminators = match framer.get("terminators") {
        Some(toml::Value::String(s)) => read_terminators(s, &mut errors),
        Some(_) => {
            errors.push("[framer] terminators must be a string".to_string());
            Vec::new()
        }
        None => {
            errors.push("[framer] missing 'terminators'".to_string());
            Vec::new()
        }
    };

    // [uart] is optional; 115200 8N1 when absent
    let baudrate = match config.get("uart") {
        Some(toml::Value::Table(uart)) if uart.contains_key("baudrate") => {
            read_int(uart, "uart", "baudrate", 1200, 3_000_000, &mut errors)
        }
        _ => 115_200,
    };

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid framer configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=framer.toml validated successfully");

    FramerSettings {
        msg_size: msg_size as usize,
        queue_depth: queue_depth as usize,
        idle_period_ms: idle_period_ms as u32,
        terminators,
        baudrate: baudrate as u32,
    }
}

/// Read an integer field and check its range
/// Terminators are matched byte by byte, so each one must be a single
/// ASCII character and listed once
fn read_terminators(s: &str, errors: &mut Vec<String>) -> Vec<u8> {
    let mut bytes = Vec::new();
    for c in s.chars() {
        if !c.is_ascii() {
            errors.push(format!(
                "[framer] terminator {:?} is not a single-byte ASCII character",
                c
            ));
            continue;
        }
        let b = c as u8;
        if bytes.contains(&b) {
            errors.push(format!("[framer] terminator {:?} is listed twice", c));
            continue;
        }
        bytes.push(b);
    }

    if s.is_empty() {
        errors.push("[framer] terminators must not be empty".to_string());
    } else if bytes.len() > MAX_TERMINATORS {
        errors.push(format!(
            "[framer] at most {} terminator bytes are allowed",
            MAX_TERMINATORS
        ));
    }
    bytes
}

fn read_int(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Emit the validated settings as Rust constants
fn write_constants(settings: &FramerSettings) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("framer_config.rs")).unwrap();

    let terminators = settings
        .terminators
        .iter()
        .map(|b| format!("{:#04x}", b))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(f, "// Generated from framer.toml by build.rs").unwrap();
    writeln!(f, "pub const MSG_SIZE: usize = {};", settings.msg_size).unwrap();
    writeln!(f, "pub const QUEUE_DEPTH: usize = {};", settings.queue_depth).unwrap();
    writeln!(f, "pub const IDLE_PERIOD_MS: u32 = {};", settings.idle_period_ms).unwrap();
    writeln!(f, "pub const TERMINATORS: &[u8] = &[{}];", terminators).unwrap();
    writeln!(f, "pub const BAUDRATE: u32 = {};", settings.baudrate).unwrap();
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
