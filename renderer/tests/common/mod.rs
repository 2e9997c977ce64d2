#![allow(dead_code)]

use gpu_harness::{
    init_logging, ContextConfig, HeadlessDriver, LoggingConfig, RendererDevice, WarningPolicy,
};
use std::fs;
use std::path::PathBuf;

pub fn device() -> RendererDevice<HeadlessDriver> {
    init_logging(LoggingConfig::default());
    RendererDevice::build_initialize(HeadlessDriver::new())
}

pub fn strict_device() -> RendererDevice<HeadlessDriver> {
    init_logging(LoggingConfig::default());
    RendererDevice::with_config(
        HeadlessDriver::new(),
        ContextConfig {
            warnings: WarningPolicy::Escalate,
        },
    )
}

/// A path under the system temp directory that no other test uses.
pub fn fixture_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gpu_harness_{}", std::process::id()));
    let _ = fs::create_dir_all(&dir);
    dir.join(name)
}

pub fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = fixture_path(name);
    fs::write(&path, contents).unwrap();
    path
}
