use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub input_encoding: String,
    pub digest_algorithm: String,
    pub output_encoding: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8086".into(),
            input_encoding: "utf8".into(),
            digest_algorithm: "sha256".into(),
            output_encoding: "hex".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            apply_file_overrides(&mut settings, &file_cfg);
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("APP__INPUT_ENCODING") {
        settings.input_encoding = v;
    }
    if let Ok(v) = std::env::var("APP__DIGEST_ALGORITHM") {
        settings.digest_algorithm = v;
    }
    if let Ok(v) = std::env::var("APP__OUTPUT_ENCODING") {
        settings.output_encoding = v;
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("input_encoding") {
        settings.input_encoding = v.clone();
    }
    if let Some(v) = file_cfg.get("digest_algorithm") {
        settings.digest_algorithm = v.clone();
    }
    if let Some(v) = file_cfg.get("output_encoding") {
        settings.output_encoding = v.clone();
    }
}
