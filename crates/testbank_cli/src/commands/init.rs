//! Init command implementation

use std::path::Path;

use miette::Result;
use testbank_core::TestBankConfig;
use tracing::info;

use crate::utils::write_new_file;

const DEFAULT_CONFIG: &str = r#"{
  // Backend base URL
  "apiUrl": "http://localhost:3001",
  // Owner of created and listed tests
  // "userId": "",
  "choicesPerQuestion": 4,
  // implicit | discard | reject
  "preamble": "implicit",
  "timeoutSecs": 30
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = Path::new(TestBankConfig::CONFIG_FILES[0]);

    if !write_new_file(config_path, DEFAULT_CONFIG, force)? {
        return Err(miette::miette!(
            "Config file already exists. Use --force to overwrite."
        ));
    }
    info!("Created {}", config_path.display());
    Ok(())
}
