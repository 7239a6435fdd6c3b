use crate::config::toml_config::RequestFile;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "zuora-subscribe")]
#[command(about = "Validate and submit a subscribe request described in TOML")]
pub struct CliArgs {
    #[arg(long, short = 'r', help = "Path to the TOML request file")]
    pub request: PathBuf,

    #[arg(long, help = "Override the SOAP endpoint from the request file")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Override the session id")]
    pub session_id: Option<String>,

    #[arg(long, help = "Print the envelope instead of sending it")]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    /// Loads the request file and applies command-line overrides to its `[api]` table.
    pub fn load_request(&self) -> Result<RequestFile> {
        let mut file = RequestFile::from_file(&self.request)?;
        file.api = file.api.with_env()?;
        if let Some(endpoint) = &self.endpoint {
            file.api.endpoint = endpoint.clone();
        }
        if let Some(session_id) = &self.session_id {
            file.api.session_id = Some(session_id.clone());
        }
        Ok(file)
    }
}
