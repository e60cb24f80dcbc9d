use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// Config to be read from file
//--------------------------------------------------------------------------------------------------

fn default_api_base_url() -> String {
    "http://localhost:8091/api".to_string()
}

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    pub session_file: Option<String>,
}

//--------------------------------------------------------------------------------------------------
