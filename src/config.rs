//! Carga y gestión de configuración de la aplicación.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, Result};

/// Configuración completa de la aplicación.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_addr: String,
    /// Directorio base donde se crean las ranuras de extracción de cada subida.
    pub work_dir: PathBuf,
    /// Directorio con el `index.html` de la página de subida.
    pub frontend_dir: PathBuf,
    pub max_concurrent_reads: usize,
    pub max_upload_bytes: usize,
    /// `None` desactiva el límite de tiempo por subida.
    pub request_timeout: Option<Duration>,
    /// Añadir al informe los ficheros que no se pudieron procesar.
    pub report_failures: bool,
    pub open_browser: bool,
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno (usando .env si existe).
    pub fn from_env() -> Result<Self> {
        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:4507".to_string());
        let work_dir = env::var("WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("intent_phrases"));
        let frontend_dir = env::var("FRONTEND_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("frontend"));

        let max_concurrent_reads: usize = parse_var("MAX_CONCURRENT_READS", 16)?;
        if max_concurrent_reads == 0 {
            return Err(anyhow!("MAX_CONCURRENT_READS debe ser al menos 1"));
        }
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?;

        let timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", 120)?;
        let request_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            server_addr,
            work_dir,
            frontend_dir,
            max_concurrent_reads,
            max_upload_bytes,
            request_timeout,
            report_failures: parse_var("REPORT_FAILURES", false)?,
            open_browser: parse_var("OPEN_BROWSER", false)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Valor inválido para {name} ('{raw}'): {e}")),
        Err(_) => Ok(default),
    }
}
