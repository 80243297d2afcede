//! Servidor de extracción de frases de entrenamiento.
//!
//! Recibe por HTTP el ZIP exportado de un agente, lo descomprime en una ranura
//! temporal propia de la petición, localiza los ficheros
//! `intents/*_usersays_en.json` y devuelve sus frases agrupadas por fichero.

pub mod aggregate;
pub mod api;
pub mod app_state;
pub mod archive;
pub mod config;
pub mod error;
pub mod extract;
pub mod locate;
pub mod models;
pub mod report;
pub mod upload;

pub use app_state::AppState;
pub use config::AppConfig;
pub use error::UploadError;
