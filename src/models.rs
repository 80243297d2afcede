//! Modelos de dominio (ficheros de intent, registros de frases e informe).

use serde::Deserialize;
use std::path::PathBuf;

/// Sufijo que identifica los ficheros de frases de usuario en inglés.
pub const USERSAYS_SUFFIX: &str = "_usersays_en.json";

/// Nombre del subdirectorio que contiene los intents dentro del export.
pub const INTENTS_DIR: &str = "intents";

/// Fichero `intents/*_usersays_en.json` localizado dentro de una extracción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentFile {
    pub name: String,
    pub path: PathBuf,
}

/// Un registro de frase: la secuencia ordenada de fragmentos que la forman.
/// El resto de campos del export (`id`, `count`, `isTemplate`...) se ignoran.
#[derive(Debug, Clone, Deserialize)]
pub struct PhraseRecord {
    pub data: Vec<Fragment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fragment {
    pub text: String,
}

impl PhraseRecord {
    /// Concatena los fragmentos sin separador, respetando su orden.
    pub fn to_phrase(&self) -> String {
        self.data.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Resultado del procesado de un único fichero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Phrases(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub filename: String,
    pub outcome: FileOutcome,
}

/// Informe final: una entrada por fichero, en orden de descubrimiento.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseReport {
    pub entries: Vec<ReportEntry>,
}

impl PhraseReport {
    /// Entradas que se extrajeron correctamente, con sus frases.
    pub fn successes(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            FileOutcome::Phrases(p) => Some((e.filename.as_str(), p.as_slice())),
            FileOutcome::Failed(_) => None,
        })
    }

    /// Entradas que fallaron, con el motivo.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            FileOutcome::Failed(reason) => Some((e.filename.as_str(), reason.as_str())),
            FileOutcome::Phrases(_) => None,
        })
    }

    pub fn phrases_for(&self, filename: &str) -> Option<&[String]> {
        self.successes()
            .find(|(name, _)| *name == filename)
            .map(|(_, phrases)| phrases)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
