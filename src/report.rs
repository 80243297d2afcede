//! Formateo del informe de frases como texto plano.

use crate::models::PhraseReport;

/// Genera el texto del informe:
///
/// ```text
/// ----> <fichero>
/// "frase uno" "frase dos"
/// ```
///
/// Los ficheros fallidos se omiten salvo que `include_failures` esté activo,
/// en cuyo caso se añade al final una línea `!!!!> <fichero>: <motivo>` por fallo.
pub fn format_report(report: &PhraseReport, include_failures: bool) -> String {
    let mut lines = Vec::new();

    for (filename, phrases) in report.successes() {
        lines.push(format!("----> {filename}"));
        lines.push(format!("\"{}\"", phrases.join("\" \"")));
    }

    if include_failures {
        for (filename, reason) in report.failures() {
            lines.push(format!("!!!!> {filename}: {reason}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutcome, ReportEntry};

    fn entry(name: &str, outcome: FileOutcome) -> ReportEntry {
        ReportEntry {
            filename: name.to_string(),
            outcome,
        }
    }

    fn phrases(p: &[&str]) -> FileOutcome {
        FileOutcome::Phrases(p.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn empty_report_is_empty_text() {
        assert_eq!(format_report(&PhraseReport::default(), true), "");
    }

    #[test]
    fn renders_headers_and_quoted_phrases() {
        let report = PhraseReport {
            entries: vec![
                entry("sample_usersays_en.json", phrases(&["phrase one", "phrase two"])),
                entry("other_usersays_en.json", phrases(&["hola"])),
            ],
        };

        assert_eq!(
            format_report(&report, false),
            "----> sample_usersays_en.json\n\"phrase one\" \"phrase two\"\n----> other_usersays_en.json\n\"hola\""
        );
    }

    #[test]
    fn file_without_phrases_renders_empty_quotes() {
        let report = PhraseReport {
            entries: vec![entry("empty_usersays_en.json", phrases(&[]))],
        };

        assert_eq!(format_report(&report, false), "----> empty_usersays_en.json\n\"\"");
    }

    #[test]
    fn failures_are_hidden_unless_requested() {
        let report = PhraseReport {
            entries: vec![
                entry("bad_usersays_en.json", FileOutcome::Failed("roto".into())),
                entry("good_usersays_en.json", phrases(&["ok"])),
            ],
        };

        assert_eq!(
            format_report(&report, false),
            "----> good_usersays_en.json\n\"ok\""
        );
        assert_eq!(
            format_report(&report, true),
            "----> good_usersays_en.json\n\"ok\"\n!!!!> bad_usersays_en.json: roto"
        );
    }
}
