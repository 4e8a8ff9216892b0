use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;

use cvparse_core::ExtractionResult;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the human-readable extraction summary.
pub fn print_result(
    w: &mut dyn Write,
    file: &Path,
    result: &ExtractionResult,
    full_text: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Extracted {} via {}", file.display(), result.extraction_method)?;
    if !result.is_usable() {
        if color.enabled() {
            writeln!(
                w,
                "{}",
                "Warning: transcript too short to be a usable CV".yellow()
            )?;
        } else {
            writeln!(w, "Warning: transcript too short to be a usable CV")?;
        }
    }
    writeln!(w)?;

    let cv = &result.parsed_fields;
    field(w, "Name", cv.name.as_deref(), color)?;
    field(w, "Email", cv.email.as_deref(), color)?;
    field(w, "Phone", cv.phone.as_deref(), color)?;
    field(w, "Location", cv.location.as_deref(), color)?;
    field(w, "Summary", cv.summary.as_deref(), color)?;

    if !cv.skills.is_empty() {
        heading(w, &format!("Skills ({})", cv.skills.len()), color)?;
        writeln!(w, "  {}", cv.skills.join(", "))?;
    }

    if !cv.education.is_empty() {
        heading(w, "Education", color)?;
        for entry in &cv.education {
            let mut line = entry.degree.clone();
            if !entry.institution.is_empty() {
                line.push_str(&format!(", {}", entry.institution));
            }
            if !entry.year.is_empty() {
                line.push_str(&format!(" ({})", entry.year));
            }
            writeln!(w, "  {line}")?;
        }
    }

    if !cv.experience.is_empty() {
        heading(w, "Experience", color)?;
        for entry in &cv.experience {
            let mut line = entry.title.clone();
            if !entry.company.is_empty() {
                line.push_str(&format!(" at {}", entry.company));
            }
            if !entry.duration.is_empty() {
                line.push_str(&format!(" ({})", entry.duration));
            }
            writeln!(w, "  {line}")?;
        }
    }

    if !cv.languages.is_empty() {
        heading(w, "Languages", color)?;
        for entry in &cv.languages {
            writeln!(w, "  {} ({})", entry.language, entry.proficiency)?;
        }
    }

    if !cv.certifications.is_empty() {
        heading(w, "Certifications", color)?;
        for entry in &cv.certifications {
            if entry.year.is_empty() {
                writeln!(w, "  {}", entry.name)?;
            } else {
                writeln!(w, "  {} ({})", entry.name, entry.year)?;
            }
        }
    }

    if full_text {
        heading(w, "Full text", color)?;
        writeln!(w, "{}", result.full_text)?;
    }

    Ok(())
}

fn field(
    w: &mut dyn Write,
    label: &str,
    value: Option<&str>,
    color: ColorMode,
) -> std::io::Result<()> {
    match value {
        Some(v) => writeln!(w, "{label}: {v}"),
        None if color.enabled() => writeln!(w, "{label}: {}", "(not found)".dimmed()),
        None => writeln!(w, "{label}: (not found)"),
    }
}

fn heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", title.bold())
    } else {
        writeln!(w, "{title}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvparse_core::{ExtractionMethod, ParsedCv};

    fn sample_result() -> ExtractionResult {
        ExtractionResult {
            full_text: "John Smith\nSkills: Python".repeat(5),
            parsed_fields: ParsedCv {
                name: Some("John Smith".to_string()),
                skills: vec!["Python".to_string(), "SQL".to_string()],
                ..ParsedCv::default()
            },
            extraction_method: ExtractionMethod::Docx,
        }
    }

    #[test]
    fn plain_output_has_fields_and_sections() {
        let mut buf = Vec::new();
        print_result(
            &mut buf,
            Path::new("cv.docx"),
            &sample_result(),
            false,
            ColorMode(false),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("via docx"));
        assert!(text.contains("Name: John Smith"));
        assert!(text.contains("Skills (2)"));
        assert!(text.contains("Python, SQL"));
        assert!(text.contains("Email: (not found)"));
    }

    #[test]
    fn full_text_flag_appends_transcript() {
        let mut buf = Vec::new();
        print_result(
            &mut buf,
            Path::new("cv.docx"),
            &sample_result(),
            true,
            ColorMode(false),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Full text"));
        assert!(text.contains("John Smith\nSkills: Python"));
    }
}
