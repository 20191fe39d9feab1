use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A candidate context file and the section label it contributes under.
#[derive(Debug, Clone, Copy)]
pub struct ContextSource {
    pub filename: &'static str,
    pub label: &'static str,
}

/// Candidates for the Gemini front-end, in priority order.
pub const GEMINI_CONTEXT_SOURCES: &[ContextSource] = &[
    ContextSource {
        filename: "gemini.md",
        label: "Context from gemini.md",
    },
    ContextSource {
        filename: "README.md",
        label: "Project README",
    },
];

/// Candidates for the Ollama front-end, in priority order.
pub const OLLAMA_CONTEXT_SOURCES: &[ContextSource] = &[
    ContextSource {
        filename: "claude.md",
        label: "Context from claude.md",
    },
    ContextSource {
        filename: "gemini.md",
        label: "Context from gemini.md",
    },
    ContextSource {
        filename: "agents.md",
        label: "Context from agents.md",
    },
    ContextSource {
        filename: "README.md",
        label: "Project README",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSection {
    pub label: String,
    pub text: String,
}

/// Project context gathered once at startup. Section order is the declared
/// candidate order, never directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBundle {
    sections: Vec<ContextSection>,
}

impl ContextBundle {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reads every candidate present in `dir`, verbatim, skipping absent
    /// files silently. Prints an acknowledgment line per loaded file.
    pub fn load(dir: &Path, sources: &[ContextSource]) -> Result<Self> {
        let mut sections = Vec::new();
        for source in sources {
            let path = dir.join(source.filename);
            if !path.exists() {
                continue;
            }
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read context file '{}'", path.display()))?;
            debug!(
                filename = source.filename,
                bytes = text.len(),
                "loaded context file"
            );
            println!("✓ Loaded {}", source.filename);
            sections.push(ContextSection {
                label: source.label.to_string(),
                text,
            });
        }
        Ok(Self { sections })
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[ContextSection] {
        &self.sections
    }

    /// Concatenates all sections as `# <label>:\n<text>\n\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("# {}:\n{}\n\n", section.label, section.text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{ContextBundle, GEMINI_CONTEXT_SOURCES, OLLAMA_CONTEXT_SOURCES};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock should be after unix epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "quill-context-{suffix}-{stamp}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temp directory");
        dir
    }

    #[test]
    fn load_skips_absent_candidates() {
        let dir = unique_temp_dir("absent");
        let bundle =
            ContextBundle::load(&dir, GEMINI_CONTEXT_SOURCES).expect("load should succeed");
        assert!(bundle.is_empty());
        assert_eq!(bundle.render(), "");
        fs::remove_dir_all(&dir).expect("failed to clean up temp directory");
    }

    #[test]
    fn load_reads_present_candidates_verbatim() {
        let dir = unique_temp_dir("present");
        fs::write(dir.join("gemini.md"), "Build a CLI").expect("write should succeed");
        let bundle =
            ContextBundle::load(&dir, GEMINI_CONTEXT_SOURCES).expect("load should succeed");

        assert_eq!(bundle.sections().len(), 1);
        assert_eq!(bundle.sections()[0].label, "Context from gemini.md");
        assert_eq!(bundle.sections()[0].text, "Build a CLI");
        assert_eq!(bundle.render(), "# Context from gemini.md:\nBuild a CLI\n\n");
        fs::remove_dir_all(&dir).expect("failed to clean up temp directory");
    }

    #[test]
    fn load_preserves_declared_priority_order() {
        let dir = unique_temp_dir("order");
        // Written in reverse of the declared order.
        fs::write(dir.join("README.md"), "readme").expect("write should succeed");
        fs::write(dir.join("agents.md"), "agents").expect("write should succeed");
        fs::write(dir.join("claude.md"), "claude").expect("write should succeed");

        let bundle =
            ContextBundle::load(&dir, OLLAMA_CONTEXT_SOURCES).expect("load should succeed");
        let labels: Vec<&str> = bundle
            .sections()
            .iter()
            .map(|section| section.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Context from claude.md",
                "Context from agents.md",
                "Project README",
            ]
        );
        fs::remove_dir_all(&dir).expect("failed to clean up temp directory");
    }

    #[test]
    fn load_keeps_empty_files_as_empty_sections() {
        let dir = unique_temp_dir("empty-file");
        fs::write(dir.join("gemini.md"), "").expect("write should succeed");
        let bundle =
            ContextBundle::load(&dir, GEMINI_CONTEXT_SOURCES).expect("load should succeed");

        assert_eq!(bundle.sections().len(), 1);
        assert_eq!(bundle.sections()[0].text, "");
        assert_eq!(bundle.render(), "# Context from gemini.md:\n\n\n");
        fs::remove_dir_all(&dir).expect("failed to clean up temp directory");
    }

    #[test]
    fn readme_contributes_under_its_own_label() {
        let dir = unique_temp_dir("readme");
        fs::write(dir.join("README.md"), "A project.").expect("write should succeed");
        let bundle =
            ContextBundle::load(&dir, GEMINI_CONTEXT_SOURCES).expect("load should succeed");
        assert_eq!(bundle.render(), "# Project README:\nA project.\n\n");
        fs::remove_dir_all(&dir).expect("failed to clean up temp directory");
    }
}
