//! Diagram block extraction and replacement.
//!
//! Scans Markdown text for fenced mermaid blocks, renders each through a
//! [`DiagramRenderer`], and rewrites the text with image references in place
//! of the blocks that rendered successfully. Blocks that fail to render are
//! kept byte-for-byte so a broken diagram never loses its source.
//!
//! Replacement is a single forward pass over an ordered list of
//! non-overlapping edits, so earlier spans are never invalidated by later
//! substitutions.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{info, warn};
use regex::Regex;

use crate::render::DiagramRenderer;

/// Matches a fenced mermaid block, lazily, across newlines. Group 1 is the
/// enclosed diagram source.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```mermaid\n(.*?)```").expect("Block pattern is valid")
});

/// One fenced diagram block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramBlock {
    /// Diagram source enclosed by the fences.
    source: String,
    /// 0-based position among all blocks in forward document order.
    ordinal: usize,
    /// Byte span of the full delimited region, fences included.
    span: Range<usize>,
}

impl DiagramBlock {
    /// Returns the enclosed diagram source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the block's 0-based ordinal in forward document order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the byte span of the full delimited region.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// A single text substitution: replace `span` with `replacement`.
#[derive(Debug, Clone)]
pub struct Edit {
    span: Range<usize>,
    replacement: String,
}

impl Edit {
    /// Creates a new edit replacing `span` with `replacement`.
    pub fn new(span: Range<usize>, replacement: String) -> Self {
        Self { span, replacement }
    }
}

/// Find all non-overlapping fenced mermaid blocks in `text`, in forward
/// document order.
pub fn find_diagram_blocks(text: &str) -> Vec<DiagramBlock> {
    BLOCK_RE
        .captures_iter(text)
        .enumerate()
        .map(|(ordinal, caps)| {
            let whole = caps.get(0).expect("Group 0 always participates");
            let source = caps.get(1).expect("Block pattern has one group");
            DiagramBlock {
                source: source.as_str().to_string(),
                ordinal,
                span: whole.range(),
            }
        })
        .collect()
}

/// Apply an ordered list of non-overlapping edits to `text` in one forward
/// pass, copying unmatched spans verbatim.
///
/// Edits must be sorted by span start and must not overlap.
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for edit in edits {
        debug_assert!(edit.span.start >= cursor, "Edits must be sorted and disjoint");
        out.push_str(&text[cursor..edit.span.start]);
        out.push_str(&edit.replacement);
        cursor = edit.span.end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Render every diagram block in `text` and substitute image references.
///
/// Images are written into `scratch_dir` and named
/// `<base_name>_mermaid_<ordinal>.png`, numbered in forward document order.
/// A block whose render fails is logged as a warning and left untouched;
/// sibling blocks keep their ordinals and are still processed.
///
/// Returns the rewritten text and the paths of the successfully rendered
/// images. A document with no diagram blocks passes through unchanged.
pub fn extract_and_replace<R: DiagramRenderer>(
    renderer: &R,
    text: &str,
    scratch_dir: &Path,
    base_name: &str,
) -> (String, Vec<PathBuf>) {
    let blocks = find_diagram_blocks(text);
    if blocks.is_empty() {
        return (text.to_string(), Vec::new());
    }

    let mut edits = Vec::new();
    let mut images = Vec::new();

    for block in &blocks {
        let image_name = format!("{base_name}_mermaid_{}.png", block.ordinal());
        let image_path = scratch_dir.join(&image_name);

        match renderer.render(block.source(), &image_path) {
            Ok(()) => {
                info!(image = image_name; "Rendered diagram block");
                let markup = format!("![Diagram]({})", image_path.display());
                edits.push(Edit::new(block.span(), markup));
                images.push(image_path);
            }
            Err(err) => {
                warn!(image = image_name, err:? = err; "Failed to render diagram block, keeping source");
            }
        }
    }

    (apply_edits(text, &edits), images)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::fs;

    use tempfile::tempdir;

    use crate::render::RenderError;

    /// Renderer whose per-call outcomes are scripted up front. Records every
    /// output path it is asked for.
    struct ScriptedRenderer {
        outcomes: RefCell<Vec<bool>>,
        seen: RefCell<Vec<PathBuf>>,
    }

    impl ScriptedRenderer {
        fn new(outcomes: &[bool]) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.to_vec()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn succeeding() -> Self {
            Self {
                outcomes: RefCell::new(Vec::new()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl DiagramRenderer for ScriptedRenderer {
        fn render(&self, _source: &str, output: &Path) -> Result<(), RenderError> {
            self.seen.borrow_mut().push(output.to_path_buf());
            let ok = if self.outcomes.borrow().is_empty() {
                true
            } else {
                self.outcomes.borrow_mut().remove(0)
            };
            if ok {
                fs::write(output, b"png").map_err(RenderError::Scratch)?;
                Ok(())
            } else {
                Err(RenderError::Scratch(std::io::Error::other("scripted failure")))
            }
        }
    }

    const TWO_BLOCKS: &str = "\
# Title

```mermaid
graph TD;
A-->B;
```

Some prose.

```mermaid
sequenceDiagram
A->>B: hi
```
Tail.
";

    #[test]
    fn no_blocks_found_in_plain_prose() {
        assert!(find_diagram_blocks("# Just prose\n\nNo diagrams here.\n").is_empty());
    }

    #[test]
    fn finds_blocks_in_forward_order_with_spans() {
        let blocks = find_diagram_blocks(TWO_BLOCKS);
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].ordinal(), 0);
        assert_eq!(blocks[0].source(), "graph TD;\nA-->B;\n");
        assert_eq!(blocks[1].ordinal(), 1);
        assert_eq!(blocks[1].source(), "sequenceDiagram\nA->>B: hi\n");

        // Spans cover the full fenced region and stay in document order.
        assert!(blocks[0].span().end <= blocks[1].span().start);
        assert_eq!(&TWO_BLOCKS[blocks[0].span()], "```mermaid\ngraph TD;\nA-->B;\n```");
    }

    #[test]
    fn adjacent_blocks_get_disjoint_spans() {
        let text = "```mermaid\na\n```\n```mermaid\nb\n```";
        let blocks = find_diagram_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].span().end <= blocks[1].span().start);
        assert_eq!(blocks[0].source(), "a\n");
        assert_eq!(blocks[1].source(), "b\n");
    }

    #[test]
    fn apply_edits_rewrites_spans_in_one_pass() {
        let text = "aaXXbbYYcc";
        let edits = vec![
            Edit::new(2..4, "1".to_string()),
            Edit::new(6..8, "22".to_string()),
        ];
        assert_eq!(apply_edits(text, &edits), "aa1bb22cc");
    }

    #[test]
    fn apply_edits_with_no_edits_is_identity() {
        assert_eq!(apply_edits("unchanged", &[]), "unchanged");
    }

    #[test]
    fn zero_block_document_passes_through_unchanged() {
        let dir = tempdir().expect("Failed to create temp directory");
        let renderer = ScriptedRenderer::succeeding();
        let text = "# Heading\n\nplain text\n";

        let (out, images) = extract_and_replace(&renderer, text, dir.path(), "doc");

        assert_eq!(out, text);
        assert!(images.is_empty());
        assert!(renderer.seen.borrow().is_empty());
    }

    #[test]
    fn blocks_become_image_references_numbered_forward() {
        let dir = tempdir().expect("Failed to create temp directory");
        let renderer = ScriptedRenderer::succeeding();

        let (out, images) = extract_and_replace(&renderer, TWO_BLOCKS, dir.path(), "doc");

        assert_eq!(images.len(), 2);
        assert_eq!(images[0], dir.path().join("doc_mermaid_0.png"));
        assert_eq!(images[1], dir.path().join("doc_mermaid_1.png"));

        assert!(!out.contains("```mermaid"));
        assert!(out.contains(&format!("![Diagram]({})", images[0].display())));
        assert!(out.contains(&format!("![Diagram]({})", images[1].display())));

        // Surrounding prose survives untouched.
        assert!(out.starts_with("# Title\n"));
        assert!(out.contains("Some prose."));
        assert!(out.ends_with("Tail.\n"));
    }

    #[test]
    fn failed_block_keeps_its_source_and_ordinals_hold() {
        let dir = tempdir().expect("Failed to create temp directory");
        let renderer = ScriptedRenderer::new(&[false, true]);

        let (out, images) = extract_and_replace(&renderer, TWO_BLOCKS, dir.path(), "doc");

        // First block kept raw, second replaced, numbering unaffected.
        assert!(out.contains("```mermaid\ngraph TD;\nA-->B;\n```"));
        assert_eq!(images, vec![dir.path().join("doc_mermaid_1.png")]);
        assert!(out.contains("doc_mermaid_1.png"));
        assert!(!out.contains("doc_mermaid_0.png"));

        // Both blocks were attempted, with forward-order image names.
        let seen = renderer.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].ends_with("doc_mermaid_0.png"));
        assert!(seen[1].ends_with("doc_mermaid_1.png"));
    }

    #[test]
    fn back_to_back_blocks_replace_cleanly() {
        let dir = tempdir().expect("Failed to create temp directory");
        let renderer = ScriptedRenderer::succeeding();
        let text = "```mermaid\na\n``````mermaid\nb\n```";

        let (out, images) = extract_and_replace(&renderer, text, dir.path(), "doc");

        assert_eq!(images.len(), 2);
        let expected = format!(
            "![Diagram]({})![Diagram]({})",
            dir.path().join("doc_mermaid_0.png").display(),
            dir.path().join("doc_mermaid_1.png").display()
        );
        assert_eq!(out, expected);
    }
}
