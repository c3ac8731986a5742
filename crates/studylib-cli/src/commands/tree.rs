//! `tree`: print the folder hierarchy.

use std::fmt::Write as _;
use std::sync::Arc;

use studylib_core::config::AppConfig;
use studylib_core::error::AppError;
use studylib_core::traits::transport::NotesTransport;
use studylib_entity::folder::{FolderNode, FolderTree};
use studylib_service::StudyLibrary;

use crate::output::{self, OutputFormat};

/// Execute the tree command
pub async fn execute(
    config: &AppConfig,
    transport: Arc<dyn NotesTransport>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut library = StudyLibrary::from_config(transport, config);
    library.refresh_folders().await?;
    let tree = library.corpus().tree();

    match format {
        OutputFormat::Json => output::print_json(&tree),
        OutputFormat::Table => print!("{}", render(&tree)),
    }
    Ok(())
}

/// Render the tree as indented text, one folder per line.
pub fn render(tree: &FolderTree) -> String {
    let mut out = String::from("/\n");
    let count = tree.roots.len();
    for (i, node) in tree.roots.iter().enumerate() {
        render_node(&mut out, node, "", i + 1 == count);
    }
    out
}

fn render_node(out: &mut String, node: &FolderNode, prefix: &str, last: bool) {
    let branch = if last { "└── " } else { "├── " };
    let _ = writeln!(
        out,
        "{prefix}{branch}{} ({}) [{} notes]",
        node.name, node.slug, node.material_count
    );

    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(out, child, &child_prefix, i + 1 == count);
    }
}
