use crate::bundle::BundleRecord;
use crate::errors::BundleError;
use crate::trie::{Trie, TrieNode};
use tiktoken_rs::get_bpe_from_model;
use tracing::{debug, info};

/// Token count of each record's content under the encoding used by `model`.
pub fn count_tokens(
    model: &str,
    records: &[BundleRecord],
) -> Result<Vec<(String, usize)>, BundleError> {
    let tokenizer =
        get_bpe_from_model(model).map_err(|e| BundleError::TokenizerError(e.to_string()))?;
    Ok(records
        .iter()
        .map(|record| {
            let count = tokenizer.encode_ordinary(&record.content).len();
            debug!("File {} has {} tokens", record.path, count);
            (record.path.clone(), count)
        })
        .collect())
}

/// Directory tree of token counts, one line per node, preceded by the overall total.
pub fn render_stats(token_counts: &[(String, usize)]) -> Vec<String> {
    let mut trie = Trie::new();
    for (path, count) in token_counts {
        trie.insert(path, *count);
    }

    let mut lines = vec![format!("Overall ({} tokens)", trie.root().total_tokens())];
    render_children(trie.root(), "", &mut lines);
    lines
}

pub fn print_stats(token_counts: &[(String, usize)]) {
    for line in render_stats(token_counts) {
        info!("{}", line);
    }
}

fn render_children(node: &TrieNode, prefix: &str, lines: &mut Vec<String>) {
    let mut children: Vec<_> = node.children.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));

    for (i, (name, child)) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        if child.is_file() {
            lines.push(format!(
                "{}{} {} ({} tokens)",
                prefix,
                connector,
                name,
                child.total_tokens()
            ));
        } else {
            lines.push(format!(
                "{}{} 📂 {} ({} tokens)",
                prefix,
                connector,
                name,
                child.total_tokens()
            ));
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            render_children(child, &child_prefix, lines);
        }
    }
}
