//! `editlog diff`

use anyhow::Context;
use editlog_core::diff::{DiffHunk, UnifiedDiff, format_hunks};
use std::path::Path;

pub async fn execute(old: &Path, new: &Path, context: usize) -> anyhow::Result<()> {
    let old_text = tokio::fs::read_to_string(old)
        .await
        .with_context(|| format!("Failed to read {}", old.display()))?;
    let new_text = tokio::fs::read_to_string(new)
        .await
        .with_context(|| format!("Failed to read {}", new.display()))?;

    let hunks = UnifiedDiff::new(context).compute(&old_text, &new_text);
    if hunks.is_empty() {
        eprintln!("No differences");
        return Ok(());
    }

    println!("--- {}", old.display());
    println!("+++ {}", new.display());
    print!("{}", format_hunks(&hunks));

    let (added, removed) = change_totals(&hunks);
    eprintln!("{} hunk(s), +{} -{}", hunks.len(), added, removed);
    Ok(())
}

/// Total inserted and deleted lines across all hunks
fn change_totals(hunks: &[DiffHunk]) -> (usize, usize) {
    hunks.iter().fold((0, 0), |(added, removed), hunk| {
        (added + hunk.added_count(), removed + hunk.removed_count())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use editlog_core::diff::generate_unified_diff;

    #[test]
    fn test_change_totals() {
        let appended = generate_unified_diff("a", "a\nb\nc");
        assert_eq!(change_totals(&appended), (2, 0));

        let truncated = generate_unified_diff("a\nb", "a");
        assert_eq!(change_totals(&truncated), (0, 1));

        assert_eq!(change_totals(&[]), (0, 0));
    }
}
