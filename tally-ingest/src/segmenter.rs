//! Split document lines into records at each date marker.

use tally_core::DateMarker;

use crate::types::Block;

/// Partition `lines` into blocks. Concatenating the blocks' lines gives back
/// `lines` unchanged; text before the first marker forms its own undated block.
pub fn split_blocks(lines: &[String], marker: &DateMarker) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for line in lines {
        if marker.is_marker(line) {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(Block {
                date: marker.date(line),
                dated: true,
                lines: vec![line.clone()],
            });
        } else {
            match current.as_mut() {
                Some(block) => block.lines.push(line.clone()),
                None => {
                    current = Some(Block {
                        date: None,
                        dated: false,
                        lines: vec![line.clone()],
                    })
                }
            }
        }
    }

    if let Some(done) = current {
        blocks.push(done);
    }

    tracing::debug!(blocks = blocks.len(), "segmented document");
    blocks
}
