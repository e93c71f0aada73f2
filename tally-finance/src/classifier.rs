//! Record classification: marketplace balance credit and/or external payment.

use serde::{Deserialize, Serialize};
use tally_core::has_credit_token;
use tally_core::keywords::{FUNDS_MARKER, MARKETPLACE_MARKER, mentions_external_method};
use tally_ingest::Block;

/// The two flags are independent; a block may be both or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_marketplace: bool,
    pub is_external_payment: bool,
}

impl Classification {
    pub fn is_relevant(&self) -> bool {
        self.is_marketplace || self.is_external_payment
    }
}

pub fn classify(block: &Block) -> Classification {
    Classification {
        is_marketplace: is_marketplace_block(block),
        is_external_payment: has_external_method(block),
    }
}

/// A marketplace sale credited to the wallet: the marketplace marker, a funds
/// line and a `+¥` token, each on any line of the block.
pub fn is_marketplace_block(block: &Block) -> bool {
    let has_market = block.lines().any(|l| l.contains(MARKETPLACE_MARKER));
    let has_funds = block.lines().any(|l| l.contains(FUNDS_MARKER));
    let has_plus = block.lines().any(has_credit_token);
    has_market && has_funds && has_plus
}

pub fn has_external_method(block: &Block) -> bool {
    block.lines().any(mentions_external_method)
}
