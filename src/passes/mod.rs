//! Bundled simplification passes.

pub mod arith;
pub mod slice;

use graft_rewrite::RuleSet;

use self::arith::{AddZero, MulOne, NegNeg, SubZero};
use self::slice::SliceIdentity;

/// Neutral-element and double-negation rules.
pub fn arith_rules() -> RuleSet {
    RuleSet::new()
        .add_rule(AddZero::new())
        .add_rule(SubZero::new())
        .add_rule(MulOne::new())
        .add_visitor("neg_neg", NegNeg::default)
}

/// Every rule shipped with the crate, arithmetic first.
pub fn default_rules() -> RuleSet {
    arith_rules().add_rule(SliceIdentity::new())
}
