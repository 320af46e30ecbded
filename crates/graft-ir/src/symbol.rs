//! Interned names for operators, parameters and attributes.

use std::fmt;
use std::sync::LazyLock;

use lasso::{Rodeo, Spur};
use parking_lot::RwLock;

static INTERNER: LazyLock<RwLock<Rodeo>> = LazyLock::new(|| RwLock::new(Rodeo::default()));

/// Interned name with cheap `Copy` and equality.
///
/// Operator identity comparison goes through this type, so two primitives
/// named `"add"` compare equal no matter where they were created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Spur);

impl Symbol {
    pub fn new(text: &'static str) -> Self {
        if let Some(spur) = INTERNER.read().get(text) {
            return Symbol(spur);
        }
        Symbol(INTERNER.write().get_or_intern_static(text))
    }

    /// Run `f` on the symbol's text while the interner is read-locked.
    ///
    /// `read_recursive` keeps nested `Display`/`==` calls inside `f` from
    /// deadlocking against a queued writer.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = INTERNER.read_recursive();
        f(interner.resolve(&self.0))
    }
}

impl From<&'static str> for Symbol {
    fn from(text: &'static str) -> Self {
        Symbol::new(text)
    }
}

/// Declare zero-argument helpers returning well-known symbols.
///
/// ```
/// graft_ir::symbols! {
///     ATTR_BEGIN => "begin",
///     ATTR_SIZE => "size",
/// }
/// assert_eq!(ATTR_BEGIN(), "begin");
/// ```
#[macro_export]
macro_rules! symbols {
    ($($name:ident => $text:literal),* $(,)?) => {
        $(
            #[allow(non_snake_case)]
            pub fn $name() -> $crate::Symbol {
                $crate::Symbol::new($text)
            }
        )*
    };
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.with_str(|s| s == *other)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}
