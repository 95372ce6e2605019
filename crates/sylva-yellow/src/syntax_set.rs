use crate::SyntaxKind;

/// A set of [`SyntaxKind`]s packed into a single word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SyntaxSet {
    bits: u64,
}

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: 0 };

    const fn mask(kind: SyntaxKind) -> u64 {
        let bit = kind as u32;
        debug_assert!(bit < u64::BITS, "SyntaxKind does not fit into a SyntaxSet");
        1 << bit
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < N {
            bits |= Self::mask(kinds[i]);
            i += 1;
        }
        Self { bits }
    }

    pub const fn union(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn contains(self, kind: SyntaxKind) -> bool {
        self.bits & Self::mask(kind) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SyntaxKind::*;

    #[test]
    fn membership() {
        const CLOSE: SyntaxSet = SyntaxSet::new([CURLY_CLOSE, SQUARE_BRACKET_CLOSE]);
        const SEPARATORS: SyntaxSet = SyntaxSet::new([COLON, COMMA]);
        const DELIMITERS: SyntaxSet = CLOSE.union(SEPARATORS);

        assert!(CLOSE.contains(CURLY_CLOSE));
        assert!(!CLOSE.contains(COMMA));
        assert!(DELIMITERS.contains(COMMA));
        assert!(DELIMITERS.contains(SQUARE_BRACKET_CLOSE));
        assert!(!DELIMITERS.contains(LIST));
        assert!(!SyntaxSet::EMPTY.contains(EOF));
    }
}
