use std::fmt::{self, Display};

use eyre::{ensure, Result};

/// How a sequence may be walked. Levels are ordered: every level supports
/// everything the levels below it support.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Traversal {
    SinglePass,
    Forward,
    Bidirectional,
    RandomAccess,
    Contiguous,
}

impl Traversal {
    pub const fn min(self, other: Self) -> Self {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    pub const fn at_least(self, other: Self) -> bool {
        (self as u8) >= (other as u8)
    }

    pub const fn is_multi_pass(self) -> bool {
        self.at_least(Traversal::Forward)
    }
}

impl Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Traversal::SinglePass => "single-pass",
            Traversal::Forward => "forward",
            Traversal::Bidirectional => "bidirectional",
            Traversal::RandomAccess => "random-access",
            Traversal::Contiguous => "contiguous",
        };
        f.write_str(name)
    }
}

/// Structural facts about a sequence that adaptors try to keep.
///
/// Every sequence exposes one as an associated constant. The descriptor mirrors the capability
/// traits the sequence implements: an adaptor never reports a capability it does not implement,
/// and each adaptor derives its descriptor from its input through the `const fn` transformers
/// below.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Category {
    pub traversal: Traversal,
    /// Length is known in constant time.
    pub sized: bool,
    /// The end is a cursor of the same type as the begin.
    pub common: bool,
    /// The sequence references storage it does not own.
    pub borrowed: bool,
    /// Elements can be written through the mutable access path.
    pub mutable: bool,
    /// The sequence never ends.
    pub infinite: bool,
}

impl Category {
    /// Category of a flat, owned, growable buffer such as `Vec<T>`.
    pub const CONTAINER: Category = Category {
        traversal: Traversal::Contiguous,
        sized: true,
        common: true,
        borrowed: false,
        mutable: true,
        infinite: false,
    };

    /// Category of an already-open input stream.
    pub const SINGLE_PASS: Category = Category {
        traversal: Traversal::SinglePass,
        sized: false,
        common: false,
        borrowed: false,
        mutable: false,
        infinite: false,
    };

    pub const fn with_traversal(self, traversal: Traversal) -> Self {
        Category { traversal, ..self }
    }

    /// Caps the traversal level at `limit`.
    pub const fn capped(self, limit: Traversal) -> Self {
        Category {
            traversal: self.traversal.min(limit),
            ..self
        }
    }

    pub const fn borrowed(self) -> Self {
        Category {
            borrowed: true,
            ..self
        }
    }

    pub const fn owning(self) -> Self {
        Category {
            borrowed: false,
            ..self
        }
    }

    pub const fn read_only(self) -> Self {
        Category {
            mutable: false,
            ..self
        }
    }

    /// Sets whether elements can be written through the owner's mutable access path.
    pub const fn with_mutable(self, mutable: bool) -> Self {
        Category { mutable, ..self }
    }

    pub const fn without_len(self) -> Self {
        Category {
            sized: false,
            ..self
        }
    }

    pub const fn uncommon(self) -> Self {
        Category {
            common: false,
            ..self
        }
    }

    /// Element-wise transformation: keeps random access and length, loses contiguity and
    /// writable elements.
    pub const fn mapped(self) -> Self {
        self.capped(Traversal::RandomAccess).read_only()
    }

    /// Predicate-driven skipping: bidirectional at best, never sized and never common. Writable
    /// elements stay writable.
    pub const fn filtered(self) -> Self {
        self.capped(Traversal::Bidirectional).without_len().uncommon()
    }

    /// Dropping a prefix keeps everything but contiguity, which only windows keep.
    pub const fn dropped(self) -> Self {
        self.capped(Traversal::RandomAccess)
    }

    /// Taking a prefix of `n`: stays sized if the input was sized, and common only when the end
    /// can be computed by offsetting. The result is always finite and never contiguous.
    pub const fn taken(self) -> Self {
        let common = self.sized && self.traversal.at_least(Traversal::RandomAccess);
        Category {
            traversal: self.traversal.min(Traversal::RandomAccess),
            common,
            infinite: false,
            ..self
        }
    }

    /// Flattening: bidirectional at best and only when the outer sequence is common. Elements
    /// are read through the segments and never written.
    pub const fn joined(self, inner: Category) -> Self {
        let traversal = if self.common && inner.common {
            self.traversal
                .min(inner.traversal)
                .min(Traversal::Bidirectional)
        } else {
            self.traversal.min(inner.traversal).min(Traversal::Forward)
        };
        Category {
            traversal,
            sized: false,
            common: self.common,
            borrowed: self.borrowed,
            mutable: false,
            infinite: self.infinite,
        }
    }

    /// Splitting into sub-windows: forward only, elements are windows (read-only handles).
    pub const fn split(self) -> Self {
        Category {
            traversal: self.traversal.min(Traversal::Forward),
            sized: false,
            common: false,
            borrowed: self.borrowed,
            mutable: false,
            infinite: self.infinite,
        }
    }

    /// Lock-step pairing of two inputs.
    pub const fn zipped(self, other: Category) -> Self {
        let traversal = self
            .traversal
            .min(other.traversal)
            .min(Traversal::RandomAccess);
        let infinite = self.infinite && other.infinite;
        let sized = self.sized && other.sized;
        Category {
            traversal,
            sized,
            common: sized && traversal.at_least(Traversal::RandomAccess),
            borrowed: self.borrowed && other.borrowed,
            mutable: false,
            infinite,
        }
    }

    /// `true` when `self` claims nothing that `other` does not also claim. Bounding an infinite
    /// input may introduce a length and a common end.
    pub const fn no_stronger_than(&self, other: &Category) -> bool {
        other.traversal.at_least(self.traversal)
            && (!self.sized || other.sized || other.infinite)
            && (!self.common || other.common || other.infinite)
            && (!self.mutable || other.mutable)
    }

    /// Checked form of [`Category::no_stronger_than`] naming the first offending capability.
    pub fn ensure_no_stronger_than(&self, other: &Category) -> Result<()> {
        ensure!(
            other.traversal.at_least(self.traversal),
            "traversal {} exceeds the input's {}",
            self.traversal,
            other.traversal
        );
        ensure!(
            !self.sized || other.sized || other.infinite,
            "claims a known length the input lacks"
        );
        ensure!(
            !self.common || other.common || other.infinite,
            "claims a common end the input lacks"
        );
        ensure!(!self.mutable || other.mutable, "claims writable elements the input lacks");
        Ok(())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.traversal)?;
        for (flag, name) in [
            (self.sized, "sized"),
            (self.common, "common"),
            (self.borrowed, "borrowed"),
            (self.mutable, "mutable"),
            (self.infinite, "infinite"),
        ] {
            if flag {
                write!(f, "+{name}")?;
            }
        }
        Ok(())
    }
}
