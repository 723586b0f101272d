//! Per-entity flag sets.

use std::fmt;

/// Flags every named entity carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EntityFlags {
    /// A non-empty qualified name has been cached.
    pub has_qualified_name: bool,
    /// The entity borrows its name from a specification/abstract-origin entity.
    pub has_reference: bool,
    pub is_global_reference: bool,
    /// The entity's own name matched a search pattern.
    pub has_pattern_match: bool,
    /// The source-file index from the debug info was out of range.
    pub invalid_file_name: bool,
    /// Name resolution ran; the cached name is final.
    pub name_resolved: bool,
}

// ============================================================================
// SCOPE FLAGS
// ============================================================================

/// Monotonic "has-X" bits on a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScopeFlag {
    HasScopes,
    HasSymbols,
    HasTypes,
    HasLines,
    HasGlobals,
    HasLocals,
    HasPattern,
}

impl ScopeFlag {
    const ALL: [ScopeFlag; 7] = [
        ScopeFlag::HasScopes,
        ScopeFlag::HasSymbols,
        ScopeFlag::HasTypes,
        ScopeFlag::HasLines,
        ScopeFlag::HasGlobals,
        ScopeFlag::HasLocals,
        ScopeFlag::HasPattern,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The aggregate flags of a scope. Bits are only ever added.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScopeFlags(u8);

impl ScopeFlags {
    #[inline]
    pub const fn contains(self, flag: ScopeFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    #[inline]
    pub(crate) fn insert(&mut self, flag: ScopeFlag) {
        self.0 |= flag.bit();
    }

    pub const fn has_scopes(self) -> bool {
        self.contains(ScopeFlag::HasScopes)
    }

    pub const fn has_symbols(self) -> bool {
        self.contains(ScopeFlag::HasSymbols)
    }

    pub const fn has_types(self) -> bool {
        self.contains(ScopeFlag::HasTypes)
    }

    pub const fn has_lines(self) -> bool {
        self.contains(ScopeFlag::HasLines)
    }

    pub const fn has_globals(self) -> bool {
        self.contains(ScopeFlag::HasGlobals)
    }

    pub const fn has_locals(self) -> bool {
        self.contains(ScopeFlag::HasLocals)
    }

    pub const fn has_pattern(self) -> bool {
        self.contains(ScopeFlag::HasPattern)
    }
}

impl fmt::Debug for ScopeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(ScopeFlag::ALL.iter().filter(|flag| self.contains(**flag)))
            .finish()
    }
}

// ============================================================================
// LINE FLAGS
// ============================================================================

/// Attributes of a line-table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineFlag {
    IsLineRecord,
    HasDiscriminator,
    IsEndSequence,
    IsNewBasicBlock,
    IsNewStatement,
    IsEpilogueBegin,
    IsPrologueEnd,
}

impl LineFlag {
    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The 7-bit flag set of a line record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineFlags(u8);

impl LineFlags {
    #[inline]
    pub const fn contains(self, flag: LineFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, flag: LineFlag, value: bool) {
        if value {
            self.0 |= flag.bit();
        } else {
            self.0 &= !flag.bit();
        }
    }

    /// Builder-style variant of [`LineFlags::set`].
    pub fn with(mut self, flag: LineFlag) -> Self {
        self.set(flag, true);
        self
    }

    pub const fn is_line_record(self) -> bool {
        self.contains(LineFlag::IsLineRecord)
    }

    pub const fn has_discriminator(self) -> bool {
        self.contains(LineFlag::HasDiscriminator)
    }

    pub const fn is_end_sequence(self) -> bool {
        self.contains(LineFlag::IsEndSequence)
    }

    pub const fn is_new_basic_block(self) -> bool {
        self.contains(LineFlag::IsNewBasicBlock)
    }

    pub const fn is_new_statement(self) -> bool {
        self.contains(LineFlag::IsNewStatement)
    }

    pub const fn is_epilogue_begin(self) -> bool {
        self.contains(LineFlag::IsEpilogueBegin)
    }

    pub const fn is_prologue_end(self) -> bool {
        self.contains(LineFlag::IsPrologueEnd)
    }
}
